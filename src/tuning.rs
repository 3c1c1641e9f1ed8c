//! Data-driven game balance
//!
//! Every constant that shapes how the game plays lives here so a host can
//! load alternative balance from JSON. Window-relative values are stored
//! as fractions of the window width or height.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    /// Radius added per growth event
    pub ball_growth: f32,
    /// Top speed as a fraction of window width (pixels per frame)
    pub top_speed_per_width: f32,
    /// Gravity as a fraction of window height (pixels per frame squared)
    pub gravity_per_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_growth: f32,
    /// Horizontal move speed as a fraction of window width (per frame)
    pub move_speed_per_width: f32,
    /// Speed multiplier while the dash modifier is held
    pub dash_multiplier: f32,

    // === Cannon ===
    pub cannon_min_angle: f32,
    pub cannon_max_angle: f32,
    /// Radians turned per frame while a rotate input is held
    pub cannon_step: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_height: f32,
    /// Chance that a top-row brick carries a projectile
    pub fire_chance: f64,

    // === Structural pillars ===
    pub pillar_width_frac: f32,
    pub pillar_height_frac: f32,
    pub pillar_top_frac: f32,
    pub pillar_growth: f32,
    pub pillar_max_growths: u32,

    // === Protective pillars ===
    pub barrier_width_frac: f32,
    pub barrier_height: f32,
    pub barrier_y_frac: f32,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    /// Speed added per growth threshold
    pub projectile_accel: f32,
    /// Per-frame chance that an idle projectile launches
    pub launch_chance: f64,
    pub drop_points: u32,

    // === Prisoners ===
    pub prisoners_per_side: u32,
    pub prisoner_size: f32,
    pub prisoner_pace_speed: f32,
    pub prisoner_migrate_speed: f32,

    // === Timers (frames) ===
    pub countdown_frames: u32,
    pub retract_frames: u32,
    pub release_delay_frames: u32,
    pub turret_delay_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: 15.0,
            ball_growth: 3.0,
            top_speed_per_width: 1.0 / 100.0,
            gravity_per_height: 1.0 / 6000.0,

            paddle_width: 150.0,
            paddle_height: 20.0,
            paddle_growth: 15.0,
            move_speed_per_width: 1.0 / 150.0,
            dash_multiplier: 2.0,

            cannon_min_angle: -2.32,
            cannon_max_angle: -0.81,
            cannon_step: 0.04,

            brick_rows: 5,
            brick_cols: 5,
            brick_height: 25.0,
            fire_chance: 0.4,

            pillar_width_frac: 0.04,
            pillar_height_frac: 0.2,
            pillar_top_frac: 0.45,
            pillar_growth: 20.0,
            pillar_max_growths: 2,

            barrier_width_frac: 0.2,
            barrier_height: 16.0,
            barrier_y_frac: 0.3,

            projectile_width: 10.0,
            projectile_height: 16.0,
            projectile_speed: 3.0,
            projectile_accel: 0.5,
            launch_chance: 0.9,
            drop_points: 5,

            prisoners_per_side: 2,
            prisoner_size: 20.0,
            prisoner_pace_speed: 1.0,
            prisoner_migrate_speed: 2.0,

            countdown_frames: 180,
            retract_frames: 90,
            release_delay_frames: 60,
            turret_delay_frames: 60,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(SessionError::EmptyLayout {
                rows: self.brick_rows,
                cols: self.brick_cols,
            });
        }

        let positive = [
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("brick_height", self.brick_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("prisoner_size", self.prisoner_size),
            ("top_speed_per_width", self.top_speed_per_width),
            ("move_speed_per_width", self.move_speed_per_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SessionError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("ball_growth", self.ball_growth),
            ("paddle_growth", self.paddle_growth),
            ("pillar_growth", self.pillar_growth),
            ("gravity_per_height", self.gravity_per_height),
            ("projectile_speed", self.projectile_speed),
            ("projectile_accel", self.projectile_accel),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SessionError::InvalidTuning(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.cannon_min_angle >= self.cannon_max_angle {
            return Err(SessionError::InvalidTuning(format!(
                "cannon arc is empty ({} .. {})",
                self.cannon_min_angle, self.cannon_max_angle
            )));
        }
        if !(0.0..=1.0).contains(&self.fire_chance) || !(0.0..=1.0).contains(&self.launch_chance)
        {
            return Err(SessionError::InvalidTuning(
                "chances must be within 0..=1".to_string(),
            ));
        }
        if self.prisoners_per_side == 0 {
            return Err(SessionError::InvalidTuning(
                "at least one prisoner per side is required".to_string(),
            ));
        }
        if self.drop_points == 0 {
            return Err(SessionError::InvalidTuning(
                "at least one drop point is required".to_string(),
            ));
        }

        Ok(())
    }
}
