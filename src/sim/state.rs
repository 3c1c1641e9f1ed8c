//! Game state and core simulation types
//!
//! The session owns every entity; nothing in the simulation reaches for
//! global state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, MirrorBall};
use super::cannon::Cannon;
use super::geom::Aabb;
use super::growth::GrowthScheduler;
use super::pillar::{Pillar, Side};
use super::prisoner::Prisoner;
use super::projectile::Projectile;
use super::tick::TickInput;
use crate::consts::{GROWTH_STEP, PADDLE_FLOOR_GAP};
use crate::error::SessionError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game countdown
    Countdown,
    /// Active gameplay
    Playing,
    /// Suspended until resumed
    Paused,
    /// Help overlay, suspended until resumed
    Tutorial,
    /// Hit by the ball or a projectile
    Lose,
    /// Wall destroyed and every prisoner freed
    Win,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Lose | GamePhase::Win)
    }
}

/// Discrete notifications for audio and effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    BallBounce,
    BrickDestroyed { points: u32 },
    Grew { growth_count: u32 },
    PillarsRetracting,
    PrisonerReleased,
    GameLost,
    GameWon,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered near the bottom of the window
    pub fn new(window_width: f32, window_height: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(
                window_width / 2.0,
                window_height - PADDLE_FLOOR_GAP - height / 2.0,
            ),
            width,
            height,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.pos, Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    /// Range of center X keeping a `width`-wide paddle inside the window
    pub fn center_span(width: f32, window_width: f32) -> (f32, f32) {
        let half = (width / 2.0).min(window_width / 2.0);
        (half, window_width - half)
    }

    pub fn move_by(&mut self, dx: f32, window_width: f32) {
        let (min_x, max_x) = Self::center_span(self.width, window_width);
        self.pos.x = (self.pos.x + dx).clamp(min_x, max_x);
    }

    pub fn grow(&mut self, increment: f32, window_width: f32) {
        self.width += increment;
        self.move_by(0.0, window_width);
    }
}

/// A destructible wall brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub aabb: Aabb,
    pub points: u32,
    /// Sources enemy projectiles
    pub fires_projectile: bool,
}

impl Brick {
    pub fn new(aabb: Aabb, points: u32, fires_projectile: bool) -> Self {
        Self {
            aabb,
            points,
            fires_projectile,
        }
    }

    /// Where this brick's projectile hangs from
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.aabb.center.x, self.aabb.bottom())
    }
}

/// Host-supplied session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    #[serde(default)]
    pub tuning: Tuning,
}

impl SessionConfig {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            tuning: Tuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Complete game session (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameSession {
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation frame counter
    pub frame: u64,
    pub countdown_remaining: u32,
    pub ball: Ball,
    pub mirror: MirrorBall,
    pub paddle: Paddle,
    pub cannon: Cannon,
    pub pillars: Vec<Pillar>,
    pub bricks: Vec<Brick>,
    pub projectiles: Vec<Projectile>,
    pub prisoners: Vec<Prisoner>,
    pub growth: GrowthScheduler,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    /// Frames until pillars turn into turrets; `Some(0)` once armed
    pub turret_delay: Option<u32>,
    /// Frames until prisoners start migrating; `Some(0)` once open
    pub release_delay: Option<u32>,
    pub(crate) rng: Pcg32,
    pub(crate) prev_input: TickInput,
    pub(crate) initial_sources: usize,
    pub(crate) drop_points: Vec<Vec2>,
}

impl GameSession {
    /// Build the stage: paddle, cannon, pillars, wall, cages, projectiles
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let SessionConfig {
            width,
            height,
            seed,
            tuning,
        } = config;

        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SessionError::InvalidWindow { width, height });
        }
        tuning.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);

        let paddle = Paddle::new(width, height, tuning.paddle_width, tuning.paddle_height);
        let cannon = Cannon::new(
            &paddle,
            tuning.cannon_min_angle,
            tuning.cannon_max_angle,
            tuning.cannon_step,
        );
        let ball = Ball::new(
            &paddle,
            tuning.ball_radius,
            width * tuning.top_speed_per_width,
        );

        // Structural pillars with the wall resting on them
        let pillar_size = Vec2::new(
            width * tuning.pillar_width_frac,
            height * tuning.pillar_height_frac,
        );
        let pillar_top = height * tuning.pillar_top_frac;
        let mut pillars: Vec<Pillar> = [0.3, 0.7]
            .iter()
            .map(|frac| {
                Pillar::structural(Aabb::from_top_left(
                    Vec2::new(width * frac - pillar_size.x / 2.0, pillar_top),
                    pillar_size,
                ))
            })
            .collect();

        let wall_left = pillars[0].aabb.left();
        let wall_right = pillars[1].aabb.right();
        let rows = tuning.brick_rows;
        let cols = tuning.brick_cols;
        let brick_size = Vec2::new(
            (wall_right - wall_left) / cols as f32,
            tuning.brick_height,
        );
        let mut bricks = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            let y = pillar_top - (rows - row) as f32 * brick_size.y;
            for col in 0..cols {
                let x = wall_left + col as f32 * brick_size.x;
                let fires = row == 0 && rng.random_bool(tuning.fire_chance);
                bricks.push(Brick::new(
                    Aabb::from_top_left(Vec2::new(x, y), brick_size),
                    rows - row,
                    fires,
                ));
            }
        }

        // Protective pillars and the cages above them
        let barrier_size = Vec2::new(width * tuning.barrier_width_frac, tuning.barrier_height);
        let barrier_y = height * tuning.barrier_y_frac;
        let mut prisoners = Vec::new();
        for side in [Side::Left, Side::Right] {
            let left = match side {
                Side::Left => 0.0,
                Side::Right => width - barrier_size.x,
            };
            let barrier = Aabb::from_top_left(Vec2::new(left, barrier_y), barrier_size);

            let n = tuning.prisoners_per_side;
            for i in 0..n {
                let x = left + barrier_size.x * (i + 1) as f32 / (n + 1) as f32;
                let center = Vec2::new(x, barrier.top() - tuning.prisoner_size / 2.0);
                let mut prisoner = Prisoner::new(
                    Aabb::from_size(center, Vec2::splat(tuning.prisoner_size)),
                    side,
                    width,
                    barrier_size.x,
                    barrier.bottom(),
                );
                if i % 2 == 1 {
                    prisoner.dir = -prisoner.dir;
                }
                prisoners.push(prisoner);
            }
            pillars.push(Pillar::protective(barrier, side));
        }

        let projectile_size = Vec2::new(tuning.projectile_width, tuning.projectile_height);
        let projectiles: Vec<Projectile> = bricks
            .iter()
            .filter(|b| b.fires_projectile)
            .map(|b| Projectile::new(b.anchor(), projectile_size, tuning.projectile_speed))
            .collect();

        let n = tuning.drop_points;
        let drop_points = (0..n)
            .map(|i| {
                Vec2::new(
                    width * (i as f32 + 0.5) / n as f32,
                    -tuning.projectile_height,
                )
            })
            .collect();

        log::info!(
            "New session {}x{} seed {}: {} bricks, {} projectiles, {} prisoners",
            width,
            height,
            seed,
            bricks.len(),
            projectiles.len(),
            prisoners.len()
        );

        Ok(Self {
            width,
            height,
            seed,
            phase: GamePhase::Countdown,
            score: 0,
            frame: 0,
            countdown_remaining: tuning.countdown_frames,
            ball,
            mirror: MirrorBall::default(),
            paddle,
            cannon,
            pillars,
            growth: GrowthScheduler::new(GROWTH_STEP, bricks.len(), tuning.pillar_max_growths),
            bricks,
            initial_sources: projectiles.len(),
            projectiles,
            prisoners,
            events: Vec::new(),
            turret_delay: None,
            release_delay: None,
            rng,
            prev_input: TickInput::default(),
            drop_points,
            tuning,
        })
    }

    /// Gravity in pixels per frame squared
    pub fn gravity(&self) -> f32 {
        self.height * self.tuning.gravity_per_height
    }

    /// Paddle speed in pixels per frame
    pub fn move_speed(&self, dash: bool) -> f32 {
        let speed = self.width * self.tuning.move_speed_per_width;
        if dash {
            speed * self.tuning.dash_multiplier
        } else {
            speed
        }
    }

    /// Remove a brick and bank its points
    pub fn destroy_brick(&mut self, index: usize) -> u32 {
        let brick = self.bricks.remove(index);
        self.score += brick.points;
        self.events.push(GameEvent::BrickDestroyed {
            points: brick.points,
        });
        log::debug!(
            "Brick destroyed (+{}), {} remain, score {}",
            brick.points,
            self.bricks.len(),
            self.score
        );
        brick.points
    }

    /// Switch phase, logging the transition
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?} (frame {})", self.phase, phase, self.frame);
        self.phase = phase;
        match phase {
            GamePhase::Lose => self.events.push(GameEvent::GameLost),
            GamePhase::Win => self.events.push(GameEvent::GameWon),
            _ => {}
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn all_prisoners_released(&self) -> bool {
        self.prisoners.iter().all(|p| p.released)
    }

    pub fn structural_pillars(&self) -> impl Iterator<Item = &Pillar> {
        self.pillars.iter().filter(|p| p.is_structural())
    }

    pub fn protective_pillars(&self) -> impl Iterator<Item = &Pillar> {
        self.pillars.iter().filter(|p| !p.is_structural())
    }

    /// Points still standing in the wall
    pub fn remaining_points(&self) -> u32 {
        self.bricks.iter().map(|b| b.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(SessionConfig::new(1280.0, 720.0, 42)).expect("valid session")
    }

    #[test]
    fn test_rejects_bad_window() {
        for (w, h) in [(0.0, 720.0), (1280.0, -1.0), (f32::NAN, 720.0)] {
            let err = GameSession::new(SessionConfig::new(w, h, 1)).unwrap_err();
            assert!(matches!(err, SessionError::InvalidWindow { .. }));
        }
    }

    #[test]
    fn test_rejects_empty_layout() {
        let tuning = Tuning {
            brick_rows: 0,
            ..Default::default()
        };
        let err = GameSession::new(SessionConfig::new(1280.0, 720.0, 1).with_tuning(tuning))
            .unwrap_err();
        assert_eq!(err, SessionError::EmptyLayout { rows: 0, cols: 5 });
    }

    #[test]
    fn test_initial_layout() {
        let s = session();
        assert_eq!(s.phase, GamePhase::Countdown);
        assert_eq!(s.bricks.len(), 25);
        assert_eq!(s.structural_pillars().count(), 2);
        assert_eq!(s.protective_pillars().count(), 2);
        assert_eq!(s.prisoners.len(), 4);
        assert!(!s.ball.airborne);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_wall_sits_on_pillars() {
        let s = session();
        let pillar_top = s.structural_pillars().next().map(|p| p.aabb.top()).unwrap();
        let lowest = s
            .bricks
            .iter()
            .map(|b| b.aabb.bottom())
            .fold(f32::MIN, f32::max);
        assert!((lowest - pillar_top).abs() < 1e-3);
    }

    #[test]
    fn test_only_top_row_fires() {
        for seed in 0..20 {
            let s = GameSession::new(SessionConfig::new(1280.0, 720.0, seed)).unwrap();
            let top = s.bricks.iter().map(|b| b.aabb.top()).fold(f32::MAX, f32::min);
            for brick in s.bricks.iter().filter(|b| b.fires_projectile) {
                assert_eq!(brick.aabb.top(), top);
                assert_eq!(brick.points, 5);
            }
            assert_eq!(
                s.projectiles.len(),
                s.bricks.iter().filter(|b| b.fires_projectile).count()
            );
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = session();
        let b = session();
        let fa: Vec<bool> = a.bricks.iter().map(|b| b.fires_projectile).collect();
        let fb: Vec<bool> = b.bricks.iter().map(|b| b.fires_projectile).collect();
        assert_eq!(fa, fb);
    }

    #[test]
    fn test_destroy_brick_scores() {
        let mut s = session();
        let points = s.bricks[0].points;
        assert_eq!(s.destroy_brick(0), points);
        assert_eq!(s.score, points);
        assert_eq!(s.bricks.len(), 24);
        assert_eq!(s.drain_events(), vec![GameEvent::BrickDestroyed { points }]);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_paddle_clamped() {
        let mut paddle = Paddle::new(1000.0, 800.0, 150.0, 20.0);
        paddle.move_by(-5000.0, 1000.0);
        assert_eq!(paddle.pos.x, 75.0);
        paddle.move_by(5000.0, 1000.0);
        assert_eq!(paddle.pos.x, 925.0);
        paddle.grow(50.0, 1000.0);
        assert_eq!(paddle.width, 200.0);
        assert_eq!(paddle.pos.x, 900.0);
    }

    #[test]
    fn test_set_phase_emits_terminal_events() {
        let mut s = session();
        s.set_phase(GamePhase::Playing);
        assert!(s.events.is_empty());
        s.set_phase(GamePhase::Lose);
        assert_eq!(s.events, vec![GameEvent::GameLost]);
    }
}
