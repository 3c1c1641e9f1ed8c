//! Castle Breaker - a cannon-launched breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Event-to-sound mapping for the host's audio backend
//! - `clock`: Fixed-step pacing for real-time hosts

pub mod audio;
pub mod clock;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::SessionError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Trail sampling period in airborne frames
    pub const TRAIL_SAMPLE_FRAMES: u32 = 5;
    /// Hard cap on recorded trail points
    pub const TRAIL_MAX_POINTS: usize = 120;

    /// Bricks per growth threshold
    pub const GROWTH_STEP: usize = 5;

    /// Cannon barrel size (width, length)
    pub const CANNON_WIDTH: f32 = 18.0;
    pub const CANNON_LENGTH: f32 = 40.0;

    /// Gap between the paddle's bottom edge and the window floor
    pub const PADDLE_FLOOR_GAP: f32 = 10.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Limit a vector's magnitude to `max`, keeping its direction
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    v.clamp_length_max(max.max(0.0))
}
