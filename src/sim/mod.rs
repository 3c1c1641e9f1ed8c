//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod ball;
pub mod cannon;
pub mod collision;
pub mod geom;
pub mod growth;
pub mod pillar;
pub mod prisoner;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use ball::{Ball, BallBody, MirrorBall};
pub use cannon::Cannon;
pub use collision::{PillarContact, ball_box_overlap, boxes_overlap};
pub use geom::Aabb;
pub use growth::{GrowthEvents, GrowthScheduler, ThresholdTrigger};
pub use pillar::{Pillar, PillarKind, Side};
pub use prisoner::Prisoner;
pub use projectile::Projectile;
pub use snapshot::Scene;
pub use state::{Brick, GameEvent, GamePhase, GameSession, Paddle, SessionConfig};
pub use tick::{InputEdges, TickInput, tick};
