//! Enemy projectiles
//!
//! Projectiles are never destroyed: once one falls out of the window it is
//! recycled at a new source. While bricks remain, a source is either a live
//! firing brick or one of the fixed drop points along the top edge. After
//! the wall is gone the structural pillars take over as turrets.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::boxes_overlap;
use super::geom::Aabb;
use super::state::Paddle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub aabb: Aabb,
    /// Downward speed in pixels per frame
    pub speed: f32,
    /// Falling; decided by a random draw each frame until it succeeds
    pub launched: bool,
    /// Waiting off-screen for a source to become available
    pub parked: bool,
}

impl Projectile {
    /// Create a projectile hanging from `anchor` (the middle of its top edge)
    pub fn new(anchor: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            aabb: Aabb::from_size(anchor + Vec2::new(0.0, size.y / 2.0), size),
            speed,
            launched: false,
            parked: false,
        }
    }

    /// Advance one frame
    pub fn step<R: Rng>(&mut self, rng: &mut R, launch_chance: f64) {
        if self.parked {
            return;
        }
        if !self.launched {
            self.launched = rng.random_bool(launch_chance);
        }
        if self.launched {
            self.aabb.center.y += self.speed;
        }
    }

    pub fn accelerate(&mut self, increment: f32) {
        self.speed += increment;
    }

    pub fn is_below(&self, window_height: f32) -> bool {
        self.aabb.top() > window_height
    }

    /// Recycle at `anchor`, or park when no source is available
    pub fn reset_pos(&mut self, anchor: Option<Vec2>) {
        self.launched = false;
        match anchor {
            Some(anchor) => {
                self.aabb.center = anchor + Vec2::new(0.0, self.aabb.half.y);
                self.parked = false;
            }
            None => self.parked = true,
        }
    }

    pub fn hits_paddle(&self, paddle: &Paddle) -> bool {
        !self.parked && boxes_overlap(&self.aabb, &paddle.aabb())
    }
}

/// Candidate spawn points for a recycled projectile
#[derive(Debug, Clone, Copy)]
pub struct RespawnSources<'a> {
    /// Anchors of firing bricks still standing
    pub live_sources: &'a [Vec2],
    /// Firing bricks at session start
    pub initial_sources: usize,
    pub bricks_remain: bool,
    pub drop_points: &'a [Vec2],
    /// Turret muzzles, once armed
    pub turrets: Option<&'a [Vec2]>,
}

/// Pick where a projectile reappears.
///
/// With bricks standing, a live source brick is chosen with probability
/// `live / initial`, otherwise a drop point. With no bricks, an armed
/// turret is chosen, or `None` to park.
pub fn pick_respawn<R: Rng>(rng: &mut R, sources: &RespawnSources<'_>) -> Option<Vec2> {
    if sources.bricks_remain {
        let weight = if sources.initial_sources == 0 {
            0.0
        } else {
            sources.live_sources.len() as f32 / sources.initial_sources as f32
        };
        if !sources.live_sources.is_empty() && rng.random::<f32>() < weight {
            return Some(sources.live_sources[rng.random_range(0..sources.live_sources.len())]);
        }
        if sources.drop_points.is_empty() {
            return None;
        }
        return Some(sources.drop_points[rng.random_range(0..sources.drop_points.len())]);
    }

    match sources.turrets {
        Some(turrets) if !turrets.is_empty() => {
            Some(turrets[rng.random_range(0..turrets.len())])
        }
        _ => None,
    }
}
