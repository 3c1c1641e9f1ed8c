//! Pillars
//!
//! Structural pillars hold up the brick wall and never move; they may grow
//! taller and, once the wall is gone, serve as turrets. Protective pillars
//! are the horizontal slabs caging the prisoners; they slide off-screen
//! after the last brick falls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;

/// Which side of the stage an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PillarKind {
    Structural,
    Protective { side: Side },
}

/// Frame-counted slide from `from_x` to `to_x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Retraction {
    pub from_x: f32,
    pub to_x: f32,
    pub elapsed: u32,
    pub duration: u32,
}

impl Retraction {
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            (self.elapsed as f32 / self.duration as f32).min(1.0)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pillar {
    pub kind: PillarKind,
    pub aabb: Aabb,
    /// Growth events applied (structural only)
    pub growths: u32,
    pub retraction: Option<Retraction>,
}

impl Pillar {
    pub fn structural(aabb: Aabb) -> Self {
        Self {
            kind: PillarKind::Structural,
            aabb,
            growths: 0,
            retraction: None,
        }
    }

    pub fn protective(aabb: Aabb, side: Side) -> Self {
        Self {
            kind: PillarKind::Protective { side },
            aabb,
            growths: 0,
            retraction: None,
        }
    }

    #[inline]
    pub fn is_structural(&self) -> bool {
        self.kind == PillarKind::Structural
    }

    /// Extend a structural pillar downward; its top edge (and the wall on
    /// it) stays put
    pub fn grow(&mut self, increment: f32) {
        if !self.is_structural() {
            return;
        }
        self.aabb.half.y += increment / 2.0;
        self.aabb.center.y += increment / 2.0;
        self.growths += 1;
    }

    /// Begin sliding a protective pillar off its side of the window
    pub fn start_retracting(&mut self, window_width: f32, duration: u32) {
        let PillarKind::Protective { side } = self.kind else {
            return;
        };
        if self.retraction.is_some() {
            return;
        }
        let to_x = match side {
            Side::Left => -self.aabb.half.x,
            Side::Right => window_width + self.aabb.half.x,
        };
        self.retraction = Some(Retraction {
            from_x: self.aabb.center.x,
            to_x,
            elapsed: 0,
            duration,
        });
        if duration == 0 {
            self.aabb.center.x = to_x;
        }
    }

    /// Advance one frame of retraction. Returns true on the frame it completes.
    pub fn advance_retraction(&mut self) -> bool {
        let Some(retraction) = self.retraction.as_mut() else {
            return false;
        };
        if retraction.elapsed >= retraction.duration {
            return false;
        }
        retraction.elapsed += 1;
        let t = retraction.progress();
        self.aabb.center.x = retraction.from_x + (retraction.to_x - retraction.from_x) * t;
        retraction.elapsed >= retraction.duration
    }

    /// 0 while in place, 1 once fully off-screen
    pub fn retraction_progress(&self) -> f32 {
        self.retraction.map_or(0.0, |r| r.progress())
    }

    pub fn is_retracted(&self) -> bool {
        self.retraction_progress() >= 1.0
    }

    /// Turret spawn point: the middle of the top edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.aabb.center.x, self.aabb.top())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barrier(side: Side) -> Pillar {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => 800.0,
        };
        Pillar::protective(
            Aabb::from_top_left(Vec2::new(x, 200.0), Vec2::new(200.0, 16.0)),
            side,
        )
    }

    #[test]
    fn test_structural_grows_down() {
        let mut pillar = Pillar::structural(Aabb::from_top_left(
            Vec2::new(100.0, 300.0),
            Vec2::new(40.0, 200.0),
        ));
        pillar.grow(20.0);
        assert_eq!(pillar.aabb.top(), 300.0);
        assert_eq!(pillar.aabb.bottom(), 520.0);
        assert_eq!(pillar.growths, 1);
    }

    #[test]
    fn test_protective_does_not_grow() {
        let mut pillar = barrier(Side::Left);
        let before = pillar.aabb;
        pillar.grow(20.0);
        assert_eq!(pillar.aabb, before);
        assert_eq!(pillar.growths, 0);
    }

    #[test]
    fn test_retraction_left() {
        let mut pillar = barrier(Side::Left);
        pillar.start_retracting(1000.0, 4);
        assert_eq!(pillar.retraction_progress(), 0.0);

        assert!(!pillar.advance_retraction());
        assert_eq!(pillar.aabb.center.x, 50.0);
        assert!(!pillar.advance_retraction());
        assert!(!pillar.advance_retraction());
        assert!(pillar.advance_retraction());
        assert!(pillar.is_retracted());
        assert_eq!(pillar.aabb.right(), 0.0);

        // Nothing further once finished
        assert!(!pillar.advance_retraction());
    }

    #[test]
    fn test_retraction_right() {
        let mut pillar = barrier(Side::Right);
        pillar.start_retracting(1000.0, 2);
        pillar.advance_retraction();
        pillar.advance_retraction();
        assert_eq!(pillar.aabb.left(), 1000.0);
    }

    #[test]
    fn test_instant_retraction_moves_slab() {
        let mut pillar = barrier(Side::Left);
        pillar.start_retracting(1000.0, 0);
        assert!(pillar.is_retracted());
        assert_eq!(pillar.aabb.right(), 0.0);
        assert!(!pillar.advance_retraction());
        assert_eq!(pillar.aabb.right(), 0.0);

        let mut pillar = barrier(Side::Right);
        pillar.start_retracting(1000.0, 0);
        assert_eq!(pillar.aabb.left(), 1000.0);
    }

    #[test]
    fn test_structural_never_retracts() {
        let mut pillar = Pillar::structural(Aabb::from_top_left(Vec2::ZERO, Vec2::ONE));
        pillar.start_retracting(1000.0, 2);
        assert!(pillar.retraction.is_none());
        assert!(!pillar.advance_retraction());
    }
}
