//! Axis-aligned box geometry
//!
//! Every solid in the game (paddle, pillars, bricks, projectiles, prisoners)
//! is a box defined by its center and half extents. Screen space: origin
//! top-left, Y grows downward, so `top()` is the smaller Y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Build from center and full size
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size * 0.5)
    }

    /// Build from the top-left corner and full size
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self::from_size(top_left + size * 0.5, size)
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center, Vec2::splat(radius))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Horizontal spans overlap (edges touching count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    /// Vertical spans overlap (edges touching count)
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.bottom() >= other.top() && self.top() <= other.bottom()
    }

    /// Boxes overlap (edges touching count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}
