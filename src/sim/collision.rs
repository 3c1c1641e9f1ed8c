//! Collision detection
//!
//! Two primitive tests are shared by every entity pair: box vs box, and
//! ball vs box. Balls are approximated by their bounding box, so corner
//! hits register slightly earlier than a true circle test would. All
//! tests are inclusive: touching edges count as contact. There is no
//! swept test, so a fast ball may tunnel through thin geometry.

use glam::Vec2;

use super::geom::Aabb;

/// Where a ball touches a structural pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillarContact {
    /// No overlap
    None,
    /// Ball is below the pillar's top edge: it struck a side face
    Side,
    /// Ball straddles the pillar's top edge
    Top,
}

/// Box vs box overlap
#[inline]
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Ball vs box overlap, using the ball's bounding box
#[inline]
pub fn ball_box_overlap(ball_pos: Vec2, ball_radius: f32, b: &Aabb) -> bool {
    Aabb::around_circle(ball_pos, ball_radius).overlaps(b)
}

/// Classify how a ball box meets a structural pillar
pub fn pillar_contact(ball: &Aabb, pillar: &Aabb) -> PillarContact {
    if !ball.overlaps(pillar) {
        return PillarContact::None;
    }
    if ball.top() > pillar.top() {
        PillarContact::Side
    } else {
        PillarContact::Top
    }
}

/// Ball has reached the top edge of the window
#[inline]
pub fn touches_ceiling(ball_pos: Vec2, ball_radius: f32) -> bool {
    ball_pos.y - ball_radius <= 0.0
}

/// Ball center has left the playfield through the left, right or bottom edge
#[inline]
pub fn leaves_window(ball_pos: Vec2, width: f32, height: f32) -> bool {
    ball_pos.x < 0.0 || ball_pos.x > width || ball_pos.y > height
}
