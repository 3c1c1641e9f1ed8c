//! Ball kinematics
//!
//! `BallBody` is the shared capability of anything the cannon launches:
//! position, velocity, accumulated force, radius, trail and bounce rules.
//! `Ball` is the primary, physics-driven shot. `MirrorBall` is the
//! optional duplicate that copies the primary's size but flies its own
//! trajectory.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{PillarContact, ball_box_overlap, leaves_window, pillar_contact, touches_ceiling};
use super::geom::Aabb;
use super::pillar::Pillar;
use super::state::{Brick, Paddle};
use crate::clamp_length;
use crate::consts::{CANNON_LENGTH, TRAIL_MAX_POINTS, TRAIL_SAMPLE_FRAMES};

/// Shared ball state and behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallBody {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Force accumulated since the last integration step
    pub acc: Vec2,
    pub radius: f32,
    /// Sampled positions while airborne (oldest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
    /// Consecutive frames spent straddling a structural pillar's top edge
    pub y_bounce_streak: u32,
    trail_ticks: u32,
}

impl BallBody {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            radius,
            trail: Vec::new(),
            y_bounce_streak: 0,
            trail_ticks: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Accumulate a force; forces superpose until the next `integrate`
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// One Euler step: velocity, speed cap, position, then clear forces
    pub fn integrate(&mut self, top_speed: f32) {
        self.vel += self.acc;
        self.vel = clamp_length(self.vel, top_speed);
        self.pos += self.vel;
        self.acc = Vec2::ZERO;

        self.trail_ticks += 1;
        if self.trail_ticks % TRAIL_SAMPLE_FRAMES == 0 {
            self.trail.push(self.pos);
            if self.trail.len() > TRAIL_MAX_POINTS {
                self.trail.remove(0);
            }
        }
    }

    /// Kill all motion and forget the trail
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.acc = Vec2::ZERO;
        self.y_bounce_streak = 0;
        self.trail.clear();
        self.trail_ticks = 0;
    }

    /// Bounce off the window ceiling. Only an upward-moving ball reverses.
    pub fn bounce_edge(&mut self) -> bool {
        if touches_ceiling(self.pos, self.radius) && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
            return true;
        }
        false
    }

    /// Resolve contact with every pillar. Returns true if any axis reversed.
    ///
    /// Protective pillars only block a ball rising into them from below.
    /// Structural pillars reverse X on a side hit and Y on a top hit. A
    /// second consecutive top contact while the ball hangs past a side edge
    /// means it is caught on a corner: both axes reverse and the streak
    /// drops back to one. An axis is only
    /// reversed while the ball moves into the pillar on that axis, so a
    /// lingering overlap never flips the ball back inside.
    pub fn bounce_pillars(&mut self, pillars: &[Pillar]) -> bool {
        let ball = self.aabb();
        let mut bounced = false;
        let mut on_top = false;

        for pillar in pillars {
            if pillar.is_structural() {
                let toward_center = (pillar.aabb.center.x - ball.center.x) * self.vel.x > 0.0;
                match pillar_contact(&ball, &pillar.aabb) {
                    PillarContact::None => {}
                    PillarContact::Side => {
                        if toward_center {
                            self.vel.x = -self.vel.x;
                            bounced = true;
                        }
                    }
                    PillarContact::Top => {
                        on_top = true;
                        self.y_bounce_streak += 1;
                        let past_side = ball.left() < pillar.aabb.left()
                            || ball.right() > pillar.aabb.right();
                        if self.y_bounce_streak >= 2 && past_side {
                            if toward_center {
                                self.vel.x = -self.vel.x;
                                bounced = true;
                            }
                            if self.vel.y > 0.0 {
                                self.vel.y = -self.vel.y;
                                bounced = true;
                            }
                            self.y_bounce_streak = 1;
                        } else if self.vel.y > 0.0 {
                            self.vel.y = -self.vel.y;
                            bounced = true;
                        }
                    }
                }
            } else if self.vel.y < 0.0 && ball.overlaps(&pillar.aabb) {
                self.vel.y = -self.vel.y;
                bounced = true;
            }
        }

        if !on_top {
            self.y_bounce_streak = 0;
        }
        bounced
    }

    pub fn overlaps_paddle(&self, paddle: &Paddle) -> bool {
        ball_box_overlap(self.pos, self.radius, &paddle.aabb())
    }

    /// Index of the first brick the ball touches
    pub fn hit_brick(&self, bricks: &[Brick]) -> Option<usize> {
        bricks
            .iter()
            .position(|brick| ball_box_overlap(self.pos, self.radius, &brick.aabb))
    }
}

/// The primary ball fired by the cannon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: BallBody,
    pub top_speed: f32,
    /// Growth events applied so far
    pub growth_count: u32,
    /// Fired and not yet back on the cannon
    pub airborne: bool,
}

impl Ball {
    /// Create a grounded ball resting above the paddle
    pub fn new(paddle: &Paddle, radius: f32, top_speed: f32) -> Self {
        let mut ball = Self {
            body: BallBody::new(Vec2::ZERO, radius),
            top_speed,
            growth_count: 0,
            airborne: false,
        };
        ball.ground(paddle);
        ball
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    /// Where the grounded ball sits: on the cannon muzzle above the paddle
    pub fn resting_spot(&self, paddle: &Paddle) -> Vec2 {
        Vec2::new(
            paddle.pos.x,
            paddle.top() - CANNON_LENGTH - self.body.radius,
        )
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.body.apply_force(force);
    }

    pub fn update(&mut self) {
        self.body.integrate(self.top_speed);
    }

    /// Carry the grounded ball along with held movement input
    pub fn update_resting_position(&mut self, paddle: &Paddle, drift: f32, window_width: f32) {
        if self.airborne {
            return;
        }
        let (min_x, max_x) = Paddle::center_span(paddle.width, window_width);
        self.body.pos.x = (self.body.pos.x + drift).clamp(min_x, max_x);
        self.body.pos.y = self.resting_spot(paddle).y;
        self.body.trail.clear();
    }

    /// Ground the ball if it left through the left, right or bottom edge
    pub fn check_out_of_bounds(&mut self, paddle: &Paddle, width: f32, height: f32) -> bool {
        if self.airborne && leaves_window(self.body.pos, width, height) {
            self.ground(paddle);
            return true;
        }
        false
    }

    /// Return to the resting spot with no motion
    pub fn ground(&mut self, paddle: &Paddle) {
        self.airborne = false;
        self.body.stop();
        self.body.pos = self.resting_spot(paddle);
    }

    pub fn grow(&mut self, increment: f32) {
        self.body.radius += increment;
        self.growth_count += 1;
    }

    /// An airborne ball touching the paddle is a missed catch
    pub fn collide_paddle(&self, paddle: &Paddle) -> bool {
        self.airborne && self.body.overlaps_paddle(paddle)
    }

    pub fn bounce_pillar(&mut self, pillars: &[Pillar]) -> bool {
        self.airborne && self.body.bounce_pillars(pillars)
    }

    pub fn bounce_edge(&mut self) -> bool {
        self.airborne && self.body.bounce_edge()
    }
}

/// Duplicate ball: same size as the primary, independent flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorBall {
    pub body: BallBody,
    pub active: bool,
}

impl Default for MirrorBall {
    fn default() -> Self {
        Self {
            body: BallBody::new(Vec2::ZERO, 0.0),
            active: false,
        }
    }
}

impl MirrorBall {
    /// The duplicate is only available mid-flight, before the first growth
    pub fn can_spawn(&self, primary: &Ball) -> bool {
        !self.active && primary.airborne && primary.growth_count < 1
    }

    /// Split off beside the primary, heading the mirrored horizontal way
    pub fn spawn(&mut self, primary: &Ball, window_width: f32) {
        let offset = primary.radius() * 4.0;
        let offset = if primary.pos().x > window_width / 2.0 {
            -offset
        } else {
            offset
        };
        self.body = BallBody::new(primary.pos() + Vec2::new(offset, 0.0), primary.radius());
        self.body.vel = Vec2::new(-primary.body.vel.x, primary.body.vel.y);
        self.active = true;
    }

    pub fn sync_size(&mut self, primary: &Ball) {
        self.body.radius = primary.radius();
    }

    pub fn update(&mut self, gravity: f32, top_speed: f32) {
        if !self.active {
            return;
        }
        self.body.apply_force(Vec2::new(0.0, gravity));
        self.body.integrate(top_speed);
    }

    /// Stop updating and forget the trail
    pub fn retire(&mut self) {
        self.active = false;
        self.body.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pillar::Side;

    const W: f32 = 1200.0;
    const H: f32 = 800.0;

    fn paddle() -> Paddle {
        Paddle::new(W, H, 150.0, 20.0)
    }

    fn structural(top_left: Vec2, size: Vec2) -> Pillar {
        Pillar::structural(Aabb::from_top_left(top_left, size))
    }

    #[test]
    fn test_forces_superpose() {
        let mut body = BallBody::new(Vec2::ZERO, 10.0);
        body.apply_force(Vec2::new(1.0, 0.0));
        body.apply_force(Vec2::new(0.0, 2.0));
        assert_eq!(body.acc, Vec2::new(1.0, 2.0));

        body.integrate(100.0);
        assert_eq!(body.vel, Vec2::new(1.0, 2.0));
        assert_eq!(body.pos, Vec2::new(1.0, 2.0));
        assert_eq!(body.acc, Vec2::ZERO);
    }

    #[test]
    fn test_velocity_capped() {
        let mut body = BallBody::new(Vec2::ZERO, 10.0);
        body.apply_force(Vec2::new(30.0, 40.0));
        body.integrate(5.0);
        assert!((body.vel.length() - 5.0).abs() < 1e-4);
        assert!((body.pos - Vec2::new(3.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn test_trail_every_fifth_frame() {
        let mut body = BallBody::new(Vec2::ZERO, 10.0);
        body.vel = Vec2::new(1.0, 0.0);
        for _ in 0..4 {
            body.integrate(10.0);
        }
        assert!(body.trail.is_empty());
        body.integrate(10.0);
        assert_eq!(body.trail, vec![Vec2::new(5.0, 0.0)]);
        for _ in 0..5 {
            body.integrate(10.0);
        }
        assert_eq!(body.trail.len(), 2);
    }

    #[test]
    fn test_trail_is_capped() {
        let mut body = BallBody::new(Vec2::ZERO, 10.0);
        for _ in 0..(TRAIL_SAMPLE_FRAMES as usize * (TRAIL_MAX_POINTS + 10)) {
            body.integrate(10.0);
        }
        assert_eq!(body.trail.len(), TRAIL_MAX_POINTS);
    }

    #[test]
    fn test_new_ball_rests_above_paddle() {
        let paddle = paddle();
        let ball = Ball::new(&paddle, 15.0, 12.0);
        assert!(!ball.airborne);
        assert_eq!(ball.pos().x, paddle.pos.x);
        assert!(ball.pos().y + ball.radius() < paddle.top());
        assert!(!ball.body.overlaps_paddle(&paddle));
    }

    #[test]
    fn test_resting_position_clamped() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        ball.body.trail.push(Vec2::ONE);
        for _ in 0..1000 {
            ball.update_resting_position(&paddle, -8.0, W);
        }
        assert_eq!(ball.pos().x, 75.0);
        assert!(ball.body.trail.is_empty());

        for _ in 0..1000 {
            ball.update_resting_position(&paddle, 8.0, W);
        }
        assert_eq!(ball.pos().x, W - 75.0);
    }

    #[test]
    fn test_resting_update_ignored_while_airborne() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        ball.airborne = true;
        let before = ball.pos();
        ball.update_resting_position(&paddle, 8.0, W);
        assert_eq!(ball.pos(), before);
    }

    #[test]
    fn test_out_of_bounds_grounds_ball() {
        let paddle = paddle();
        for exit in [Vec2::new(-1.0, 300.0), Vec2::new(W + 1.0, 300.0), Vec2::new(300.0, H + 1.0)] {
            let mut ball = Ball::new(&paddle, 15.0, 12.0);
            ball.airborne = true;
            ball.body.pos = exit;
            ball.body.vel = Vec2::new(3.0, 3.0);
            ball.body.acc = Vec2::new(0.0, 1.0);
            ball.body.y_bounce_streak = 1;

            assert!(ball.check_out_of_bounds(&paddle, W, H));
            assert!(!ball.airborne);
            assert_eq!(ball.body.vel, Vec2::ZERO);
            assert_eq!(ball.body.acc, Vec2::ZERO);
            assert_eq!(ball.body.y_bounce_streak, 0);
            assert_eq!(ball.pos(), ball.resting_spot(&paddle));
        }
    }

    #[test]
    fn test_ceiling_bounce() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        ball.airborne = true;
        ball.body.pos = Vec2::new(300.0, 10.0);
        ball.body.vel = Vec2::new(2.0, -5.0);
        assert!(ball.bounce_edge());
        assert_eq!(ball.body.vel, Vec2::new(2.0, 5.0));
        // Already heading down: no second flip
        assert!(!ball.bounce_edge());
        assert_eq!(ball.body.vel, Vec2::new(2.0, 5.0));
    }

    #[test]
    fn test_collide_paddle_requires_airborne() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        ball.body.pos = paddle.pos;
        assert!(!ball.collide_paddle(&paddle));
        ball.airborne = true;
        assert!(ball.collide_paddle(&paddle));
    }

    #[test]
    fn test_structural_side_hit_reverses_x() {
        let pillars = [structural(Vec2::new(100.0, 300.0), Vec2::new(40.0, 200.0))];
        let mut body = BallBody::new(Vec2::new(92.0, 400.0), 10.0);
        body.vel = Vec2::new(4.0, 1.0);
        assert!(body.bounce_pillars(&pillars));
        assert_eq!(body.vel, Vec2::new(-4.0, 1.0));
        assert_eq!(body.y_bounce_streak, 0);
    }

    #[test]
    fn test_structural_top_hit_reverses_y() {
        let pillars = [structural(Vec2::new(100.0, 300.0), Vec2::new(40.0, 200.0))];
        let mut body = BallBody::new(Vec2::new(120.0, 295.0), 10.0);
        body.vel = Vec2::new(0.0, 4.0);
        assert!(body.bounce_pillars(&pillars));
        assert_eq!(body.vel, Vec2::new(0.0, -4.0));
        assert_eq!(body.y_bounce_streak, 1);
    }

    #[test]
    fn test_corner_streak_reverses_both_axes() {
        let pillars = [structural(Vec2::new(100.0, 300.0), Vec2::new(40.0, 200.0))];
        // Straddling the top edge near the left corner, moving down-right
        let mut body = BallBody::new(Vec2::new(95.0, 298.0), 10.0);
        body.vel = Vec2::new(3.0, 4.0);

        assert!(body.bounce_pillars(&pillars));
        assert_eq!(body.vel, Vec2::new(3.0, -4.0));
        assert_eq!(body.y_bounce_streak, 1);

        // Still in contact on the next check: corner case
        body.vel = Vec2::new(3.0, 4.0);
        assert!(body.bounce_pillars(&pillars));
        assert_eq!(body.vel, Vec2::new(-3.0, -4.0));
        assert_eq!(body.y_bounce_streak, 1);
    }

    #[test]
    fn test_flat_top_contact_keeps_x() {
        let pillars = [structural(Vec2::new(100.0, 300.0), Vec2::new(40.0, 200.0))];
        // Fully within the top face, away from both corners
        let mut body = BallBody::new(Vec2::new(120.0, 298.0), 10.0);
        body.vel = Vec2::new(3.0, 4.0);
        assert!(body.bounce_pillars(&pillars));

        body.vel = Vec2::new(3.0, 4.0);
        assert!(body.bounce_pillars(&pillars));
        assert_eq!(body.vel, Vec2::new(3.0, -4.0));
        assert_eq!(body.y_bounce_streak, 2);
    }

    #[test]
    fn test_streak_clears_after_contact() {
        let pillars = [structural(Vec2::new(100.0, 300.0), Vec2::new(40.0, 200.0))];
        let mut body = BallBody::new(Vec2::new(120.0, 295.0), 10.0);
        body.vel = Vec2::new(0.0, 4.0);
        body.bounce_pillars(&pillars);
        assert_eq!(body.y_bounce_streak, 1);

        body.pos = Vec2::new(120.0, 200.0);
        assert!(!body.bounce_pillars(&pillars));
        assert_eq!(body.y_bounce_streak, 0);
    }

    #[test]
    fn test_protective_blocks_from_below_only() {
        let barrier = Pillar::protective(
            Aabb::from_top_left(Vec2::new(0.0, 200.0), Vec2::new(200.0, 16.0)),
            Side::Left,
        );
        let pillars = [barrier];

        let mut rising = BallBody::new(Vec2::new(100.0, 220.0), 10.0);
        rising.vel = Vec2::new(1.0, -5.0);
        assert!(rising.bounce_pillars(&pillars));
        assert_eq!(rising.vel, Vec2::new(1.0, 5.0));

        let mut falling = BallBody::new(Vec2::new(100.0, 195.0), 10.0);
        falling.vel = Vec2::new(1.0, 5.0);
        assert!(!falling.bounce_pillars(&pillars));
        assert_eq!(falling.vel, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_grow() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        ball.grow(3.0);
        assert_eq!(ball.radius(), 18.0);
        assert_eq!(ball.growth_count, 1);
    }

    #[test]
    fn test_mirror_spawn_gating() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        let mut mirror = MirrorBall::default();
        assert!(!mirror.can_spawn(&ball));

        ball.airborne = true;
        assert!(mirror.can_spawn(&ball));

        ball.growth_count = 1;
        assert!(!mirror.can_spawn(&ball));
    }

    #[test]
    fn test_mirror_spawn_and_retire() {
        let paddle = paddle();
        let mut ball = Ball::new(&paddle, 15.0, 12.0);
        ball.airborne = true;
        ball.body.pos = Vec2::new(300.0, 400.0);
        ball.body.vel = Vec2::new(4.0, -6.0);

        let mut mirror = MirrorBall::default();
        mirror.spawn(&ball, W);
        assert!(mirror.active);
        assert_eq!(mirror.body.pos, Vec2::new(360.0, 400.0));
        assert_eq!(mirror.body.vel, Vec2::new(-4.0, -6.0));
        assert_eq!(mirror.body.radius, 15.0);
        assert!(!mirror.can_spawn(&ball));

        ball.grow(3.0);
        mirror.sync_size(&ball);
        assert_eq!(mirror.body.radius, 18.0);

        mirror.update(0.0, 12.0);
        assert_eq!(mirror.body.pos, Vec2::new(356.0, 394.0));

        mirror.retire();
        assert!(!mirror.active);
        assert!(mirror.body.trail.is_empty());
        let parked = mirror.body.pos;
        mirror.update(1.0, 12.0);
        assert_eq!(mirror.body.pos, parked);
    }

    #[test]
    fn test_hit_brick() {
        let bricks = vec![
            Brick::new(Aabb::from_top_left(Vec2::new(0.0, 0.0), Vec2::new(50.0, 20.0)), 1, false),
            Brick::new(Aabb::from_top_left(Vec2::new(50.0, 0.0), Vec2::new(50.0, 20.0)), 1, false),
        ];
        let body = BallBody::new(Vec2::new(75.0, 25.0), 5.0);
        assert_eq!(body.hit_brick(&bricks), Some(1));
        let miss = BallBody::new(Vec2::new(75.0, 40.0), 5.0);
        assert_eq!(miss.hit_brick(&bricks), None);
    }
}
