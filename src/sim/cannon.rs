//! The paddle-mounted cannon
//!
//! Loaded while the ball rests on it; fired on a trigger edge. The trigger
//! stays consumed for the whole flight and re-arms only once the ball is
//! grounded again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::state::Paddle;
use crate::consts::{CANNON_LENGTH, CANNON_WIDTH};
use crate::polar_to_cartesian;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    /// Aim in radians; -PI/2 is straight up
    pub angle: f32,
    /// Center of the barrel
    pub pos: Vec2,
    pub size: Vec2,
    pub trigger_consumed: bool,
    min_angle: f32,
    max_angle: f32,
    step: f32,
}

impl Cannon {
    /// Mount on the paddle, aimed at the middle of the arc
    pub fn new(paddle: &Paddle, min_angle: f32, max_angle: f32, step: f32) -> Self {
        let mut cannon = Self {
            angle: (min_angle + max_angle) / 2.0,
            pos: Vec2::ZERO,
            size: Vec2::new(CANNON_WIDTH, CANNON_LENGTH),
            trigger_consumed: false,
            min_angle,
            max_angle,
            step,
        };
        cannon.follow(paddle);
        cannon
    }

    /// Sit on top of the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.pos.x, paddle.top() - self.size.y / 2.0);
    }

    /// Turn by `direction` steps (-1 left, 1 right), clamped to the arc
    pub fn rotate(&mut self, direction: f32) {
        self.set_angle(self.angle + direction * self.step);
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.clamp(self.min_angle, self.max_angle);
    }

    pub fn arc(&self) -> (f32, f32) {
        (self.min_angle, self.max_angle)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Loaded: trigger available and ball at rest
    pub fn is_loaded(&self, ball: &Ball) -> bool {
        !self.trigger_consumed && !ball.airborne
    }

    /// Launch the ball along the barrel at top speed. Returns true if fired.
    pub fn fire(&mut self, ball: &mut Ball) -> bool {
        if !self.is_loaded(ball) {
            return false;
        }
        ball.airborne = true;
        self.trigger_consumed = true;
        ball.apply_force(polar_to_cartesian(ball.top_speed, self.angle));
        true
    }

    /// Per-frame flight: gravity plus integration while airborne, re-arm
    /// once grounded
    pub fn advance(&mut self, ball: &mut Ball, gravity: f32) {
        if ball.airborne {
            ball.apply_force(Vec2::new(0.0, gravity));
            ball.update();
        } else {
            self.trigger_consumed = false;
        }
    }
}
