//! Attract-mode player
//!
//! Produces a plausible input frame from the current session: aim at the
//! nearest brick, fire once lined up, split the shot when possible, and
//! sidestep anything falling toward the paddle.

use glam::Vec2;

use super::state::{GamePhase, GameSession, Paddle};
use super::tick::TickInput;

/// Horizontal distance within which a falling threat is dodged
const DODGE_MARGIN: f32 = 40.0;

pub fn autopilot_input(session: &GameSession) -> TickInput {
    let mut input = TickInput::default();
    match session.phase {
        GamePhase::Playing => {}
        GamePhase::Paused | GamePhase::Tutorial => {
            input.resume = true;
            return input;
        }
        _ => return input,
    }

    let prev = &session.prev_input;
    let paddle = &session.paddle;
    let cannon = &session.cannon;
    let muzzle = cannon.pos;

    // Dodge: projectiles and the falling ball both end the game on contact
    let reach = paddle.width / 2.0 + DODGE_MARGIN;
    let mut threats: Vec<Vec2> = session
        .projectiles
        .iter()
        .filter(|p| p.launched && !p.parked && p.aabb.bottom() < paddle.top())
        .map(|p| p.aabb.center)
        .collect();
    if session.ball.airborne && session.ball.body.vel.y > 0.0 {
        threats.push(session.ball.pos());
    }
    if let Some(threat) = threats
        .iter()
        .filter(|t| (t.x - paddle.pos.x).abs() < reach)
        .max_by(|a, b| a.y.total_cmp(&b.y))
    {
        let go_left = threat.x >= paddle.pos.x;
        let (min_x, max_x) = Paddle::center_span(paddle.width, session.width);
        // Pinned against a wall: run the other way
        let go_left = if go_left && paddle.pos.x <= min_x {
            false
        } else if !go_left && paddle.pos.x >= max_x {
            true
        } else {
            go_left
        };
        input.move_left = go_left;
        input.move_right = !go_left;
        input.dash = true;
    }

    // Aim at the nearest brick, or keep centered once the wall is gone
    let desired = session
        .bricks
        .iter()
        .map(|b| b.aabb.center - muzzle)
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .map(|d| d.y.atan2(d.x));
    let (min_angle, max_angle) = cannon.arc();
    let desired = desired
        .unwrap_or((min_angle + max_angle) / 2.0)
        .clamp(min_angle, max_angle);
    let diff = desired - cannon.angle;
    let step = cannon.step();
    if diff > step / 2.0 {
        input.rotate_right = true;
    } else if diff < -step / 2.0 {
        input.rotate_left = true;
    }

    // Pulse the trigger so every press is a fresh edge
    let lined_up = diff.abs() <= step;
    input.fire = lined_up && cannon.is_loaded(&session.ball) && !prev.fire;

    input.duplicate = session.mirror.can_spawn(&session.ball) && !prev.duplicate;

    input
}
