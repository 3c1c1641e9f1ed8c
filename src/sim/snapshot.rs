//! Render-ready scene description
//!
//! The simulation draws nothing. Each frame the host captures a `Scene`
//! and renders it however it likes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::pillar::PillarKind;
use super::state::{GamePhase, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxView {
    pub pos: Vec2,
    pub size: Vec2,
}

impl From<&Aabb> for BoxView {
    fn from(aabb: &Aabb) -> Self {
        Self {
            pos: aabb.center,
            size: aabb.size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CannonView {
    pub pos: Vec2,
    pub angle: f32,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarView {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PillarKind,
    /// 0 in place, 1 fully retracted
    pub retraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrisonerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub released: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u32,
    /// Frames left before play starts
    pub countdown: u32,
    pub ball: BallView,
    pub mirror: Option<BallView>,
    pub paddle: BoxView,
    pub cannon: CannonView,
    pub pillars: Vec<PillarView>,
    pub bricks: Vec<BoxView>,
    pub projectiles: Vec<BoxView>,
    pub prisoners: Vec<PrisonerView>,
    /// Sampled flight path; empty unless the ball is airborne
    pub trail: Vec<Vec2>,
}

impl Scene {
    pub fn capture(session: &GameSession) -> Self {
        let ball = &session.ball;
        Self {
            width: session.width,
            height: session.height,
            phase: session.phase,
            score: session.score,
            countdown: session.countdown_remaining,
            ball: BallView {
                pos: ball.pos(),
                radius: ball.radius(),
            },
            mirror: session.mirror.active.then(|| BallView {
                pos: session.mirror.body.pos,
                radius: session.mirror.body.radius,
            }),
            paddle: BoxView::from(&session.paddle.aabb()),
            cannon: CannonView {
                pos: session.cannon.pos,
                angle: session.cannon.angle,
                size: session.cannon.size,
            },
            pillars: session
                .pillars
                .iter()
                .map(|p| PillarView {
                    pos: p.aabb.center,
                    size: p.aabb.size(),
                    kind: p.kind,
                    retraction: p.retraction_progress(),
                })
                .collect(),
            bricks: session.bricks.iter().map(|b| BoxView::from(&b.aabb)).collect(),
            projectiles: session
                .projectiles
                .iter()
                .filter(|p| !p.parked)
                .map(|p| BoxView::from(&p.aabb))
                .collect(),
            prisoners: session
                .prisoners
                .iter()
                .map(|p| PrisonerView {
                    pos: p.aabb.center,
                    size: p.aabb.size(),
                    released: p.released,
                })
                .collect(),
            trail: if ball.airborne {
                ball.body.trail.clone()
            } else {
                Vec::new()
            },
        }
    }
}
