//! Per-frame simulation step
//!
//! One call advances the session by one frame in a fixed order:
//! paddle, cannon, ball, collisions, projectiles, pillars, prisoners,
//! growth, then the win check.

use glam::Vec2;

use super::collision::leaves_window;
use super::projectile::{RespawnSources, pick_respawn};
use super::state::{GameEvent, GamePhase, GameSession};

/// Held state of every input for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Speed modifier for movement
    pub dash: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
    pub duplicate: bool,
    pub pause: bool,
    pub tutorial: bool,
    pub resume: bool,
    /// One-shot pointer activation at a window position
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// -1, 0 or 1
    pub fn horizontal(&self) -> f32 {
        self.move_right as i32 as f32 - self.move_left as i32 as f32
    }

    /// -1, 0 or 1
    pub fn rotation(&self) -> f32 {
        self.rotate_right as i32 as f32 - self.rotate_left as i32 as f32
    }
}

/// Inputs that act only on the frame they go down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    pub fire: bool,
    pub duplicate: bool,
    pub pause: bool,
    pub tutorial: bool,
}

impl InputEdges {
    pub fn detect(prev: &TickInput, now: &TickInput) -> Self {
        Self {
            fire: now.fire && !prev.fire,
            duplicate: now.duplicate && !prev.duplicate,
            pause: now.pause && !prev.pause,
            tutorial: now.tutorial && !prev.tutorial,
        }
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    let edges = InputEdges::detect(&session.prev_input, input);
    session.prev_input = input.clone();
    session.frame += 1;

    match session.phase {
        GamePhase::Countdown => {
            session.countdown_remaining = session.countdown_remaining.saturating_sub(1);
            if session.countdown_remaining == 0 {
                session.set_phase(GamePhase::Playing);
            }
            return;
        }
        GamePhase::Paused | GamePhase::Tutorial => {
            let clicked = input.pointer.is_some_and(|p| {
                p.x >= 0.0 && p.x <= session.width && p.y >= 0.0 && p.y <= session.height
            });
            if input.resume || clicked {
                session.set_phase(GamePhase::Playing);
            }
            return;
        }
        GamePhase::Lose | GamePhase::Win => return,
        GamePhase::Playing => {
            if edges.pause {
                session.set_phase(GamePhase::Paused);
                return;
            }
            if edges.tutorial {
                session.set_phase(GamePhase::Tutorial);
                return;
            }
        }
    }

    // Paddle and cannon
    let drift = input.horizontal() * session.move_speed(input.dash);
    session.paddle.move_by(drift, session.width);
    session.cannon.follow(&session.paddle);
    session.cannon.rotate(input.rotation());

    if edges.fire && session.cannon.fire(&mut session.ball) {
        session.events.push(GameEvent::ShotFired);
        log::debug!("Shot fired at {:.2} rad", session.cannon.angle);
    }
    if edges.duplicate && session.mirror.can_spawn(&session.ball) {
        session.mirror.spawn(&session.ball, session.width);
        log::debug!("Duplicate ball spawned");
    }

    // Ball physics
    let gravity = session.gravity();
    session.cannon.advance(&mut session.ball, gravity);
    session
        .ball
        .update_resting_position(&session.paddle, drift, session.width);
    session.mirror.sync_size(&session.ball);
    session.mirror.update(gravity, session.ball.top_speed);

    resolve_ball(session);
    if session.phase != GamePhase::Playing {
        return;
    }
    resolve_mirror(session);
    if session.phase != GamePhase::Playing {
        return;
    }

    update_projectiles(session);
    if session.phase != GamePhase::Playing {
        return;
    }

    update_pillars(session);
    update_prisoners(session);
    update_growth(session);

    let cages_open = session.release_delay == Some(0);
    if session.bricks.is_empty() && cages_open && session.all_prisoners_released() {
        session.set_phase(GamePhase::Win);
    }
}

/// Bounces, paddle contact, brick hits and exits for the primary ball
fn resolve_ball(session: &mut GameSession) {
    if !session.ball.airborne {
        return;
    }

    let edge = session.ball.bounce_edge();
    let pillar = session.ball.bounce_pillar(&session.pillars);
    if edge || pillar {
        session.events.push(GameEvent::BallBounce);
    }

    if session.ball.collide_paddle(&session.paddle) {
        log::info!("Ball struck the paddle");
        session.set_phase(GamePhase::Lose);
        return;
    }

    if let Some(index) = session.ball.body.hit_brick(&session.bricks) {
        session.destroy_brick(index);
        session.ball.ground(&session.paddle);
        session.mirror.retire();
        return;
    }

    if session
        .ball
        .check_out_of_bounds(&session.paddle, session.width, session.height)
    {
        session.mirror.retire();
    }
}

/// Same rules for the duplicate ball; it retires instead of grounding
fn resolve_mirror(session: &mut GameSession) {
    if !session.mirror.active {
        return;
    }
    let body = &mut session.mirror.body;

    let edge = body.bounce_edge();
    let pillar = body.bounce_pillars(&session.pillars);
    if edge || pillar {
        session.events.push(GameEvent::BallBounce);
    }

    if body.overlaps_paddle(&session.paddle) {
        log::info!("Duplicate ball struck the paddle");
        session.set_phase(GamePhase::Lose);
        return;
    }

    if let Some(index) = body.hit_brick(&session.bricks) {
        session.destroy_brick(index);
        session.mirror.retire();
        return;
    }

    if leaves_window(body.pos, session.width, session.height) {
        session.mirror.retire();
    }
}

fn update_projectiles(session: &mut GameSession) {
    let live_sources: Vec<Vec2> = session
        .bricks
        .iter()
        .filter(|b| b.fires_projectile)
        .map(|b| b.anchor())
        .collect();
    let turrets: Vec<Vec2> = session.structural_pillars().map(|p| p.muzzle()).collect();
    let sources = RespawnSources {
        live_sources: &live_sources,
        initial_sources: session.initial_sources,
        bricks_remain: !session.bricks.is_empty(),
        drop_points: &session.drop_points,
        turrets: (session.turret_delay == Some(0)).then_some(turrets.as_slice()),
    };
    let launch_chance = session.tuning.launch_chance;

    let mut hit = false;
    for projectile in &mut session.projectiles {
        if projectile.parked {
            if sources.turrets.is_some() {
                projectile.reset_pos(pick_respawn(&mut session.rng, &sources));
            }
            continue;
        }

        projectile.step(&mut session.rng, launch_chance);
        if projectile.hits_paddle(&session.paddle) {
            hit = true;
            break;
        }
        if projectile.is_below(session.height) {
            projectile.reset_pos(pick_respawn(&mut session.rng, &sources));
        }
    }

    if hit {
        log::info!("Projectile struck the paddle");
        session.set_phase(GamePhase::Lose);
    }
}

/// Retraction and turret timers, all started by the wall falling
fn update_pillars(session: &mut GameSession) {
    if !session.bricks.is_empty() {
        return;
    }

    match session.turret_delay {
        None => {
            session.turret_delay = Some(session.tuning.turret_delay_frames);
            let (width, frames) = (session.width, session.tuning.retract_frames);
            for pillar in &mut session.pillars {
                pillar.start_retracting(width, frames);
            }
            session.events.push(GameEvent::PillarsRetracting);
            log::info!("Wall cleared, protective pillars retracting");
        }
        Some(n) if n > 0 => session.turret_delay = Some(n - 1),
        Some(_) => {}
    }

    for pillar in &mut session.pillars {
        if pillar.advance_retraction() {
            log::debug!("Pillar {:?} retracted", pillar.kind);
        }
    }

    let retracted = session.protective_pillars().all(|p| p.is_retracted());
    match session.release_delay {
        None if retracted => {
            session.release_delay = Some(session.tuning.release_delay_frames);
        }
        Some(n) if n > 0 => session.release_delay = Some(n - 1),
        _ => {}
    }
}

fn update_prisoners(session: &mut GameSession) {
    let open = session.release_delay == Some(0);
    let pace = session.tuning.prisoner_pace_speed;
    let migrate = session.tuning.prisoner_migrate_speed;

    for prisoner in &mut session.prisoners {
        if open {
            if prisoner.migrate(migrate) {
                session.events.push(GameEvent::PrisonerReleased);
                log::debug!("Prisoner released on the {:?} side", prisoner.side);
            }
        } else {
            prisoner.pace(pace);
        }
    }
}

/// Apply growth for every brick-count threshold crossed this frame
fn update_growth(session: &mut GameSession) {
    let events = session.growth.advance(session.bricks.len());
    let tuning = &session.tuning;

    for _ in 0..events.count {
        session.ball.grow(tuning.ball_growth);
        session.paddle.grow(tuning.paddle_growth, session.width);
        for projectile in &mut session.projectiles {
            projectile.accelerate(tuning.projectile_accel);
        }
        session.events.push(GameEvent::Grew {
            growth_count: session.ball.growth_count,
        });
    }
    for _ in 0..events.pillar {
        for pillar in &mut session.pillars {
            pillar.grow(tuning.pillar_growth);
        }
    }

    if events.count > 0 {
        session.cannon.follow(&session.paddle);
        session.mirror.sync_size(&session.ball);
        if !session.ball.airborne {
            session.ball.ground(&session.paddle);
        }
        log::debug!(
            "Growth x{}: ball radius {:.1}, paddle width {:.1}",
            events.count,
            session.ball.radius(),
            session.paddle.width
        );
    }
}
