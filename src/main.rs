//! Castle Breaker headless runner
//!
//! Plays a session with the autopilot and prints the final scene as JSON.
//!
//! Usage: castle-breaker [frames] [seed] [settings.json]

use std::process::ExitCode;

use castle_breaker::Settings;
use castle_breaker::audio::{AudioManager, LogSink};
use castle_breaker::clock::FrameClock;
use castle_breaker::consts::SIM_DT;
use castle_breaker::sim::{GameSession, Scene, SessionConfig, autopilot_input, tick};

const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 720.0;
const DEFAULT_FRAMES: u64 = 60 * 60;
const SETTINGS_PATH: &str = "castle_breaker_settings.json";
/// The headless host pretends to render at 30 Hz
const HOST_FRAME_DT: f32 = 1.0 / 30.0;

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, name: &str) -> Result<Option<T>, String> {
    match arg {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("invalid {}: {:?}", name, raw)),
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let frames = parse_arg::<u64>(args.first(), "frame count")?.unwrap_or(DEFAULT_FRAMES);
    let seed = parse_arg::<u64>(args.get(1), "seed")?.unwrap_or_else(rand::random);
    let settings_path = args.get(2).map(String::as_str).unwrap_or(SETTINGS_PATH);

    let settings = Settings::load(settings_path);
    let config =
        SessionConfig::new(WINDOW_WIDTH, WINDOW_HEIGHT, seed).with_tuning(settings.tuning.clone());
    let mut session = GameSession::new(config).map_err(|e| e.to_string())?;
    let mut audio = AudioManager::from_settings(LogSink, &settings);
    let mut clock = FrameClock::new();

    log::info!("Running {} frames with seed {}", frames, seed);

    let mut ticks = 0;
    while ticks < frames && !session.phase.is_terminal() {
        for _ in 0..clock.advance(HOST_FRAME_DT) {
            let input = autopilot_input(&session);
            tick(&mut session, &input);
            audio.handle_events(&session.drain_events());
            ticks += 1;
            if ticks >= frames || session.phase.is_terminal() {
                break;
            }
        }
    }

    log::info!(
        "Stopped after {} frames ({:.1}s simulated): {:?}, score {}",
        ticks,
        ticks as f32 * SIM_DT,
        session.phase,
        session.score
    );

    let mut scene = Scene::capture(&session);
    if !settings.effective_trails() {
        scene.trail.clear();
    }
    let json = serde_json::to_string_pretty(&scene).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Castle Breaker (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("castle-breaker: {}", e);
            ExitCode::FAILURE
        }
    }
}
