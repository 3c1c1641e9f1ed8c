//! Sound effect dispatch
//!
//! The simulation reports what happened as `GameEvent`s. This module maps
//! them to sound effects, applies the player's volume preferences and hands
//! the result to whatever backend the host provides.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Cannon fired
    Launch,
    /// Ball bounced off the ceiling or a pillar
    Bounce,
    /// Brick destroyed
    BrickBreak,
    /// Ball, paddle and pillars grew
    Grow,
    /// Wall cleared, pillars sliding away
    Retract,
    /// A prisoner walked out
    Release,
    /// Game over
    GameOver,
    /// All prisoners freed
    Victory,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::ShotFired => SoundEffect::Launch,
            GameEvent::BallBounce => SoundEffect::Bounce,
            GameEvent::BrickDestroyed { .. } => SoundEffect::BrickBreak,
            GameEvent::Grew { .. } => SoundEffect::Grow,
            GameEvent::PillarsRetracting => SoundEffect::Retract,
            GameEvent::PrisonerReleased => SoundEffect::Release,
            GameEvent::GameLost => SoundEffect::GameOver,
            GameEvent::GameWon => SoundEffect::Victory,
        }
    }

    /// Relative loudness before player volume is applied
    pub fn base_gain(self) -> f32 {
        match self {
            SoundEffect::Bounce => 0.4,
            SoundEffect::Launch | SoundEffect::Release => 0.6,
            SoundEffect::BrickBreak | SoundEffect::Grow => 0.8,
            SoundEffect::Retract | SoundEffect::GameOver | SoundEffect::Victory => 1.0,
        }
    }
}

/// Host audio backend
pub trait AudioSink {
    /// Play `effect` at `gain` in 0..=1
    fn play(&mut self, effect: SoundEffect, gain: f32);
}

/// Backend for headless runs: every sound becomes a debug log line
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, gain: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, gain);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol * effect.base_gain());
    }

    /// Play one effect per event, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, gain: f32) {
            self.0.push((effect, gain));
        }
    }

    #[test]
    fn test_events_map_in_order() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_events(&[
            GameEvent::ShotFired,
            GameEvent::BrickDestroyed { points: 3 },
            GameEvent::GameWon,
        ]);
        let played: Vec<SoundEffect> = audio.sink().0.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            played,
            vec![
                SoundEffect::Launch,
                SoundEffect::BrickBreak,
                SoundEffect::Victory
            ]
        );
    }

    #[test]
    fn test_gain_scales_with_volume() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::GameOver);
        let (_, gain) = audio.sink().0[0];
        assert!((gain - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(Recorder::default(), &settings);
        audio.handle_events(&[GameEvent::BallBounce, GameEvent::GameLost]);
        assert!(audio.sink().0.is_empty());
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::Bounce);
        assert!(audio.sink().0.is_empty());
    }
}
