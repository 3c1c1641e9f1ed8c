//! Fixed-step frame pacing for hosts with a variable frame rate

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulates wall-clock time and reports how many ticks to run
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `dt` seconds of real time; returns the number of ticks owed.
    /// Long stalls are clamped so the host never runs more than
    /// `MAX_SUBSTEPS` ticks in one frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
