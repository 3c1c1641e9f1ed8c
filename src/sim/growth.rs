//! Difficulty scaling driven by the brick count
//!
//! Growth happens in discrete steps each time the remaining brick count
//! drops onto or past a nonzero multiple of `step`. The trigger remembers
//! the previous count, so a threshold fires once no matter how long the
//! count sits on it, and removing several bricks in one frame still fires
//! once per multiple crossed.

use serde::{Deserialize, Serialize};

/// Edge detector for downward crossings of multiples of `step`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdTrigger {
    step: usize,
    last_count: usize,
}

impl ThresholdTrigger {
    /// The starting count is treated as already seen
    pub fn new(step: usize, initial_count: usize) -> Self {
        Self {
            step,
            last_count: initial_count,
        }
    }

    /// Feed the current count; returns how many thresholds were crossed
    pub fn advance(&mut self, count: usize) -> u32 {
        if self.step == 0 || count >= self.last_count {
            self.last_count = count;
            return 0;
        }
        // Multiples m of step with count <= m < last_count, m > 0
        let lo = count.max(1);
        let hi = self.last_count - 1;
        let crossed = if hi < lo {
            0
        } else {
            hi / self.step - (lo - 1) / self.step
        };
        self.last_count = count;
        crossed as u32
    }
}

/// Growth to apply this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthEvents {
    /// Ball, paddle and projectile increments
    pub count: u32,
    /// Pillar increments (bounded over the session)
    pub pillar: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthScheduler {
    trigger: ThresholdTrigger,
    pub pillar_growths: u32,
    max_pillar_growths: u32,
}

impl GrowthScheduler {
    pub fn new(step: usize, initial_count: usize, max_pillar_growths: u32) -> Self {
        Self {
            trigger: ThresholdTrigger::new(step, initial_count),
            pillar_growths: 0,
            max_pillar_growths,
        }
    }

    pub fn advance(&mut self, brick_count: usize) -> GrowthEvents {
        let count = self.trigger.advance(brick_count);
        let pillar = count.min(self.max_pillar_growths.saturating_sub(self.pillar_growths));
        self.pillar_growths += pillar;
        GrowthEvents { count, pillar }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_threshold() {
        let mut trigger = ThresholdTrigger::new(5, 25);
        assert_eq!(trigger.advance(25), 0);
        for count in (21..25).rev() {
            assert_eq!(trigger.advance(count), 0);
        }
        assert_eq!(trigger.advance(20), 1);
        // Sitting on the threshold does not re-fire
        assert_eq!(trigger.advance(20), 0);
        assert_eq!(trigger.advance(19), 0);
    }

    #[test]
    fn test_full_clear_sequence() {
        let mut trigger = ThresholdTrigger::new(5, 25);
        let fired: Vec<usize> = (0..25)
            .rev()
            .filter(|&count| trigger.advance(count) == 1)
            .collect();
        assert_eq!(fired, vec![20, 15, 10, 5]);
    }

    #[test]
    fn test_multi_removal_counts_each_multiple() {
        let mut trigger = ThresholdTrigger::new(5, 26);
        assert_eq!(trigger.advance(14), 3); // 25, 20, 15
        assert_eq!(trigger.advance(9), 1); // 10
        assert_eq!(trigger.advance(0), 1); // 5, zero is not a threshold
    }

    #[test]
    fn test_pillar_growth_bounded() {
        let mut scheduler = GrowthScheduler::new(5, 25, 2);
        assert_eq!(scheduler.advance(20), GrowthEvents { count: 1, pillar: 1 });
        assert_eq!(scheduler.advance(15), GrowthEvents { count: 1, pillar: 1 });
        assert_eq!(scheduler.advance(10), GrowthEvents { count: 1, pillar: 0 });
        assert_eq!(scheduler.pillar_growths, 2);
    }
}
