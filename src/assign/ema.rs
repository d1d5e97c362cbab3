//! Per-mode average bundles (§3 "Averages": "slow/fast exponential moving
//! averages of glue, conflict level, trail fill, decision rate ... separate
//! instances for focused and stable modes").
use crate::types::{Ema, Ema2, EmaMutIF};

#[derive(Clone, Debug)]
pub struct Averages {
    pub glue: Ema2,
    pub conflict_level: Ema,
    pub trail_fill: Ema,
    /// decision count as of the most recent focused/stable mode switch
    /// (§4.8 "the decision count is saved into the newly active averages"),
    /// so progress reporting can tell how many decisions the current mode
    /// has spent without needing its own separate counter.
    pub decisions_at_switch: u64,
}

impl Averages {
    pub fn new(fast_len: usize, slow_len: usize) -> Averages {
        Averages {
            glue: Ema2::new(fast_len).with_slow(slow_len),
            conflict_level: Ema::new(fast_len),
            trail_fill: Ema::new(fast_len),
            decisions_at_switch: 0,
        }
    }

    /// fold one conflict's statistics in (§4.7, §4.8).
    pub fn update(&mut self, glue: f64, level: f64, trail_fill_ratio: f64) {
        self.glue.update(glue);
        self.conflict_level.update(level);
        self.trail_fill.update(trail_fill_ratio);
    }
}
