//! Restart control (C7, §4.7): EMA-driven forcing in focused mode, reluctant
//! doubling in stable mode.
use crate::{
    assign::{ema::Averages, Mode},
    config::Config,
    state::{Stat, State},
    types::{EmaIF, Reluctant},
};

/// Owns both modes' statistics and the stable-mode restart schedule. A
/// single `Averages` bundle is shared across modes (§3 names "separate
/// instances for focused and stable modes" for the EMAs themselves, but the
/// glue/level/trail-fill signal is meaningful in either mode and a restart
/// decision only ever consults the bundle belonging to the mode currently
/// active).
pub struct Restarter {
    pub averages: Averages,
    reluctant: Reluctant,
    conflicts_since_restart: usize,
    stable_interval: u64,
}

impl Restarter {
    pub fn new(config: &Config) -> Restarter {
        Restarter {
            averages: Averages::new(config.restart_glue_fast_len, config.restart_glue_slow_len),
            reluctant: Reluctant::default(),
            conflicts_since_restart: 0,
            stable_interval: config.restart_stable_interval,
        }
    }

    /// fold one conflict's glue/level/trail-fill into the moving averages
    /// and advance the "since last restart" counter (§4.7).
    pub fn update(&mut self, glue: f64, level: f64, trail_fill: f64) {
        self.averages.update(glue, level, trail_fill);
        self.conflicts_since_restart += 1;
    }

    /// §4.7: focused mode forces a restart once enough conflicts have
    /// passed and the fast glue average has drifted far enough above the
    /// slow one; stable mode instead waits out a reluctant-doubling
    /// interval, ignoring glue entirely.
    pub fn should_restart(&self, mode: Mode, config: &Config) -> bool {
        match mode {
            Mode::Focused => {
                self.conflicts_since_restart >= config.restart_step && self.averages.glue.trend() >= config.restart_glue_margin
            }
            Mode::Stable => self.conflicts_since_restart as u64 >= self.stable_interval,
        }
    }

    /// record that a restart actually fired: reset the "since last restart"
    /// counter, and in stable mode advance the reluctant-doubling sequence
    /// to get the next interval (§4.7, glossary "Reluctant doubling").
    pub fn restart_fired(&mut self, mode: Mode, config: &Config, state: &mut State) {
        self.conflicts_since_restart = 0;
        state[Stat::Restart] += 1;
        if mode == Mode::Stable {
            self.stable_interval = self.reluctant.next() * config.restart_stable_interval;
        }
    }

    /// restart the reluctant-doubling sequence from scratch, called on every
    /// focused -> stable mode switch (§4.8): a fresh stable run should not
    /// inherit however far doubling had progressed the last time this mode
    /// was active.
    pub fn reset_reluctant(&mut self, config: &Config) {
        self.reluctant.reset();
        self.conflicts_since_restart = 0;
        self.stable_interval = self.reluctant.next() * config.restart_stable_interval;
    }

    /// current fast/slow glue EMAs, for progress reporting.
    pub fn glue_trend(&self) -> f64 {
        self.averages.glue.trend()
    }

    /// record the decision count at the moment a mode switch fires, into
    /// the averages bundle that becomes active for the new mode (§4.8).
    pub fn note_mode_switch(&mut self, decisions: u64) {
        self.averages.decisions_at_switch = decisions;
    }
}
