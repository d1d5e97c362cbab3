//! Exponential moving averages and the reluctant-doubling restart sequence
//! (§3 "Averages", §4.7, glossary "Reluctant doubling").
use std::fmt;

/// Shared read accessors for an exponential moving average.
pub trait EmaIF {
    /// the short-window ("fast") average.
    fn get_fast(&self) -> f64;
    /// the long-window ("slow") average, if this average tracks one.
    fn get_slow(&self) -> f64 {
        self.get_fast()
    }
    /// `fast / slow`, used by restart-blocking/forcing decisions (§4.7).
    fn trend(&self) -> f64;
}

/// Mutating side of an exponential moving average.
pub trait EmaMutIF {
    type Input;
    fn update(&mut self, x: Self::Input);
    fn reset_to(&mut self, val: f64);
}

/// A single-window EMA with bias correction for the first few samples
/// (`denom` converges to `1.0`, matching the textbook "EMA with warm-up"
/// construction so that early updates are not biased toward the initial
/// value of zero).
#[derive(Clone, Debug)]
pub struct Ema {
    val: f64,
    cal: f64,
    rate: f64,
}

impl Ema {
    pub fn new(len: usize) -> Self {
        Ema {
            val: 0.0,
            cal: 1.0,
            rate: 1.0 / len as f64,
        }
    }
}

impl EmaIF for Ema {
    fn get_fast(&self) -> f64 {
        self.val / self.cal
    }
    fn trend(&self) -> f64 {
        1.0
    }
}

impl EmaMutIF for Ema {
    type Input = f64;
    fn update(&mut self, x: f64) {
        self.val += self.rate * (x - self.val);
        self.cal += self.rate * (1.0 - self.cal);
    }
    fn reset_to(&mut self, val: f64) {
        self.val = val;
        self.cal = 1.0;
    }
}

impl fmt::Display for Ema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ema({:.4})", self.get_fast())
    }
}

/// A view exposing just the two raw numbers behind a dual-window EMA, for
/// code that wants to inspect an average without depending on a concrete
/// wrapper type (used by the per-mode `Averages` bundles in `assign::ema`
/// and `cdb::ema`).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmaView {
    pub fast: f64,
    pub slow: f64,
}

/// A dual-window EMA: a fast-reacting estimate and a slow, stable baseline.
/// `trend() = fast / slow` drives restart-forcing/blocking thresholds
/// (spec §4.7: "fast-EMA(glue) >= margin x slow-EMA(glue)").
#[derive(Clone, Debug)]
pub struct Ema2 {
    fast: f64,
    slow: f64,
    calf: f64,
    cals: f64,
    fe: f64,
    se: f64,
}

impl Ema2 {
    pub fn new(fast_len: usize) -> Self {
        Ema2 {
            fast: 0.0,
            slow: 0.0,
            calf: 1.0,
            cals: 1.0,
            fe: 1.0 / fast_len as f64,
            se: 1.0 / fast_len as f64,
        }
    }
    pub fn with_slow(mut self, slow_len: usize) -> Self {
        self.se = 1.0 / slow_len as f64;
        self
    }
    pub fn get(&self) -> f64 {
        self.get_fast()
    }
}

impl EmaIF for Ema2 {
    fn get_fast(&self) -> f64 {
        self.fast / self.calf
    }
    fn get_slow(&self) -> f64 {
        self.slow / self.cals
    }
    fn trend(&self) -> f64 {
        let slow = self.get_slow();
        if slow == 0.0 {
            1.0
        } else {
            self.get_fast() / slow
        }
    }
}

impl EmaMutIF for Ema2 {
    type Input = f64;
    fn update(&mut self, x: f64) {
        self.fast += self.fe * (x - self.fast);
        self.calf += self.fe * (1.0 - self.calf);
        self.slow += self.se * (x - self.slow);
        self.cals += self.se * (1.0 - self.cals);
    }
    fn reset_to(&mut self, val: f64) {
        self.fast = val;
        self.slow = val;
        self.calf = 1.0;
        self.cals = 1.0;
    }
}

impl fmt::Display for Ema2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ema2({:.4}, {:.4})", self.get_fast(), self.get_slow())
    }
}

/// Knuth's reluctant-doubling sequence `(1,1,2,1,1,2,4,1,...)`, used to
/// space out stable-mode restarts (§4.7, glossary "Reluctant doubling").
/// `next()` both advances and returns the next multiplier.
#[derive(Clone, Copy, Debug)]
pub struct Reluctant {
    u: u64,
    v: u64,
}

impl Default for Reluctant {
    fn default() -> Self {
        Reluctant { u: 1, v: 1 }
    }
}

impl Reluctant {
    /// restart stable-mode doubling back to its initial state, as done on
    /// every focused -> stable mode switch (§4.8).
    pub fn reset(&mut self) {
        self.u = 1;
        self.v = 1;
    }

    /// advance the sequence and return the multiplier for the *next*
    /// restart interval.
    pub fn next(&mut self) -> u64 {
        let ret = self.v;
        if self.u & self.u.wrapping_neg() == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reluctant_doubling_matches_known_prefix() {
        let mut r = Reluctant::default();
        let seq: Vec<u64> = (0..9).map(|_| r.next()).collect();
        assert_eq!(seq, vec![1, 1, 2, 1, 1, 2, 4, 1, 1]);
    }

    #[test]
    fn ema_converges_to_constant_input() {
        let mut e = Ema2::new(4).with_slow(16);
        for _ in 0..500 {
            e.update(3.0);
        }
        assert!((e.get_fast() - 3.0).abs() < 1e-6);
        assert!((e.get_slow() - 3.0).abs() < 1e-6);
        assert!((e.trend() - 1.0).abs() < 1e-6);
    }
}
