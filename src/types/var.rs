//! `Var` struct: per-variable state (§3 "Variable state").
use crate::types::{flags::FlagIF, flags::FlagVar, AssignReason, DecisionLevel};

/// Object representing a single variable's control state. The boolean
/// *value* itself is not stored here: it lives in the dense `values: Vec<i8>`
/// array of `AssignStack`, indexed by packed literal, so that both polarities
/// can be read with a single array access (§3: "`value[lit] == -value[¬lit]`").
#[derive(Clone, Debug)]
pub struct Var {
    /// decision level at which this variable was assigned; meaningless while
    /// unassigned.
    pub(crate) level: DecisionLevel,
    /// the clause (or virtual binary) that forced this assignment; `None`
    /// for decisions and for unassigned variables.
    pub(crate) reason: AssignReason,
    /// the assignment's index in the trail; meaningless while unassigned.
    pub(crate) trail_position: usize,
    /// saved polarity from the last time this variable was unassigned
    /// (phase saving).
    pub(crate) saved_phase: bool,
    /// snapshot of `saved_phase` taken when the trail last set a new record
    /// of assigned variables in stable mode (§4.4, §4.8); `None` until the
    /// first such snapshot.
    pub(crate) target_phase: Option<bool>,
    /// like `target_phase` but only ever overwritten by a strictly larger
    /// record, and never cleared by a mode switch.
    pub(crate) best_phase: Option<bool>,
    /// VSIDS score.
    pub(crate) activity: f64,
    /// position in the VSIDS binary heap, or `None` if not currently on it.
    pub(crate) heap_position: Option<usize>,
    pub(crate) flags: FlagVar,
}

impl Default for Var {
    fn default() -> Var {
        Var {
            level: 0,
            reason: AssignReason::None,
            trail_position: 0,
            saved_phase: true,
            target_phase: None,
            best_phase: None,
            activity: 0.0,
            heap_position: None,
            flags: FlagVar::empty(),
        }
    }
}

impl Var {
    /// allocate `n` fresh, unassigned variables (index `0` is unused so that
    /// `ClauseId`/positions can reserve zero as a sentinel elsewhere; the
    /// caller addresses variables `1..=n`).
    pub fn new_vars(n: usize) -> Vec<Var> {
        (0..=n).map(|_| Var::default()).collect()
    }

    pub fn activity(&self) -> f64 {
        self.activity
    }
}

impl FlagIF for Var {
    type FlagType = FlagVar;
    #[inline]
    fn is(&self, flag: FlagVar) -> bool {
        self.flags.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: FlagVar, b: bool) {
        self.flags.set(f, b);
    }
    #[inline]
    fn turn_off(&mut self, flag: FlagVar) {
        self.flags.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: FlagVar) {
        self.flags.insert(flag);
    }
}
