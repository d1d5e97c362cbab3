//! The assignment trail (C2, §3 "Trail", §3 "Level frame", §4.2, §4.6).
use {
    super::{heap::VarIdHeap, vmtf::Vmtf, AssignIF, Mode},
    crate::{
        config::Config,
        types::{flags::FlagIF, AssignReason, CNFDescription, DecisionLevel, FlagVar, Instantiate, Lit, Var},
    },
};

/// One entry of the per-level control-stack (§3 "Level frame"). The
/// earliest-seen-position/seen-count bookkeeping §4.5 step 3 describes as an
/// alternative way to skip whole levels during minimization is subsumed here
/// by `literal_redundant`'s abstract-level bitmask (`solver::analyze`), which
/// prunes the same levels without needing per-level counters.
#[derive(Clone, Copy, Debug)]
pub struct LevelFrame {
    /// trail index at which this level's first assignment was pushed.
    pub trail_start: usize,
}

impl LevelFrame {
    fn new(trail_start: usize) -> LevelFrame {
        LevelFrame { trail_start }
    }
}

/// The trail, its per-level frames, and the per-variable state array
/// (§3 "Variable state", "Trail", "Level frame"). Owns the decision
/// heuristics too, since both must be updated in lock-step on every
/// push/pop (§4.4, §4.6).
#[derive(Clone, Debug)]
pub struct AssignStack {
    /// `values[lit.as_index()] in {-1, 0, 1}`; `values[lit] == -values[!lit]`
    /// by construction since both are written together on assign/unassign.
    values: Vec<i8>,
    pub(crate) vars: Vec<Var>,
    trail: Vec<Lit>,
    frames: Vec<LevelFrame>,
    /// BCP cursor: `trail[..q_head]` has been propagated already.
    pub q_head: usize,
    /// count of root-level units flushed from the trail head so far
    /// (§4.2 "root-level units are flushed").
    root_len: usize,
    num_vars: usize,
    pub mode: Mode,
    pub heap: VarIdHeap,
    pub vmtf: Vmtf,
    /// default polarity for a variable with no saved/target phase yet.
    default_phase: bool,
}

impl Instantiate for AssignStack {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> AssignStack {
        let n = cnf.num_of_variables.max(config.max_vars.min(cnf.num_of_variables));
        let n = n.max(cnf.num_of_variables);
        AssignStack {
            values: vec![0; 2 * (n + 1)],
            vars: Var::new_vars(n),
            trail: Vec::with_capacity(n),
            frames: Vec::new(),
            q_head: 0,
            root_len: 0,
            num_vars: n,
            mode: Mode::Focused,
            heap: VarIdHeap::new(n),
            vmtf: Vmtf::new(n),
            default_phase: false,
        }
    }
}

impl AssignIF for AssignStack {
    fn num_vars(&self) -> usize {
        self.num_vars
    }
    fn assigned(&self, lit: Lit) -> Option<bool> {
        match self.values[lit.as_index()] {
            1 => Some(true),
            -1 => Some(false),
            _ => None,
        }
    }
    fn level_of(&self, vi: usize) -> DecisionLevel {
        self.vars[vi].level
    }
    fn reason_of(&self, vi: usize) -> AssignReason {
        self.vars[vi].reason
    }
    fn trail_position(&self, vi: usize) -> usize {
        self.vars[vi].trail_position
    }
    fn decision_level(&self) -> DecisionLevel {
        self.frames.len() as DecisionLevel
    }
    fn trail(&self) -> &[Lit] {
        &self.trail
    }
    fn level_start(&self, level: DecisionLevel) -> usize {
        if level == 0 {
            0
        } else {
            self.frames[level as usize - 1].trail_start
        }
    }
    fn is_active(&self, vi: usize) -> bool {
        !self.vars[vi].is(FlagVar::FIXED) && !self.vars[vi].is(FlagVar::ELIMINATED)
    }
}

impl crate::types::EventHandleIF for AssignStack {
    fn handle(&mut self, e: crate::types::SolverEvent) {
        if let crate::types::SolverEvent::NewVar = e {
            let vi = self.num_vars + 1;
            self.expand_to(vi);
        }
    }
}

impl AssignStack {
    /// grow the variable arrays to accommodate a newly-activated variable
    /// (§3 "Variables are activated lazily when first mentioned").
    pub fn expand_to(&mut self, vi: usize) {
        if vi >= self.vars.len() {
            self.vars.resize(vi + 1, Var::default());
            self.values.resize(2 * (vi + 1), 0);
            self.num_vars = self.num_vars.max(vi);
            self.heap.expand_to(vi);
            self.vmtf.expand_to(vi);
        }
    }

    /// open a new decision level and push `lit` as a decision (no reason).
    pub fn decide(&mut self, lit: Lit) {
        self.frames.push(LevelFrame::new(self.trail.len()));
        self.assign(lit, self.decision_level_after_push(), AssignReason::None);
    }

    fn decision_level_after_push(&self) -> DecisionLevel {
        self.frames.len() as DecisionLevel
    }

    /// assign `lit` true at `level` with `reason`, updating both the dense
    /// value array and the `Var` bookkeeping (§3 "Variable state").
    pub fn assign(&mut self, lit: Lit, level: DecisionLevel, reason: AssignReason) {
        let vi = lit.vi();
        self.values[lit.as_index()] = 1;
        self.values[(!lit).as_index()] = -1;
        let v = &mut self.vars[vi];
        v.level = level;
        v.reason = reason;
        v.trail_position = self.trail.len();
        v.saved_phase = lit.is_positive();
        self.trail.push(lit);
        if level == 0 {
            v.set(FlagVar::FIXED, true);
        }
        self.heap.remove(&mut self.vars, vi);
    }

    /// assign a unit at the root level (used by BCP and by elimination's
    /// unit resolvents); the variable becomes permanently fixed (§4.2).
    pub fn assign_at_root(&mut self, lit: Lit, reason: AssignReason) {
        debug_assert_eq!(self.decision_level(), 0);
        self.assign(lit, 0, reason);
    }

    /// remove a strictly-increasing contiguous prefix of root-fixed
    /// literals from the trail head, as required by §4.2. Only safe to call
    /// at decision level 0; positions of the remaining trail are not
    /// renumbered (chronological backtracking tolerates the gap).
    pub fn flush_root_units(&mut self) {
        debug_assert_eq!(self.decision_level(), 0);
        while self.root_len < self.trail.len() && self.vars[self.trail[self.root_len].vi()].level == 0 {
            self.root_len += 1;
        }
    }

    pub fn root_len(&self) -> usize {
        self.root_len
    }

    /// Unassign everything above `new_level`, honoring chronological reuse:
    /// literals whose own level is `<= new_level` are kept in place even
    /// though they were pushed after the `new_level` frame began (§4.6
    /// "Chronological backtracking"). Returns the set of variables that
    /// were actually unassigned, for heuristic reinsertion by the caller.
    pub fn cancel_until_chrono(&mut self, new_level: DecisionLevel, chronological: bool) -> Vec<usize> {
        if new_level >= self.decision_level() {
            return Vec::new();
        }
        let cut = self.level_start(new_level + 1);
        let mut unassigned = Vec::new();
        let mut kept = Vec::with_capacity(self.trail.len() - cut);
        for &lit in &self.trail[cut..] {
            let vi = lit.vi();
            if chronological && self.vars[vi].level <= new_level {
                kept.push(lit);
            } else {
                self.unassign_one(vi);
                unassigned.push(vi);
            }
        }
        self.trail.truncate(cut);
        self.frames.truncate(new_level as usize);
        for lit in kept {
            let vi = lit.vi();
            self.vars[vi].trail_position = self.trail.len();
            self.trail.push(lit);
        }
        self.q_head = self.q_head.min(self.trail.len());
        unassigned
    }

    fn unassign_one(&mut self, vi: usize) {
        self.values[Lit::from_var_index(vi, false).as_index()] = 0;
        self.values[Lit::from_var_index(vi, true).as_index()] = 0;
        self.vars[vi].reason = AssignReason::None;
        if self.is_active(vi) {
            self.heap.insert(&mut self.vars, vi);
        }
        self.vmtf.on_unassign(vi);
    }

    /// expose the raw value array to the VMTF queue's unassigned-scan
    /// without handing out `&mut self` (the queue itself is a field of
    /// `self`, so it cannot close over `self` while being mutated).
    pub fn values_slice(&self) -> &[i8] {
        &self.values
    }

    /// number of assigned variables; used for "record of assigned
    /// variables" target/best-phase triggers (§4.4, §4.8).
    pub fn num_assigned(&self) -> usize {
        self.trail.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CNFDescription, Instantiate};

    fn fresh(n: usize) -> AssignStack {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: n,
            ..CNFDescription::default()
        };
        AssignStack::instantiate(&config, &cnf)
    }

    #[test]
    fn backtracking_to_root_is_a_left_inverse_of_assignment() {
        // §8 "Backtracking is a left inverse of assignment: repeatedly
        // popping leaves value vector all-zero."
        let mut asg = fresh(4);
        asg.decide(Lit::from_var_index(1, false));
        asg.assign(Lit::from_var_index(2, true), asg.decision_level(), AssignReason::None);
        asg.decide(Lit::from_var_index(3, false));
        asg.cancel_until_chrono(0, false);
        assert_eq!(asg.decision_level(), 0);
        assert_eq!(asg.num_assigned(), 0);
        for vi in 1..=4 {
            assert_eq!(asg.assigned(Lit::from_var_index(vi, false)), None);
        }
    }

    #[test]
    fn chronological_cancel_keeps_lower_level_literals_on_the_trail() {
        let mut asg = fresh(3);
        asg.decide(Lit::from_var_index(1, false)); // level 1
        asg.decide(Lit::from_var_index(2, false)); // level 2
        asg.assign(Lit::from_var_index(3, false), 1, AssignReason::None);
        // cancel to level 1, keeping the level-1 literal placed above it.
        asg.cancel_until_chrono(1, true);
        assert_eq!(asg.decision_level(), 1);
        assert_eq!(asg.assigned(Lit::from_var_index(1, false)), Some(true));
        assert_eq!(asg.assigned(Lit::from_var_index(3, false)), Some(true));
        assert_eq!(asg.assigned(Lit::from_var_index(2, false)), None);
    }
}
