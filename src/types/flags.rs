/// API for bitflag-backed object properties, shared by `Var` and `Clause`.
pub trait FlagIF {
    type FlagType;
    /// return true if the flag in on.
    fn is(&self, flag: Self::FlagType) -> bool;
    /// set the flag to a given value.
    fn set(&mut self, f: Self::FlagType, b: bool);
    /// toggle the flag off.
    fn turn_off(&mut self, flag: Self::FlagType);
    /// toggle the flag on.
    fn turn_on(&mut self, flag: Self::FlagType);
}

bitflags! {
    /// Per-variable state flags (§3 "Variable state": `flags {active, fixed,
    /// eliminated, eliminate-candidate, subsume-candidate}`), plus the
    /// ephemeral marks used by conflict-clause minimization (§4.5 step 3).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagVar: u16 {
        /// the saved polarity from the last time this variable was assigned.
        const PHASE              = 0b0000_0000_0001;
        /// set while this variable is marked `analyzed` in the conflict
        /// currently being processed; cleared when analysis finishes.
        const SEEN               = 0b0000_0000_0010;
        /// a variable is fixed at level 0 (unit) and permanently inactive.
        const FIXED              = 0b0000_0000_0100;
        /// a variable has been eliminated by resolution (§4.10) and is
        /// permanently inactive; its value is reconstructed from the
        /// extension stack on SAT.
        const ELIMINATED         = 0b0000_0000_1000;
        /// queued to be considered as an elimination pivot.
        const ELIM_CANDIDATE     = 0b0000_0001_0000;
        /// queued to be tried as a subsumer/strengthener (§4.11).
        const SUBSUME_CANDIDATE  = 0b0000_0010_0000;
        /// memoized "provably redundant" mark used by minimization (§4.5.3).
        const REMOVABLE          = 0b0000_0100_0000;
        /// memoized "provably not redundant" mark used by minimization.
        const POISONED           = 0b0000_1000_0000;
        /// on the binary heap (VSIDS); cleared while popped/assigned so that
        /// backtracking knows whether to reinsert (§4.4).
        const ON_HEAP            = 0b0001_0000_0000;
    }
}

bitflags! {
    /// Per-clause state flags (§3 "Clause": `redundant flag ... garbage
    /// flag, protected flag, subsumed flag, vivify flag`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagClause: u16 {
        /// produced by conflict analysis (learnt); eligible for reduction.
        const LEARNT     = 0b0000_0000_0001;
        /// marked garbage; still reachable through stale watches/reasons
        /// until the next sweep collects it (§4.1, §4.9).
        const GARBAGE    = 0b0000_0000_0010;
        /// currently a reason on the trail; reduction (§4.9) must not touch it.
        const PROTECTED  = 0b0000_0000_0100;
        /// marked subsumed by another clause during C11; equivalent to
        /// garbage but recorded separately so subsumption bookkeeping can
        /// distinguish the two causes.
        const SUBSUMED   = 0b0000_0000_1000;
        /// queued for the vivification pass (§4.12).
        const VIVIFY     = 0b0000_0001_0000;
        /// this clause has occurrence-list entries registered (dense mode).
        const OCCUR_LINKED = 0b0000_0010_0000;
        /// a resolvent of this clause produced a learnt clause whose glue
        /// was below the tier-1 threshold; used to bias tier-2 "lives".
        const DERIVED_GOOD = 0b0000_0100_0000;
    }
}
