//! Crate `solver` wires the trail, clause database, and inprocessors
//! together into the top-level CDCL search loop.
mod analyze;
mod build;
mod mode;
mod restart;
mod search;
mod validate;
mod vivify;

pub use {
    build::SatSolverIF,
    restart::Restarter,
    search::SolveIF,
    validate::validate,
};

use crate::{
    assign::AssignStack,
    cdb::ClauseDB,
    processor::Eliminator,
    state::State,
    types::Lit,
};

/// Outcome of a finished search: a satisfying assignment (DIMACS-signed,
/// one entry per variable) or a proof that none exists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Certificate {
    SAT(Vec<i32>),
    UNSAT,
}

pub type SolverResult = Result<Certificate, crate::types::SolverError>;

/// The six collaborating pieces of the solver, plus the two inprocessing
/// schedules (`next_reduce`/`next_vivify`) that don't naturally belong to
/// any one of them.
pub struct Solver {
    pub asg: AssignStack,
    pub cdb: ClauseDB,
    pub elim: Eliminator,
    pub state: State,
    pub rst: Restarter,
    mode_switch: mode::ModeSwitch,
    next_reduce: u64,
    next_vivify: u64,
    /// every irredundant clause exactly as it was asserted (deduped,
    /// tautology-free, but *not* root-truth-filtered), independent of
    /// whatever inprocessing has since rewritten the live `cdb` (§4.13).
    original_clauses: Vec<Vec<Lit>>,
}
