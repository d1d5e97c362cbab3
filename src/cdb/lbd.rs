//! Glue/LBD computation (§3 "Clause", §4.1 "Glue (LBD)", §4.5 step 5).
use {
    super::clause::MAX_GLUE,
    crate::{assign::AssignIF, types::Lit},
};

/// number of distinct decision levels among `lits`' current assignments,
/// capped at [`MAX_GLUE`]. `scratch` is a caller-owned buffer reused across
/// calls (minimization, reduction revaluation, vivification) to avoid
/// allocating on every invocation.
pub fn compute_glue<A: AssignIF>(asg: &A, lits: &[Lit], scratch: &mut Vec<u32>) -> u32 {
    scratch.clear();
    scratch.extend(lits.iter().map(|l| asg.level_of(l.vi())));
    scratch.sort_unstable();
    scratch.dedup();
    (scratch.len() as u32).min(MAX_GLUE)
}
