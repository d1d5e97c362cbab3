//! Crate `cdb`: the clause arena, watch lists (sparse and dense), and glue
//! computation (C1, §3 "Clause", "Watch entry").
mod clause;
pub mod db;
pub mod lbd;
pub mod watch;

pub use {
    clause::{Clause, MAX_GLUE},
    db::{AddedClause, ClauseDB, WatchMode},
    lbd::compute_glue,
    watch::{Watch, WatchList},
};

use crate::types::{ClauseId, Lit};

/// What a conflict/reason points to, without needing an arena lookup to
/// tell binary and long clauses apart (§4.1 "Tagged reason pointers" is the
/// `assign`-side version of this; this is the equivalent for BCP's
/// immediate return value).
#[derive(Clone, Copy, Debug)]
pub enum ConflictRef {
    Binary(Lit, Lit, bool),
    Long(ClauseId),
}
