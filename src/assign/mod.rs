//! Crate `assign`: the trail (C2), BCP (C3), decision heuristics (C4),
//! phase bookkeeping, and chronological backtracking reuse policy (C6).
mod ema;
mod heap;
pub mod propagate;
pub mod rephase;
pub mod select;
mod stack;
pub mod trail_saving;
mod vmtf;

pub use {
    ema::Averages,
    heap::VarIdHeap,
    stack::{AssignStack, LevelFrame},
    vmtf::Vmtf,
};

use crate::types::{AssignReason, DecisionLevel, Lit};

/// Read-only trail/assignment accessors, implemented by [`AssignStack`] and
/// consumed generically by `cdb`, `processor`, and `solver` so those modules
/// don't need the concrete struct (kept analogous to the teacher's
/// `AssignIF` trait boundary between `assign` and its callers).
pub trait AssignIF {
    fn num_vars(&self) -> usize;
    /// `Some(true)`/`Some(false)` if `lit` is currently assigned true/false,
    /// `None` if unassigned.
    fn assigned(&self, lit: Lit) -> Option<bool>;
    fn level_of(&self, vi: usize) -> DecisionLevel;
    fn reason_of(&self, vi: usize) -> AssignReason;
    fn trail_position(&self, vi: usize) -> usize;
    fn decision_level(&self) -> DecisionLevel;
    fn trail(&self) -> &[Lit];
    /// trail index at which `level` began.
    fn level_start(&self, level: DecisionLevel) -> usize;
    /// `true` unless `vi` is fixed at level 0 or eliminated (§3 "fixed ⇒
    /// ... inactive; eliminated ⇒ inactive").
    fn is_active(&self, vi: usize) -> bool;
}

/// Decision/search mode (§4.4, §4.8 state machine "Mode").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Focused,
    Stable,
}
