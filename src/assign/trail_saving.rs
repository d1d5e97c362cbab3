//! Chronological reuse-trail policy (§4.5 step 7, §4.6 "Chronological
//! backtracking"): decide how far above the asserting level the trail can
//! be kept in place instead of being unwound.
use super::{stack::AssignStack, AssignIF, Mode};

/// Compute the level to actually backjump to. Below `config.chrono_threshold`
/// levels of slack, always do a normal jump to `asserting_level`; beyond
/// that, walk upward from `asserting_level` keeping levels whose decision
/// variable still outranks the next decision candidate (by VSIDS activity
/// in stable mode, by VMTF stamp in focused mode), stopping at the first
/// level that doesn't (§4.7's reuse-trail applies identically to restarts).
pub fn reuse_trail_level(asg: &AssignStack, asserting_level: crate::types::DecisionLevel, chrono_threshold: u32) -> crate::types::DecisionLevel {
    let current = asg.decision_level();
    if current <= asserting_level || current - asserting_level < chrono_threshold {
        return asserting_level;
    }
    let next_rank = match asg.mode {
        Mode::Stable => asg.heap.peek_top_activity(&asg.vars),
        Mode::Focused => asg.vmtf.peek_stamp() as f64,
    };
    let mut level = asserting_level;
    for l in (asserting_level + 1)..=current {
        let start = asg.level_start(l);
        if start >= asg.trail().len() {
            break;
        }
        let dec_vi = asg.trail()[start].vi();
        let rank = match asg.mode {
            Mode::Stable => asg.vars[dec_vi].activity(),
            Mode::Focused => asg.vmtf.stamp_of(dec_vi) as f64,
        };
        if rank < next_rank {
            break;
        }
        level = l;
    }
    level
}
