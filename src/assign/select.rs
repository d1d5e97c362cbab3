//! Decision and phase selection, dispatched by search mode (§4.4).
use {
    super::{stack::AssignStack, AssignIF, Mode},
    crate::types::Lit,
};



/// Pop the next decision variable from whichever heuristic the current
/// mode uses — the VSIDS heap in stable mode, the VMTF queue in focused
/// mode (§C.1 of the expanded spec; §4.4 of the base spec names both but
/// not the mode gate) — skipping anything that became inactive
/// (fixed/eliminated) or got assigned in the meantime.
pub fn next_decision_variable(asg: &mut AssignStack) -> Option<usize> {
    loop {
        let candidate = match asg.mode {
            Mode::Stable => asg.heap.pop(&mut asg.vars),
            Mode::Focused => {
                let values = asg.values_slice().to_vec();
                asg.vmtf.next_unassigned(&values)
            }
        }?;
        if asg.is_active(candidate) && asg.assigned(Lit::from_var_index(candidate, false)).is_none() {
            return Some(candidate);
        }
        // heap.pop already dropped `candidate`'s ON_HEAP membership; a
        // VMTF candidate that turned out inactive must be unlinked so the
        // cursor doesn't keep landing on it.
        if asg.mode == Mode::Focused {
            asg.vmtf.discard(candidate);
        }
    }
}

/// Phase selection (§4.4 "Phase selection"): in stable mode consult the
/// target phase first, falling back to the saved phase (which itself was
/// seeded from the configured default polarity when the variable was
/// activated, see `Var::default`); in focused mode go straight to the
/// saved phase.
pub fn select_phase(asg: &AssignStack, vi: usize) -> bool {
    let v = &asg.vars[vi];
    match asg.mode {
        Mode::Stable => v.target_phase.unwrap_or(v.saved_phase),
        Mode::Focused => v.saved_phase,
    }
}

/// Build the decision literal for `vi` (positive iff the selected phase is
/// `true`).
pub fn decision_literal(asg: &AssignStack, vi: usize) -> Lit {
    Lit::from_var_index(vi, !select_phase(asg, vi))
}
