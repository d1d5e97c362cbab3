//! Rephasing (C8, §4.8 "Rephasing (stable only) periodically resets saved
//! polarities"), and the target/best phase record-tracking supplemented
//! from `original_source/ref/phases/backtrack.h`.
use super::{stack::AssignStack, AssignIF};

/// The five-slot rotation named in §4.8.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RephaseKind {
    Original,
    Inverted,
    Best,
}

const ROTATION: [RephaseKind; 5] = [
    RephaseKind::Original,
    RephaseKind::Inverted,
    RephaseKind::Best,
    RephaseKind::Original,
    RephaseKind::Best,
];

#[derive(Clone, Copy, Debug, Default)]
pub struct Rotation {
    idx: usize,
}

impl Rotation {
    pub fn next(&mut self) -> RephaseKind {
        let k = ROTATION[self.idx % ROTATION.len()];
        self.idx += 1;
        k
    }
}

/// Overwrite every active variable's saved phase per `kind`, then clear the
/// target-phase vector (§4.8: "after every reset the target-phase vector is
/// cleared").
pub fn rephase(asg: &mut AssignStack, kind: RephaseKind) {
    for vi in 1..asg.vars.len() {
        if !asg.is_active(vi) {
            continue;
        }
        let v = &mut asg.vars[vi];
        v.saved_phase = match kind {
            RephaseKind::Original => false,
            RephaseKind::Inverted => !v.saved_phase,
            RephaseKind::Best => v.best_phase.unwrap_or(v.saved_phase),
        };
        v.target_phase = None;
    }
}

/// Clear every active variable's target phase, called on every focused ->
/// stable mode switch (§4.8 "entering stable clears the target-phase
/// vector"), distinct from the periodic rephase cadence which also clears it
/// as a side effect of overwriting `saved_phase`.
pub fn clear_target_phases(asg: &mut AssignStack) {
    for vi in 1..asg.vars.len() {
        if asg.is_active(vi) {
            asg.vars[vi].target_phase = None;
        }
    }
}

/// Snapshot saved polarities into the target-phase vector when a new
/// record of assigned variables is reached in stable mode
/// (`original_source`'s `update_target_phases`; supplemented since the
/// distilled spec names "target phase" without the trigger).
pub fn update_target_phases(asg: &mut AssignStack) {
    for vi in 1..asg.vars.len() {
        if asg.assigned(crate::types::Lit::from_var_index(vi, false)).is_some() {
            let phase = asg.vars[vi].saved_phase;
            asg.vars[vi].target_phase = Some(phase);
        }
    }
}

/// Same as [`update_target_phases`] but for `best_phase`, which (unlike
/// `target_phase`) is only ever overwritten by a strictly larger record and
/// survives mode switches (`original_source`'s `update_best_phases`).
pub fn update_best_phases(asg: &mut AssignStack) {
    for vi in 1..asg.vars.len() {
        if asg.assigned(crate::types::Lit::from_var_index(vi, false)).is_some() {
            let phase = asg.vars[vi].saved_phase;
            asg.vars[vi].best_phase = Some(phase);
        }
    }
}
