//! Vivification (C12, §4.12): probe each clause's own literals as decisions
//! and shrink it by whatever the probe proves. Simplified from the teacher's
//! sandboxed implementation (`cdb/vivify.rs`, which propagates inside a
//! separate scratch trail) to reuse this crate's real `AssignStack` and
//! `propagate` directly, since a chronological-backtracking trail is already
//! cheap to open and close at the root.
use crate::{
    assign::{propagate::propagate_ignoring, AssignIF, AssignStack},
    cdb::{AddedClause, ClauseDB},
    config::Config,
    state::{Stat, State},
    types::{flags::FlagIF, AssignReason, ClauseId, FlagClause, Lit, MaybeInconsistent, SolverError},
};

/// Run vivification over every clause still carrying `FlagClause::VIVIFY`,
/// until the queue is drained or `budget` ticks have been spent since this
/// call began.
pub fn run(asg: &mut AssignStack, cdb: &mut ClauseDB, config: &Config, state: &mut State, budget: u64) -> MaybeInconsistent {
    let checkpoint = state.ticks;
    let candidates: Vec<ClauseId> = cdb
        .iter_ids()
        .filter(|&cid| cdb.clause(cid).is(FlagClause::VIVIFY) && cdb.clause(cid).len() > 2)
        .collect();
    for cid in candidates {
        if state.ticks.saturating_sub(checkpoint) > budget {
            break;
        }
        if cdb.clause(cid).is(FlagClause::GARBAGE) {
            continue;
        }
        vivify_one(asg, cdb, config, state, cid)?;
        state.tick(8);
    }
    Ok(())
}

/// Probe one clause: assume the negation of each of its literals in turn,
/// propagating after each. A probe literal already forced true makes the
/// whole clause satisfied and safe to drop (it will simplify away at the
/// next reduction pass, so vivification itself just clears the flag); a
/// probe literal already forced false is already excluded from the clause
/// and simply dropped; an unassigned probe literal is decided and
/// propagated, and a conflict during that propagation proves the clause can
/// be replaced by the (possibly strictly shorter) prefix probed so far
/// (§4.12 steps 1-3). Propagation ignores `cid`'s own watch entries so the
/// clause under test can never satisfy itself via its own watch list.
fn vivify_one(asg: &mut AssignStack, cdb: &mut ClauseDB, config: &Config, state: &mut State, cid: ClauseId) -> MaybeInconsistent {
    let root = asg.decision_level();
    let lits = cdb.clause(cid).lits.clone();
    let mut new_lits: Vec<Lit> = Vec::new();
    let mut satisfied = false;
    let mut conflicted = false;

    for &l in &lits {
        match asg.assigned(l) {
            Some(true) => {
                satisfied = true;
                break;
            }
            Some(false) => continue,
            None => {
                new_lits.push(l);
                asg.decide(!l);
                state.tick(1);
                if propagate_ignoring(asg, cdb, state, cid).is_some() {
                    conflicted = true;
                    break;
                }
            }
        }
    }
    asg.cancel_until_chrono(root, false);

    if satisfied {
        cdb.clause_mut(cid).turn_off(FlagClause::VIVIFY);
        cdb.mark_garbage(cid);
        state[Stat::Vivify] += 1;
        return Ok(());
    }
    if !conflicted && new_lits.len() == lits.len() {
        cdb.clause_mut(cid).turn_off(FlagClause::VIVIFY);
        return Ok(());
    }

    let redundant = cdb.clause(cid).is_redundant();
    let glue = cdb.clause(cid).glue.min(new_lits.len() as u32);
    cdb.mark_garbage(cid);
    state[Stat::Vivify] += 1;
    match new_lits.len() {
        0 => Err(SolverError::EmptyClause),
        1 => {
            match asg.assigned(new_lits[0]) {
                Some(false) => Err(SolverError::Inconsistent),
                Some(true) => Ok(()),
                None => {
                    asg.assign_at_root(new_lits[0], AssignReason::None);
                    Ok(())
                }
            }
        }
        _ => {
            let _ = config;
            let added = cdb.add_clause(new_lits, redundant, glue)?;
            if let AddedClause::Unit(lit) = added {
                if asg.assigned(lit).is_none() {
                    asg.assign_at_root(lit, AssignReason::None);
                }
            }
            Ok(())
        }
    }
}
