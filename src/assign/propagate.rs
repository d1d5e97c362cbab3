//! Boolean Constraint Propagation (C3, §4.3).
use {
    super::stack::AssignStack,
    crate::{
        cdb::{ClauseDB, ConflictRef},
        state::State,
        types::{AssignReason, Lit},
    },
};

/// Drain the trail from the BCP cursor, propagating each newly-assigned
/// literal by walking the watch list of its negation. Returns the first
/// conflict encountered, or `None` once the trail is fully propagated
/// (§4.3, §5 "BCP either returns a conflict or drains the trail").
pub fn propagate(asg: &mut AssignStack, cdb: &mut ClauseDB, state: &mut State) -> Option<ConflictRef> {
    propagate_ignoring_impl(asg, cdb, state, None)
}

/// Same as [`propagate`], but every watch entry belonging to `ignore` is
/// skipped entirely, as if that clause were not attached to the watch lists
/// at all. Used by vivification (§4.12 "the clause-ignoring propagate
/// interface") so the clause currently being probed cannot force its own
/// last literal true via its own watch entry and get mistaken for already
/// satisfied.
pub fn propagate_ignoring(asg: &mut AssignStack, cdb: &mut ClauseDB, state: &mut State, ignore: crate::types::ClauseId) -> Option<ConflictRef> {
    propagate_ignoring_impl(asg, cdb, state, Some(ignore))
}

fn propagate_ignoring_impl(asg: &mut AssignStack, cdb: &mut ClauseDB, state: &mut State, ignore: Option<crate::types::ClauseId>) -> Option<ConflictRef> {
    while asg.q_head < asg.trail().len() {
        let p = asg.trail()[asg.q_head];
        asg.q_head += 1;
        state.tick(1);
        let falsified = !p;
        let mut i = 0;
        // manual index-walk: the list can grow (rewatches appended at the
        // tail don't need re-visiting, but a swap-remove during the walk
        // must not skip the element moved into the current slot) so we
        // re-read `cdb.watchers[falsified]` length each iteration instead
        // of using an iterator.
        while i < cdb.watchers[falsified.as_index()].len() {
            let w = cdb.watchers[falsified.as_index()][i];
            if !w.binary && Some(w.cid) == ignore {
                i += 1;
                continue;
            }
            if asg.assigned(w.blocker) == Some(true) {
                i += 1;
                continue;
            }
            if w.binary {
                match asg.assigned(w.blocker) {
                    Some(false) => {
                        return Some(ConflictRef::Binary(falsified, w.blocker, w.redundant));
                    }
                    None => {
                        let level = asg.decision_level();
                        asg.assign(w.blocker, level, AssignReason::Binary {
                            other: falsified,
                            redundant: w.redundant,
                        });
                        i += 1;
                    }
                    Some(true) => unreachable!(),
                }
                continue;
            }
            state.tick(1);
            let cid = w.cid;
            let (level, conflict_or_unit) = rewatch_long(asg, cdb, falsified, cid);
            match conflict_or_unit {
                RewatchOutcome::StillWatched => i += 1,
                RewatchOutcome::Moved => {
                    // swap-removed in place; don't advance `i`, the element
                    // now at `i` hasn't been visited yet.
                }
                RewatchOutcome::Unit(lit) => {
                    // no replacement watch found: the clause keeps
                    // watching `falsified`, and `lit` (the clause's other
                    // watched literal) is now forced.
                    asg.assign(lit, level, AssignReason::Large(cid));
                    i += 1;
                }
                RewatchOutcome::Conflict => {
                    return Some(ConflictRef::Long(cid));
                }
            }
        }
    }
    None
}

enum RewatchOutcome {
    StillWatched,
    Moved,
    Unit(Lit),
    Conflict,
}

/// Handle one long-clause watch hit: find a replacement watch, propagate a
/// forced literal, or report a conflict (§4.3 third bullet).
fn rewatch_long(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    falsified: Lit,
    cid: crate::types::ClauseId,
) -> (crate::types::DecisionLevel, RewatchOutcome) {
    let clause = cdb.clause_mut(cid);
    // normalize so `clause[0]` is the watch slot that just got falsified.
    if clause[0] != falsified {
        clause.lits.swap(0, 1);
    }
    let other = clause[1];
    if asg.assigned(other) == Some(true) {
        crate::cdb::watch::update_blocker(&mut cdb.watchers, falsified, cid, other);
        return (0, RewatchOutcome::StillWatched);
    }
    let len = cdb.clause(cid).len();
    let start = cdb.clause(cid).search_from.max(2);
    let mut found = None;
    for off in 0..len.saturating_sub(2) {
        let k = 2 + (start - 2 + off) % (len - 2);
        let lit = cdb.clause(cid)[k];
        if asg.assigned(lit) != Some(false) {
            found = Some((k, lit));
            break;
        }
    }
    if let Some((k, lit)) = found {
        let clause = cdb.clause_mut(cid);
        clause.lits.swap(0, k);
        clause.search_from = k + 1;
        let l0 = clause[0];
        crate::cdb::watch::detach_long(&mut cdb.watchers, falsified, cid);
        cdb.watchers[l0.as_index()].push(crate::cdb::Watch::long(cid, other));
        return (0, RewatchOutcome::Moved);
    }
    // no replacement: `other` is the only remaining candidate.
    match asg.assigned(other) {
        Some(false) => (0, RewatchOutcome::Conflict),
        None => (asg.decision_level(), RewatchOutcome::Unit(other)),
        Some(true) => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cdb::ClauseDB,
        config::Config,
        state::State,
        types::{CNFDescription, Instantiate, Lit},
    };

    fn fresh(n: usize) -> (AssignStack, ClauseDB, State) {
        let config = Config::default();
        let cnf = CNFDescription { num_of_variables: n, ..CNFDescription::default() };
        (
            AssignStack::instantiate(&config, &cnf),
            ClauseDB::instantiate(&config, &cnf),
            State::instantiate(&config, &cnf),
        )
    }

    fn lit(i: i32) -> Lit {
        Lit::try_from(i).unwrap()
    }

    #[test]
    fn ignored_clause_cannot_force_its_own_last_literal() {
        // clause (1 2 3): decide !1 and !2, leaving only 3 unassigned; an
        // ordinary propagate would force 3 true using this clause as its own
        // reason, but propagate_ignoring must leave it untouched.
        let (mut asg, mut cdb, mut state) = fresh(3);
        let added = cdb.add_clause(vec![lit(1), lit(2), lit(3)], false, 0).unwrap();
        let cid = match added {
            crate::cdb::AddedClause::Large(cid) => cid,
            _ => panic!("expected a long clause"),
        };
        asg.decide(!lit(1));
        assert!(propagate_ignoring(&mut asg, &mut cdb, &mut state, cid).is_none());
        asg.decide(!lit(2));
        assert!(propagate_ignoring(&mut asg, &mut cdb, &mut state, cid).is_none());
        assert_eq!(asg.assigned(lit(3)), None, "clause under probe must not self-satisfy");
    }

    #[test]
    fn ordinary_propagate_does_force_the_last_literal() {
        let (mut asg, mut cdb, mut state) = fresh(3);
        cdb.add_clause(vec![lit(1), lit(2), lit(3)], false, 0).unwrap();
        asg.decide(!lit(1));
        assert!(propagate(&mut asg, &mut cdb, &mut state).is_none());
        asg.decide(!lit(2));
        assert!(propagate(&mut asg, &mut cdb, &mut state).is_none());
        assert_eq!(asg.assigned(lit(3)), Some(true));
    }
}
