//! Backward subsumption and self-subsuming strengthening (C11, §4.11).
use {
    super::heap::ElimHeap,
    crate::{
        assign::{AssignIF, AssignStack},
        cdb::ClauseDB,
        config::Config,
        state::State,
        types::{flags::FlagIF, AssignReason, ClauseId, FlagClause, Lit, MaybeInconsistent, SolverError},
    },
};

/// Run subsumption/strengthening until the candidate queue drains or the
/// ticks budget (`since_ticks` deltas against `state.ticks`) is spent
/// (§4.10 "Ticks budget bounds subsumption and elimination separately").
pub fn run(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    candidates: &mut ElimHeap,
    config: &Config,
    state: &mut State,
    budget: u64,
) -> MaybeInconsistent {
    let checkpoint = state.ticks;
    remove_duplicate_binaries(asg, cdb, config.subsume_clause_limit)?;
    while let Some(vi) = candidates.pop() {
        if state.ticks.saturating_sub(checkpoint) > budget {
            candidates.push(vi);
            break;
        }
        if !asg.is_active(vi) {
            continue;
        }
        for sign in [false, true] {
            let lit = Lit::from_var_index(vi, sign);
            let subsumers: Vec<ClauseId> = cdb.occurrences(lit).to_vec();
            for subsumer in subsumers {
                if cdb.clause(subsumer).is(FlagClause::GARBAGE) || cdb.clause(subsumer).is(FlagClause::SUBSUMED) {
                    continue;
                }
                if cdb.clause(subsumer).len() > config.subsume_clause_limit {
                    continue;
                }
                try_subsume_with(asg, cdb, subsumer, state)?;
                state.tick(1);
            }
        }
    }
    Ok(())
}

/// Use `subsumer` against every clause sharing its rarest literal's
/// occurrence list (§4.11: "search occurrence lists of the literal in c
/// with the smallest occurrence list").
fn try_subsume_with(asg: &mut AssignStack, cdb: &mut ClauseDB, subsumer: ClauseId, state: &mut State) -> MaybeInconsistent {
    if cdb.clause(subsumer).is(FlagClause::GARBAGE) {
        return Ok(());
    }
    let lits = cdb.clause(subsumer).lits.clone();
    let rarest = lits
        .iter()
        .copied()
        .min_by_key(|&l| cdb.occurrences(l).len())
        .expect("subsumer clause is never empty");
    let targets: Vec<ClauseId> = cdb.occurrences(rarest).to_vec();
    for d in targets {
        if d == subsumer || cdb.clause(d).is(FlagClause::GARBAGE) || cdb.clause(d).is(FlagClause::SUBSUMED) {
            continue;
        }
        let d_lits = cdb.clause(d).lits.clone();
        let mut missing = false;
        let mut clash: Option<Lit> = None;
        for &l in &lits {
            if d_lits.contains(&l) {
                continue;
            } else if d_lits.contains(&!l) {
                if clash.is_some() {
                    missing = true;
                    break;
                }
                clash = Some(!l);
            } else {
                missing = true;
                break;
            }
        }
        if missing {
            continue;
        }
        match clash {
            None => {
                cdb.clause_mut(d).turn_on(FlagClause::SUBSUMED);
                cdb.mark_garbage(d);
                state[crate::state::Stat::Subsume] += 1;
            }
            Some(bad) => strengthen(asg, cdb, d, bad, state)?,
        }
    }
    Ok(())
}

/// Remove `bad` from clause `d` (self-subsuming resolution); a ternary
/// clause becomes a virtual binary, a binary becomes a unit, an already-
/// binary clause produces the empty clause (§4.11).
fn strengthen(asg: &mut AssignStack, cdb: &mut ClauseDB, d: ClauseId, bad: Lit, state: &mut State) -> MaybeInconsistent {
    let mut lits = cdb.clause(d).lits.clone();
    lits.retain(|&l| l != bad);
    let redundant = cdb.clause(d).is_redundant();
    cdb.mark_garbage(d);
    if lits.is_empty() {
        return Err(SolverError::EmptyClause);
    }
    if lits.len() == 1 && asg.assigned(lits[0]) == Some(false) {
        return Err(SolverError::Inconsistent);
    }
    let added = cdb.add_clause(lits, redundant, 0)?;
    if let crate::cdb::AddedClause::Unit(lit) = added {
        if asg.assigned(lit).is_none() {
            asg.assign_at_root(lit, AssignReason::None);
        }
    }
    state[crate::state::Stat::Subsume] += 1;
    Ok(())
}

/// `(lit, other)`/`(lit, ¬other)` duplicate virtual binaries: the former is
/// subsumed (remove the duplicate), the latter forces `lit` true
/// (§4.11 "For virtual binaries there is a dedicated duplicate-removal
/// pass").
fn remove_duplicate_binaries(asg: &mut AssignStack, cdb: &mut ClauseDB, _limit: usize) -> MaybeInconsistent {
    for vi in 1..asg.num_vars() + 1 {
        if !asg.is_active(vi) {
            continue;
        }
        let lit = Lit::from_var_index(vi, false);
        let mut others: Vec<Lit> = cdb.watchers[lit.as_index()]
            .iter()
            .filter(|w| w.binary)
            .map(|w| w.blocker)
            .collect();
        others.sort_unstable();
        let mut i = 1;
        while i < others.len() {
            if others[i] == others[i - 1] {
                cdb.delete_binary(lit, others[i]);
            } else if others[i] == !others[i - 1] {
                match asg.assigned(lit) {
                    Some(false) => return Err(SolverError::Inconsistent),
                    None => asg.assign_at_root(lit, AssignReason::None),
                    Some(true) => {}
                }
            }
            i += 1;
        }
    }
    Ok(())
}
