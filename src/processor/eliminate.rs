//! Bounded variable elimination by resolution (C10, §4.10).
use {
    super::{heap::ElimHeap, subsume, ExtensionStack},
    crate::{
        assign::{AssignIF, AssignStack},
        cdb::ClauseDB,
        config::Config,
        state::{Stat, State},
        types::{flags::FlagIF, AssignReason, ClauseId, FlagVar, Lit, MaybeInconsistent, SolverError},
    },
};

pub struct Eliminator {
    pub candidates: ElimHeap,
    pub extension: ExtensionStack,
    marks: usize,
}

impl Eliminator {
    pub fn new(n: usize) -> Eliminator {
        Eliminator {
            candidates: ElimHeap::new(n),
            extension: ExtensionStack::default(),
            marks: 0,
        }
    }

    pub fn expand_to(&mut self, vi: usize) {
        self.candidates.expand_to(vi);
    }

    /// queue `vi` for elimination consideration and count the mark toward
    /// the trigger threshold (§4.10 "Trigger: accumulated elimination-
    /// candidate marks exceed a threshold").
    pub fn mark(&mut self, asg: &mut AssignStack, vi: usize) {
        if !asg.vars[vi].is(FlagVar::ELIM_CANDIDATE) {
            asg.vars[vi].set(FlagVar::ELIM_CANDIDATE, true);
            self.candidates.push(vi);
            self.marks += 1;
        }
    }

    pub fn should_trigger(&self, threshold: usize) -> bool {
        self.marks >= threshold
    }

    pub fn reset_marks(&mut self) {
        self.marks = 0;
    }
}

/// a clause occurrence, named so a virtual binary doesn't need to be
/// materialized just to be read during resolution.
#[derive(Clone, Copy, Debug)]
enum Occ {
    Long(ClauseId),
    Binary(Lit),
}

fn gather(cdb: &ClauseDB, lit: Lit) -> Vec<Occ> {
    let mut v: Vec<Occ> = cdb.occurrences(lit).iter().copied().map(Occ::Long).collect();
    v.extend(cdb.watchers[lit.as_index()].iter().filter(|w| w.binary).map(|w| Occ::Binary(w.blocker)));
    v
}

fn occ_lits(cdb: &ClauseDB, lit: Lit, occ: Occ) -> Vec<Lit> {
    match occ {
        Occ::Long(cid) => cdb.clause(cid).lits.clone(),
        Occ::Binary(other) => vec![lit, other],
    }
}

fn remove_occ(asg: &mut AssignStack, cdb: &mut ClauseDB, lit: Lit, occ: Occ) {
    match occ {
        Occ::Long(cid) => cdb.mark_garbage(cid),
        Occ::Binary(other) => cdb.delete_binary(lit, other),
    }
    let _ = asg;
}

/// Run one full elimination round: backtrack to root, densify, subsume,
/// try every queued candidate, then return to sparse watches (§4.10
/// procedure steps 1-5).
pub fn run(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    elim: &mut Eliminator,
    config: &Config,
    state: &mut State,
) -> MaybeInconsistent {
    asg.flush_root_units();
    cdb.switch_to_dense();
    let checkpoint = state.ticks;
    if config.use_subsume {
        subsume::run(asg, cdb, &mut elim.candidates, config, state, (config.subsume_ticks_fraction * 1e6) as u64)?;
    }
    let budget = ((state.ticks.saturating_sub(checkpoint) + 1) as f64 * config.elim_ticks_fraction) as u64 + 1_000;
    let round_start = state.ticks;
    while let Some(vi) = elim.candidates.pop() {
        if state.ticks.saturating_sub(round_start) > budget {
            elim.candidates.push(vi);
            break;
        }
        if !asg.is_active(vi) {
            continue;
        }
        try_eliminate(asg, cdb, elim, vi, config, state)?;
        state.tick(4);
    }
    elim.reset_marks();
    cdb.collect_garbage();
    cdb.switch_to_sparse();
    Ok(())
}

fn try_eliminate(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    elim: &mut Eliminator,
    vi: usize,
    config: &Config,
    state: &mut State,
) -> MaybeInconsistent {
    let pos = Lit::from_var_index(vi, false);
    let neg = Lit::from_var_index(vi, true);
    let pos_occ = gather(cdb, pos);
    let neg_occ = gather(cdb, neg);
    if pos_occ.len() > config.elim_occ_limit || neg_occ.len() > config.elim_occ_limit {
        return Ok(());
    }

    let mut resolvents: Vec<Vec<Lit>> = Vec::new();
    for &p in &pos_occ {
        let p_lits = occ_lits(cdb, pos, p);
        for &n in &neg_occ {
            let n_lits = occ_lits(cdb, neg, n);
            let mut merged: Vec<Lit> = p_lits.iter().copied().filter(|&l| l != pos).collect();
            merged.extend(n_lits.iter().copied().filter(|&l| l != neg));
            merged.sort_unstable();
            merged.dedup();
            let tautology = merged.windows(2).any(|w| w[1] == !w[0]);
            if !tautology {
                resolvents.push(merged);
            }
        }
    }
    if resolvents.len() > pos_occ.len() + neg_occ.len() + config.elim_grow_limit {
        return Ok(());
    }

    // commit: add resolvents, record the extension stack, remove the
    // original occurrences, and mark the variable eliminated.
    let (kept_lit, kept_occ, dropped_lit) = if pos_occ.len() <= neg_occ.len() {
        (pos, &pos_occ, neg)
    } else {
        (neg, &neg_occ, pos)
    };
    if kept_occ.is_empty() {
        elim.extension.push_block(kept_lit, Vec::new());
    } else {
        for &occ in kept_occ {
            let mut rest = occ_lits(cdb, kept_lit, occ);
            rest.retain(|&l| l != kept_lit);
            elim.extension.push_block(kept_lit, rest);
        }
    }
    let _ = dropped_lit;

    for resolvent in resolvents {
        if resolvent.is_empty() {
            return Err(SolverError::EmptyClause);
        }
        if resolvent.len() == 1 {
            match asg.assigned(resolvent[0]) {
                Some(false) => return Err(SolverError::Inconsistent),
                None => asg.assign_at_root(resolvent[0], AssignReason::None),
                Some(true) => {}
            }
            continue;
        }
        cdb.add_clause(resolvent, false, 0)?;
    }

    for &occ in &pos_occ {
        remove_occ(asg, cdb, pos, occ);
    }
    for &occ in &neg_occ {
        remove_occ(asg, cdb, neg, occ);
    }
    asg.vars[vi].set(FlagVar::ELIMINATED, true);
    asg.heap.remove(&mut asg.vars, vi);
    asg.vmtf.discard(vi);
    state[Stat::Eliminate] += 1;
    Ok(())
}
