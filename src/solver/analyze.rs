//! First-UIP conflict analysis, clause minimization, and backjump-level
//! selection (C5, §4.5).
use crate::{
    assign::{AssignIF, AssignStack},
    cdb::{compute_glue, ClauseDB, ConflictRef},
    config::Config,
    types::{flags::FlagIF, AssignReason, DecisionLevel, FlagVar, Lit},
};

/// the two literals of a conflicting clause/binary, read uniformly without
/// an arena lookup for the binary case.
fn conflict_lits(cdb: &ClauseDB, conflict: ConflictRef) -> Vec<Lit> {
    match conflict {
        ConflictRef::Binary(l0, l1, _) => vec![l0, l1],
        ConflictRef::Long(cid) => cdb.clause(cid).lits.clone(),
    }
}

/// the reason a conflicting clause/binary would hand to the single literal
/// of itself sitting at its own maximum level, once every other literal is
/// false at a level below that (§4.5 step 1's forced-literal shortcut).
fn conflict_reason(conflict: ConflictRef, forced: Lit) -> AssignReason {
    match conflict {
        ConflictRef::Binary(l0, l1, redundant) => {
            let other = if l0 == forced { l1 } else { l0 };
            AssignReason::Binary { other, redundant }
        }
        ConflictRef::Long(cid) => AssignReason::Large(cid),
    }
}

/// every literal of the clause that made `vi` true, other than `vi` itself
/// (§4.5 step 2 "resolve against the reason clause of the next literal on
/// the trail"). Found by position, not by a fixed index, since a long
/// clause's asserted literal isn't always at a specific slot once it has
/// been rewatched (see `assign::propagate::rewatch_long`).
fn reason_literals(asg: &AssignStack, cdb: &ClauseDB, vi: usize) -> Vec<Lit> {
    match asg.reason_of(vi) {
        AssignReason::None => Vec::new(),
        AssignReason::Binary { other, .. } => vec![other],
        AssignReason::Large(cid) => cdb
            .clause(cid)
            .lits
            .iter()
            .copied()
            .filter(|l| l.vi() != vi)
            .collect(),
    }
}

/// fold one clause's literals into the learnt clause under construction:
/// anything already at level 0 is dropped (it's permanently true on the
/// opposite polarity and contributes nothing), anything on the current
/// decision level bumps `path_cnt` instead of joining `learnt` directly
/// (it will be resolved away, or become the UIP), everything else is a
/// candidate literal of the learnt clause (§4.5 step 2).
fn add_resolvent(
    asg: &mut AssignStack,
    lits: &[Lit],
    current_level: DecisionLevel,
    learnt: &mut Vec<Lit>,
    touched: &mut Vec<usize>,
    path_cnt: &mut usize,
) {
    for &l in lits {
        let vi = l.vi();
        if asg.vars[vi].is(FlagVar::SEEN) {
            continue;
        }
        if asg.level_of(vi) == 0 {
            continue;
        }
        asg.vars[vi].turn_on(FlagVar::SEEN);
        touched.push(vi);
        if asg.level_of(vi) >= current_level {
            *path_cnt += 1;
        } else {
            learnt.push(!l);
        }
    }
}

/// Walk the trail backward from the conflict, resolving against each
/// newly-implied literal's reason until exactly one literal of the current
/// decision level remains unresolved (the first UIP, §4.5 step 2). Returns
/// the learnt clause (UIP negation at index 0, in no particular order
/// otherwise) and every variable marked `SEEN` along the way. `current_level`
/// is the conflict clause's own maximum level (§4.5 step 1), which can sit
/// below `asg.decision_level()` when chronological trail reuse has left
/// lower-level literals positioned late on the trail.
fn first_uip(asg: &mut AssignStack, cdb: &ClauseDB, conflict: ConflictRef, current_level: DecisionLevel) -> (Vec<Lit>, Vec<usize>) {
    let mut learnt: Vec<Lit> = Vec::new();
    let mut touched: Vec<usize> = Vec::new();
    let mut path_cnt = 0usize;

    let lits = conflict_lits(cdb, conflict);
    add_resolvent(asg, &lits, current_level, &mut learnt, &mut touched, &mut path_cnt);

    let mut idx = asg.trail().len();
    let uip_lit;
    loop {
        idx -= 1;
        let p = asg.trail()[idx];
        let vi = p.vi();
        if !asg.vars[vi].is(FlagVar::SEEN) {
            continue;
        }
        path_cnt -= 1;
        if path_cnt == 0 {
            uip_lit = p;
            break;
        }
        let parents = reason_literals(asg, cdb, vi);
        add_resolvent(asg, &parents, current_level, &mut learnt, &mut touched, &mut path_cnt);
    }
    learnt.insert(0, !uip_lit);
    (learnt, touched)
}

const ABSTRACT_LEVEL_BITS: u32 = 64;

fn abstract_level(level: DecisionLevel) -> u64 {
    1u64 << (level % ABSTRACT_LEVEL_BITS)
}

/// Can `lit` be dropped from the learnt clause because every literal it
/// would otherwise contribute is already implied by the clause's other
/// literals? Minisat-style recursive self-subsumption check, memoized
/// through `FlagVar::REMOVABLE`/`FlagVar::POISONED` so repeated queries
/// during one `minimize` call are O(1) after the first resolution
/// (§4.5 step 3).
fn literal_redundant(
    asg: &mut AssignStack,
    cdb: &ClauseDB,
    lit: Lit,
    abstract_levels: u64,
    stack: &mut Vec<Lit>,
    memoized: &mut Vec<usize>,
) -> bool {
    let vi = lit.vi();
    if asg.vars[vi].is(FlagVar::REMOVABLE) {
        return true;
    }
    if asg.vars[vi].is(FlagVar::POISONED) {
        return false;
    }
    if asg.reason_of(vi).is_none() {
        asg.vars[vi].turn_on(FlagVar::POISONED);
        return false;
    }
    stack.clear();
    stack.push(lit);
    let mut to_clear = Vec::new();
    let mut ok = true;
    while let Some(top) = stack.pop() {
        let top_vi = top.vi();
        let parents = reason_literals(asg, cdb, top_vi);
        for parent in parents {
            let pv = parent.vi();
            if pv == vi || asg.vars[pv].is(FlagVar::SEEN) {
                continue;
            }
            if asg.level_of(pv) == 0 {
                continue;
            }
            if asg.vars[pv].is(FlagVar::REMOVABLE) {
                continue;
            }
            if asg.vars[pv].is(FlagVar::POISONED) || asg.reason_of(pv).is_none() || abstract_level(asg.level_of(pv)) & abstract_levels == 0 {
                ok = false;
                break;
            }
            asg.vars[pv].turn_on(FlagVar::SEEN);
            to_clear.push(pv);
            stack.push(parent);
        }
        if !ok {
            break;
        }
    }
    for &pv in &to_clear {
        asg.vars[pv].set(if ok { FlagVar::REMOVABLE } else { FlagVar::POISONED }, true);
        asg.vars[pv].turn_off(FlagVar::SEEN);
    }
    memoized.extend_from_slice(&to_clear);
    ok
}

/// Drop every literal of `learnt` (besides the UIP at index 0) whose
/// antecedents are all already covered by the rest of the clause
/// (§4.5 step 3). `touched` must list every variable `SEEN` by
/// [`first_uip`]; the poisoned/removable marks it leaves behind here are
/// cleared before returning.
fn minimize(asg: &mut AssignStack, cdb: &ClauseDB, learnt: &mut Vec<Lit>, touched: &mut Vec<usize>) {
    let mut abstract_levels = 0u64;
    for &l in learnt.iter() {
        abstract_levels |= abstract_level(asg.level_of(l.vi()));
    }
    let mut stack = Vec::new();
    let mut memoized = Vec::new();
    let mut i = 1;
    while i < learnt.len() {
        let lit = learnt[i];
        let has_reason = !asg.reason_of(lit.vi()).is_none();
        let drop_it = has_reason && literal_redundant(asg, cdb, lit, abstract_levels, &mut stack, &mut memoized);
        if drop_it {
            learnt.swap_remove(i);
        } else {
            i += 1;
        }
    }
    for &vi in touched.iter().chain(memoized.iter()) {
        asg.vars[vi].turn_off(FlagVar::SEEN);
        asg.vars[vi].turn_off(FlagVar::REMOVABLE);
        asg.vars[vi].turn_off(FlagVar::POISONED);
    }
    touched.clear();
}

/// Find the second-highest decision level among `learnt[1..]` (the level
/// to backjump to) and move that literal into `learnt[1]` so the clause's
/// two lowest indices are exactly the pair that must stay watched
/// (§4.5 step 4, §4.1 "the first two literals are the watched pair").
fn find_backjump_level(asg: &AssignStack, learnt: &mut [Lit]) -> DecisionLevel {
    if learnt.len() < 2 {
        return 0;
    }
    let mut best = 1;
    let mut best_level = asg.level_of(learnt[1].vi());
    for i in 2..learnt.len() {
        let lvl = asg.level_of(learnt[i].vi());
        if lvl > best_level {
            best_level = lvl;
            best = i;
        }
    }
    learnt.swap(1, best);
    best_level
}

/// What conflict analysis produced: either a learnt clause to attach and
/// backjump for, or a forced literal asserted directly from the conflicting
/// clause itself with no clause learnt at all (§4.5 step 1's shortcut).
pub enum Analysis {
    Learnt(Vec<Lit>, DecisionLevel, u32),
    Forced { level: DecisionLevel, lit: Lit, reason: AssignReason },
}

/// §4.5 step 1: the conflicting clause's own maximum level, and how many of
/// its literals sit there. With chronological trail reuse this can be below
/// `asg.decision_level()`, since `cancel_until_chrono` can leave low-level
/// literals positioned late on the trail without renumbering.
fn conflict_level_info(asg: &AssignStack, lits: &[Lit]) -> (DecisionLevel, usize) {
    let max_level = lits.iter().map(|&l| asg.level_of(l.vi())).max().unwrap_or(0);
    let count = lits.iter().filter(|&&l| asg.level_of(l.vi()) == max_level).count();
    (max_level, count)
}

/// Run the whole conflict-analysis pipeline: first-UIP, minimization, VSIDS
/// and VMTF bumping, backjump-level selection, and glue computation. Both
/// decision heuristics are bumped unconditionally regardless of the active
/// mode (§4.4: "both heuristics are maintained at all times; only which one
/// is consulted for the next decision depends on the mode"), since either
/// one may become the live heuristic after the next mode switch.
///
/// Before deriving anything, recomputes the conflicting clause's own maximum
/// level (§4.5 step 1): if it is below the current decision level and
/// exactly one of its literals sits there, that literal is forced directly
/// by the conflicting clause and analysis stops without learning anything.
pub fn analyze_conflict(asg: &mut AssignStack, cdb: &mut ClauseDB, config: &Config, conflict: ConflictRef) -> Analysis {
    let lits = conflict_lits(cdb, conflict);
    let (max_level, count_at_max) = conflict_level_info(asg, &lits);
    if max_level < asg.decision_level() && count_at_max == 1 {
        let forced = *lits.iter().find(|&&l| asg.level_of(l.vi()) == max_level).unwrap();
        let second_level = lits.iter().map(|&l| asg.level_of(l.vi())).filter(|&lvl| lvl < max_level).max().unwrap_or(0);
        let reason = conflict_reason(conflict, forced);
        return Analysis::Forced { level: second_level, lit: forced, reason };
    }
    let (mut learnt, mut touched) = first_uip(asg, cdb, conflict, max_level);
    minimize(asg, cdb, &mut learnt, &mut touched);
    for &vi in &touched {
        asg.heap.bump(&mut asg.vars, vi, config.var_rescale_threshold);
        asg.vmtf.bump(vi);
    }
    asg.heap.decay_increment();
    let backjump = find_backjump_level(asg, &mut learnt);
    let mut scratch = Vec::new();
    let glue = compute_glue(asg, &learnt, &mut scratch);
    Analysis::Learnt(learnt, backjump, glue)
}
