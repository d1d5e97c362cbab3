//! The clause arena and its watch lists, sparse and dense (C1, §4.1, §4.9).
use {
    super::{
        clause::Clause,
        watch::{self, Watch, WatchList},
    },
    crate::{
        assign::AssignIF,
        config::Config,
        proof::{NullProof, ProofIF},
        types::{flags::FlagIF, AssignReason, CNFDescription, ClauseId, FlagClause, Instantiate, Lit, SolverError},
    },
};

/// Sparse/Dense watch-list organization (§4.1 "Dense mode", state machine
/// "Dense/Sparse").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WatchMode {
    Sparse,
    Dense,
}

/// What `ClauseDB::add_clause` produced, so the caller (`solver::build`,
/// conflict analysis, elimination) knows what follow-up action is needed.
#[derive(Clone, Copy, Debug)]
pub enum AddedClause {
    Unit(Lit),
    Binary(Lit, Lit),
    Large(ClauseId),
}

pub struct ClauseDB {
    /// slot `0` is an unused placeholder so arena indices double as
    /// `ClauseId` ordinals (which start at one) without an offset.
    clauses: Vec<Clause>,
    pub watchers: Vec<WatchList>,
    /// dense-mode occurrence lists, long clauses only (§4.1: binary
    /// occurrences are already enumerable from `watchers` itself).
    occur: Vec<Vec<ClauseId>>,
    mode: WatchMode,
    pub num_irredundant: usize,
    pub num_learnt: usize,
    pub proof: Box<dyn ProofIF>,
}

impl Instantiate for ClauseDB {
    fn instantiate(_config: &Config, cnf: &CNFDescription) -> ClauseDB {
        let n = cnf.num_of_variables;
        ClauseDB {
            clauses: vec![Clause::new(vec![Lit::INVALID, Lit::INVALID], false, 0)],
            watchers: vec![Vec::new(); 2 * (n + 1)],
            occur: Vec::new(),
            mode: WatchMode::Sparse,
            num_irredundant: 0,
            num_learnt: 0,
            proof: Box::new(NullProof),
        }
    }
}

impl ClauseDB {
    pub fn expand_to(&mut self, vi: usize) {
        if 2 * (vi + 1) > self.watchers.len() {
            self.watchers.resize(2 * (vi + 1), Vec::new());
        }
    }

    pub fn mode(&self) -> WatchMode {
        self.mode
    }

    #[inline]
    pub fn clause(&self, cid: ClauseId) -> &Clause {
        &self.clauses[usize::from(cid)]
    }

    #[inline]
    pub fn clause_mut(&mut self, cid: ClauseId) -> &mut Clause {
        &mut self.clauses[usize::from(cid)]
    }

    pub fn len(&self) -> usize {
        self.clauses.len() - 1
    }

    /// iterate live (non-garbage) clause ids, arena order.
    pub fn iter_ids(&self) -> impl Iterator<Item = ClauseId> + '_ {
        (1..self.clauses.len())
            .map(ClauseId::from)
            .filter(move |&cid| !self.clause(cid).is(FlagClause::GARBAGE))
    }

    /// Register a new clause. Empty clauses are rejected here; unit and
    /// binary clauses are not allocated in the arena (§4.1 "Binary clauses
    /// are virtual by default").
    pub fn add_clause(&mut self, lits: Vec<Lit>, redundant: bool, glue: u32) -> Result<AddedClause, SolverError> {
        match lits.len() {
            0 => Err(SolverError::EmptyClause),
            1 => {
                self.proof.add_clause(&lits);
                Ok(AddedClause::Unit(lits[0]))
            }
            2 => {
                let (l0, l1) = (lits[0], lits[1]);
                self.attach_binary(l0, l1, redundant);
                self.proof.add_clause(&lits);
                if redundant {
                    self.num_learnt += 1;
                } else {
                    self.num_irredundant += 1;
                }
                Ok(AddedClause::Binary(l0, l1))
            }
            _ => {
                self.proof.add_clause(&lits);
                let (l0, l1) = (lits[0], lits[1]);
                let mut clause = Clause::new(lits, redundant, glue);
                clause.turn_on(FlagClause::VIVIFY);
                self.clauses.push(clause);
                let cid = ClauseId::from(self.clauses.len() - 1);
                self.attach_long(cid, l0, l1);
                if self.mode == WatchMode::Dense && !redundant {
                    self.link_occur(cid);
                }
                if redundant {
                    self.num_learnt += 1;
                } else {
                    self.num_irredundant += 1;
                }
                Ok(AddedClause::Large(cid))
            }
        }
    }

    pub fn attach_binary(&mut self, l0: Lit, l1: Lit, redundant: bool) {
        self.watchers[l0.as_index()].push(Watch::binary(l1, redundant));
        self.watchers[l1.as_index()].push(Watch::binary(l0, redundant));
    }

    fn attach_long(&mut self, cid: ClauseId, l0: Lit, l1: Lit) {
        self.watchers[l0.as_index()].push(Watch::long(cid, l1));
        self.watchers[l1.as_index()].push(Watch::long(cid, l0));
    }

    fn link_occur(&mut self, cid: ClauseId) {
        if self.occur.len() < self.watchers.len() {
            self.occur.resize(self.watchers.len(), Vec::new());
        }
        let lits = self.clause(cid).lits.clone();
        for l in lits {
            self.occur[l.as_index()].push(cid);
        }
    }

    pub fn delete_binary(&mut self, l0: Lit, l1: Lit) {
        watch::detach_binary(&mut self.watchers, l0, l1);
        watch::detach_binary(&mut self.watchers, l1, l0);
        self.proof.delete_clause(&[l0, l1]);
    }

    /// mark a long clause garbage; watch-list and occur-list cleanup happen
    /// during [`Self::collect_garbage`] (§4.2, §4.9 "watch lists are swept
    /// for garbage references").
    pub fn mark_garbage(&mut self, cid: ClauseId) {
        let c = self.clause_mut(cid);
        if c.is(FlagClause::GARBAGE) {
            return;
        }
        c.turn_on(FlagClause::GARBAGE);
        let redundant = c.is_redundant();
        let lits = c.lits.clone();
        self.proof.delete_clause(&lits);
        if redundant {
            self.num_learnt -= 1;
        } else {
            self.num_irredundant -= 1;
        }
    }

    /// remove stale watch entries pointing at garbage clauses; clause
    /// slots themselves are left allocated with their flag set so no
    /// `ClauseId` is ever relocated (§5 "any relocation invalidates these
    /// references and must be followed by a full rebuild of watches" — we
    /// avoid relocation entirely instead).
    pub fn collect_garbage(&mut self) {
        for list in self.watchers.iter_mut() {
            list.retain(|w| w.binary || !self.clauses[usize::from(w.cid)].is(FlagClause::GARBAGE));
        }
        for list in self.occur.iter_mut() {
            list.retain(|&cid| !self.clauses[usize::from(cid)].is(FlagClause::GARBAGE));
        }
        for c in self.clauses.iter_mut().skip(1) {
            if c.is(FlagClause::GARBAGE) {
                c.lits.clear();
            }
        }
    }

    /// §4.9: candidates are redundant long clauses not used since the last
    /// reduction; tier-2 (low glue) clauses get `reduce_tier2_lives`
    /// reprieves before becoming eligible; the worst `reduce_fraction` of
    /// the remaining eligible set (sorted worst-first by `(glue, size)`) is
    /// discarded, skipping anything currently a reason on the trail.
    pub fn reduce<A: AssignIF>(&mut self, asg: &A, config: &Config) {
        for vi in 1..asg.num_vars() + 1 {
            if let AssignReason::Large(cid) = asg.reason_of(vi) {
                self.clause_mut(cid).turn_on(FlagClause::PROTECTED);
            }
        }
        let mut candidates: Vec<ClauseId> = self
            .iter_ids()
            .filter(|&cid| {
                let c = self.clause(cid);
                c.is_redundant() && !c.is(FlagClause::PROTECTED) && c.len() > 2
            })
            .collect();
        candidates.retain(|&cid| {
            let c = self.clause_mut(cid);
            if c.glue <= config.reduce_tier2_glue && c.used < config.reduce_tier2_lives {
                c.used += 1;
                false
            } else {
                true
            }
        });
        candidates.sort_unstable_by(|&a, &b| {
            let ca = self.clause(a);
            let cb = self.clause(b);
            (cb.glue, cb.len()).cmp(&(ca.glue, ca.len()))
        });
        let discard = (candidates.len() as f64 * config.reduce_fraction) as usize;
        for &cid in candidates.iter().take(discard) {
            self.mark_garbage(cid);
        }
        self.collect_garbage();
        for vi in 1..asg.num_vars() + 1 {
            if let AssignReason::Large(cid) = asg.reason_of(vi) {
                self.clause_mut(cid).turn_off(FlagClause::PROTECTED);
            }
        }
    }

    /// §4.1 "Dense mode": drop redundant long clauses from consideration
    /// entirely and link irredundant ones (plus whatever virtual binaries
    /// already live in `watchers`) into occurrence lists.
    pub fn switch_to_dense(&mut self) {
        self.mode = WatchMode::Dense;
        self.occur = vec![Vec::new(); self.watchers.len()];
        let ids: Vec<ClauseId> = self.iter_ids().filter(|&cid| !self.clause(cid).is_redundant() && self.clause(cid).len() > 2).collect();
        for cid in ids {
            self.link_occur(cid);
        }
    }

    /// §4.1 "Transitioning dense -> sparse restores two-literal watches".
    pub fn switch_to_sparse(&mut self) {
        for list in self.watchers.iter_mut() {
            list.retain(|w| w.binary);
        }
        let ids: Vec<ClauseId> = self.iter_ids().filter(|&cid| self.clause(cid).len() > 2).collect();
        for cid in ids {
            let (l0, l1) = {
                let c = self.clause(cid);
                (c.lits[0], c.lits[1])
            };
            self.attach_long(cid, l0, l1);
        }
        self.occur.clear();
        self.mode = WatchMode::Sparse;
    }

    pub fn occurrences(&self, lit: Lit) -> &[ClauseId] {
        self.occur.get(lit.as_index()).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CNFDescription;

    fn fresh(n: usize) -> ClauseDB {
        ClauseDB::instantiate(&Config::default(), &CNFDescription { num_of_variables: n, ..CNFDescription::default() })
    }

    fn lits(raw: &[i32]) -> Vec<Lit> {
        raw.iter().map(|&i| Lit::try_from(i).unwrap()).collect()
    }

    #[test]
    fn binary_clauses_are_virtual_and_never_allocated_in_the_arena() {
        let mut cdb = fresh(2);
        let added = cdb.add_clause(lits(&[1, 2]), false, 0).unwrap();
        assert!(matches!(added, AddedClause::Binary(_, _)));
        assert_eq!(cdb.len(), 0, "a binary clause must not consume an arena slot");
        let l1 = Lit::try_from(1).unwrap();
        let l2 = Lit::try_from(2).unwrap();
        assert!(cdb.watchers[l1.as_index()].iter().any(|w| w.binary && w.blocker == l2));
        assert!(cdb.watchers[l2.as_index()].iter().any(|w| w.binary && w.blocker == l1));
    }

    #[test]
    fn long_clause_is_watched_on_its_first_two_literals() {
        let mut cdb = fresh(3);
        let added = cdb.add_clause(lits(&[1, 2, 3]), false, 0).unwrap();
        let cid = match added {
            AddedClause::Large(cid) => cid,
            _ => panic!("expected a long clause"),
        };
        let l1 = Lit::try_from(1).unwrap();
        let l2 = Lit::try_from(2).unwrap();
        let l3 = Lit::try_from(3).unwrap();
        assert!(cdb.watchers[l1.as_index()].iter().any(|w| !w.binary && w.cid == cid));
        assert!(cdb.watchers[l2.as_index()].iter().any(|w| !w.binary && w.cid == cid));
        assert!(!cdb.watchers[l3.as_index()].iter().any(|w| !w.binary && w.cid == cid));
    }

    #[test]
    fn garbage_collection_drops_stale_watch_entries() {
        let mut cdb = fresh(3);
        let added = cdb.add_clause(lits(&[1, 2, 3]), true, 2).unwrap();
        let cid = match added {
            AddedClause::Large(cid) => cid,
            _ => panic!("expected a long clause"),
        };
        cdb.mark_garbage(cid);
        cdb.collect_garbage();
        let l1 = Lit::try_from(1).unwrap();
        assert!(!cdb.watchers[l1.as_index()].iter().any(|w| !w.binary && w.cid == cid));
    }

    #[test]
    fn dense_sparse_round_trip_restores_two_literal_watches() {
        let mut cdb = fresh(3);
        let added = cdb.add_clause(lits(&[1, 2, 3]), false, 0).unwrap();
        let cid = match added {
            AddedClause::Large(cid) => cid,
            _ => panic!("expected a long clause"),
        };
        cdb.switch_to_dense();
        assert_eq!(cdb.mode(), WatchMode::Dense);
        assert!(cdb.occurrences(Lit::try_from(1).unwrap()).contains(&cid));
        cdb.switch_to_sparse();
        assert_eq!(cdb.mode(), WatchMode::Sparse);
        let l1 = Lit::try_from(1).unwrap();
        assert!(cdb.watchers[l1.as_index()].iter().any(|w| !w.binary && w.cid == cid));
    }
}
