//! The top-level CDCL loop (§4 "Phase" state machine, §5 "End-to-end flow").
use {
    super::{analyze, analyze::Analysis, validate, vivify, Certificate, Solver, SolverResult},
    crate::{
        assign::{propagate::propagate, select, trail_saving, AssignIF, Mode},
        cdb::{AddedClause, ConflictRef},
        processor::eliminate,
        state::{Stat, StateIF},
        types::{AssignReason, SolverError},
    },
};

/// API to [`solve`](SolveIF::solve) a SAT problem out of a built [`Solver`].
pub trait SolveIF {
    fn solve(&mut self) -> SolverResult;
}

impl SolveIF for Solver {
    fn solve(&mut self) -> SolverResult {
        self.state.progress_header();
        self.state.progress(self.asg.num_vars(), self.asg.num_assigned(), self.cdb.len(), self.rst.glue_trend());
        self.state.flush("searching...");

        loop {
            match propagate(&mut self.asg, &mut self.cdb, &mut self.state) {
                Some(conflict) => {
                    if self.asg.decision_level() == 0 {
                        self.state.status = crate::state::SolverStatus::Unsatisfiable;
                        return Ok(Certificate::UNSAT);
                    }
                    if let Err(e) = self.handle_conflict(conflict) {
                        return match e {
                            SolverError::EmptyClause | SolverError::Inconsistent => {
                                self.state.status = crate::state::SolverStatus::Unsatisfiable;
                                Ok(Certificate::UNSAT)
                            }
                            other => Err(other),
                        };
                    }
                }
                None => {
                    if self.asg.num_assigned() >= self.asg.num_vars() {
                        return Ok(self.build_certificate());
                    }
                    self.mode_switch.on_new_assignment_record(&mut self.asg);
                    if let Some(cert) = self.maybe_inprocess()? {
                        return Ok(cert);
                    }
                    self.decide();
                }
            }
        }
    }
}

impl Solver {
    /// Analyze one conflict, learn and attach its clause, and backjump
    /// (with chronological reuse when enabled), asserting the new unit
    /// implied by the learnt clause (§4.5, §4.6).
    fn handle_conflict(&mut self, conflict: ConflictRef) -> crate::types::MaybeInconsistent {
        let config = self.state.config.clone();
        let conflict_level = self.asg.decision_level();
        self.state[Stat::Conflict] += 1;

        let analysis = analyze::analyze_conflict(&mut self.asg, &mut self.cdb, &config, conflict);
        let (learnt, backjump, glue) = match analysis {
            Analysis::Forced { level, lit, reason } => {
                self.asg.cancel_until_chrono(level, false);
                if self.asg.assigned(lit) == Some(false) {
                    return Err(SolverError::Inconsistent);
                }
                if self.asg.assigned(lit).is_none() {
                    self.asg.assign(lit, level, reason);
                }
                return Ok(());
            }
            Analysis::Learnt(learnt, backjump, glue) => (learnt, backjump, glue),
        };

        self.state.c_lvl.update(conflict_level as f64);
        self.state.b_lvl.update(backjump as f64);
        let trail_fill = self.asg.num_assigned() as f64 / self.asg.num_vars().max(1) as f64;
        self.rst.update(glue as f64, conflict_level as f64, trail_fill);

        for &l in &learnt {
            self.elim.mark(&mut self.asg, l.vi());
        }

        if learnt.len() == 1 {
            self.asg.cancel_until_chrono(0, false);
            let lit = learnt[0];
            if self.asg.assigned(lit) == Some(false) {
                return Err(SolverError::Inconsistent);
            }
            if self.asg.assigned(lit).is_none() {
                self.asg.assign_at_root(lit, AssignReason::None);
            }
            return Ok(());
        }

        let target = if config.use_chrono_backtrack {
            trail_saving::reuse_trail_level(&self.asg, backjump, config.chrono_threshold)
        } else {
            backjump
        };
        let chronological = target > backjump;
        self.asg.cancel_until_chrono(target, chronological);

        let added = self.cdb.add_clause(learnt.clone(), true, glue)?;
        match added {
            AddedClause::Unit(lit) => {
                if self.asg.assigned(lit).is_none() {
                    self.asg.assign_at_root(lit, AssignReason::None);
                }
            }
            AddedClause::Binary(l0, _l1) => {
                if self.asg.assigned(l0).is_none() {
                    self.asg.assign(l0, target, AssignReason::Binary { other: learnt[1], redundant: true });
                }
            }
            AddedClause::Large(cid) => {
                if self.asg.assigned(learnt[0]).is_none() {
                    self.asg.assign(learnt[0], target, AssignReason::Large(cid));
                }
            }
        }
        Ok(())
    }

    /// Restart, mode switch/rephase, and the three inprocessing passes
    /// (reduce/eliminate/vivify), each gated by its own schedule and
    /// `Config` switch. Only called between conflicts, at decision level 0
    /// or above with a drained propagation queue (§4.7, §4.8, §4.9-4.12).
    fn maybe_inprocess(&mut self) -> Result<Option<Certificate>, SolverError> {
        let config = self.state.config.clone();

        if self.rst.should_restart(self.asg.mode, &config) {
            // §4.7: reuse-trail applies to restarts the same way it applies
            // to conflict backjumps (§4.5 step 7).
            let target = if config.use_chrono_backtrack {
                trail_saving::reuse_trail_level(&self.asg, 0, config.chrono_threshold)
            } else {
                0
            };
            self.asg.cancel_until_chrono(target, target > 0);
            self.rst.restart_fired(self.asg.mode, &config, &mut self.state);
            return Ok(None);
        }

        if config.use_stabilize && self.mode_switch.stage_due(&self.state) {
            self.mode_switch.switch(&mut self.asg, &mut self.rst, &config, &mut self.state);
        }
        if config.use_rephase && self.mode_switch.rephase_due(&self.state) {
            self.mode_switch.rephase(&mut self.asg, &mut self.state);
        }

        if self.asg.decision_level() > 0 {
            return Ok(None);
        }

        if config.use_reduce && self.state[Stat::Conflict] as u64 >= self.next_reduce {
            self.cdb.reduce(&self.asg, &config);
            self.next_reduce = self.state[Stat::Conflict] as u64 + config.reduce_interval;
        }
        if config.use_elim && self.elim.should_trigger(config.elim_trigger_marks) {
            if eliminate::run(&mut self.asg, &mut self.cdb, &mut self.elim, &config, &mut self.state).is_err() {
                self.state.status = crate::state::SolverStatus::Unsatisfiable;
                return Ok(Some(Certificate::UNSAT));
            }
        }
        if config.use_vivify && self.state[Stat::Conflict] as u64 >= self.next_vivify {
            let budget = ((self.state.ticks as f64) * config.vivify_ticks_fraction) as u64 + 10_000;
            if vivify::run(&mut self.asg, &mut self.cdb, &config, &mut self.state, budget).is_err() {
                self.state.status = crate::state::SolverStatus::Unsatisfiable;
                return Ok(Some(Certificate::UNSAT));
            }
            self.next_vivify = self.state[Stat::Conflict] as u64 + config.vivify_interval;
        }
        Ok(None)
    }

    /// Select the next decision variable and phase under the active mode
    /// and push it as a new decision level (§4.4).
    fn decide(&mut self) {
        if let Some(vi) = select::next_decision_variable(&mut self.asg) {
            let lit = select::decision_literal(&self.asg, vi);
            self.asg.decide(lit);
            self.state[Stat::Decision] += 1;
        }
    }

    /// Read off the full model, apply the extension stack to restore
    /// eliminated variables, and package it as DIMACS-signed literals
    /// (§4.10 "Extension stack", §4.13).
    fn build_certificate(&self) -> Certificate {
        let n = self.asg.num_vars();
        let mut model: Vec<Option<bool>> = vec![None; n + 1];
        for vi in 1..=n {
            model[vi] = self.asg.assigned(crate::types::Lit::from_var_index(vi, false));
        }
        self.elim.extension.extend_solution(&mut model);
        let signed: Vec<i32> = (1..=n)
            .map(|vi| {
                let v = vi as i32;
                if model[vi].unwrap_or(true) {
                    v
                } else {
                    -v
                }
            })
            .collect();
        debug_assert!(validate::validate(&self.original_clauses, &signed).is_none());
        Certificate::SAT(signed)
    }
}
