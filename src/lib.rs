/*!
# A CDCL SAT solver with chronological backtracking and ticks-budgeted inprocessing

`chrono-cdcl` decides satisfiability of a propositional formula in
Conjunctive Normal Form and, if satisfiable, produces a model. It combines:

- first-UIP conflict-driven clause learning, with recursive minimization and
  second-highest-level backjumping,
- dual decision heuristics — a VSIDS binary heap for stable-mode search, a
  stamped VMTF queue for focused-mode search — bumped unconditionally on
  every conflict so either can take over after a mode switch,
- chronological backtracking with trail reuse, gated by how far above the
  asserting level the jump would otherwise unwind,
- glue/EMA-driven restarts in focused mode and reluctant-doubling restarts
  in stable mode,
- tiered learned-clause database reduction, bounded variable elimination by
  resolution, backward subsumption/strengthening, and vivification, each
  scheduled off a single "ticks" counter rather than a wall clock.

# Examples

## Build a solver from a configuration based on a CNF file, then solve it.

```no_run
use chrono_cdcl::*;

let config = Config::from("problem.cnf");
if let Ok(mut s) = Solver::build(&config) {
    if let Ok(ans) = s.solve() {
        println!("{:?}", ans);
    }
}
```

## On-memory solving, skipping the DIMACS file entirely.

```
use chrono_cdcl::*;

let clauses: Vec<Vec<i32>> = vec![vec![1, 2], vec![-1, 3], vec![1, -3], vec![-1, 2]];
let config = Config::default();
let mut solver = Solver::build_from_clauses(&config, &clauses).expect("valid clauses");
match solver.solve().expect("no resource limit configured") {
    Certificate::UNSAT => println!("unsat"),
    Certificate::SAT(model) => println!("{model:?}"),
}
```
*/
/// Crate `assign` implements the trail, Boolean Constraint Propagation, and
/// the VSIDS/VMTF decision heuristics.
pub mod assign;
/// Crate `cdb` provides [`cdb::Clause`] and its manager [`cdb::ClauseDB`].
pub mod cdb;
/// Crate `config` provides the solver's configuration.
pub mod config;
/// Crate `processor` implements bounded variable elimination and backward
/// subsumption/strengthening.
pub mod processor;
/// DRAT proof emission, an external-collaborator sink.
pub mod proof;
/// Crate `solver` provides the top-level API as a SAT solver.
pub mod solver;
/// Crate `state` is a collection of internal data: statistics, the ticks
/// counter, and verbosity-gated progress reporting.
pub mod state;
/// Crate `types` provides various building blocks, including the literal
/// encoding and some common traits.
pub mod types;

pub use {
    config::Config,
    solver::{Certificate, SatSolverIF, SolveIF, Solver, SolverResult},
    types::{Ema, Ema2, EmaIF, SolverError},
};

/// `chrono-cdcl` version number.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
extern crate bitflags;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_formula_is_sat_with_empty_model() {
        let config = Config::default();
        let mut solver = Solver::build_from_clauses(&config, &[]).unwrap();
        assert!(matches!(solver.solve().unwrap(), Certificate::SAT(_)));
    }

    #[test]
    fn single_unit_is_sat() {
        let config = Config::default();
        let mut solver = Solver::build_from_clauses(&config, &[vec![1]]).unwrap();
        match solver.solve().unwrap() {
            Certificate::SAT(model) => assert_eq!(model[0], 1),
            Certificate::UNSAT => panic!("expected SAT"),
        }
    }

    #[test]
    fn contradictory_units_are_unsat() {
        // A conflict discovered purely by ingesting two unit clauses is
        // caught by `add_clause` itself (§7 "Inconsistency"): there is no
        // search to run, so `build_from_clauses` reports it as a build-time
        // error rather than handing back a `Solver` whose `solve()` would
        // trivially say UNSAT. The CLI driver maps this the same way it
        // maps `Certificate::UNSAT` (exit code 20).
        let config = Config::default();
        let err = Solver::build_from_clauses(&config, &[vec![1], vec![-1]]).unwrap_err();
        assert!(matches!(err, SolverError::EmptyClause | SolverError::Inconsistent));
    }

    #[test]
    fn two_bit_xor_chain_is_unsat() {
        // (1 v 2) ^ (-1 v 2) ^ (1 v -2) ^ (-1 v -2): every assignment of
        // {1, 2} falsifies one clause (§8 concrete scenario 1).
        let config = Config::default();
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
        let mut solver = Solver::build_from_clauses(&config, &clauses).unwrap();
        assert_eq!(solver.solve().unwrap(), Certificate::UNSAT);
    }

    #[test]
    fn small_formula_is_satisfiable_with_valid_model() {
        // (1 v 2 v 3) ^ (-1 v 2) ^ (-2 v 3) (§8 concrete scenario 2).
        let config = Config::default();
        let clauses = vec![vec![1, 2, 3], vec![-1, 2], vec![-2, 3]];
        let mut solver = Solver::build_from_clauses(&config, &clauses).unwrap();
        match solver.solve().unwrap() {
            Certificate::SAT(model) => {
                let sat = |lits: &[i32]| lits.iter().any(|&l| model[l.unsigned_abs() as usize - 1] == l);
                assert!(sat(&[1, 2, 3]));
                assert!(sat(&[-1, 2]));
                assert!(sat(&[-2, 3]));
            }
            Certificate::UNSAT => panic!("expected SAT"),
        }
    }

    #[test]
    fn pigeonhole_3_into_2_is_unsat() {
        // PHP(3,2): pigeon i in {1,2,3}, hole h in {1,2}; var(i,h) = 2*(i-1)+h.
        let config = Config::default();
        let var = |i: i32, h: i32| 2 * (i - 1) + h;
        let mut clauses: Vec<Vec<i32>> = Vec::new();
        for i in 1..=3 {
            clauses.push(vec![var(i, 1), var(i, 2)]);
        }
        for h in 1..=2 {
            for i in 1..=3 {
                for j in (i + 1)..=3 {
                    clauses.push(vec![-var(i, h), -var(j, h)]);
                }
            }
        }
        let mut solver = Solver::build_from_clauses(&config, &clauses).unwrap();
        assert_eq!(solver.solve().unwrap(), Certificate::UNSAT);
    }

    #[test]
    fn implication_chain_propagates_to_all_true() {
        // (-x_i v x_{i+1}) for i=1..99, plus unit x_1 (§8 concrete scenario 4).
        let config = Config::default();
        let mut clauses: Vec<Vec<i32>> = vec![vec![1]];
        for i in 1..99 {
            clauses.push(vec![-i, i + 1]);
        }
        let mut solver = Solver::build_from_clauses(&config, &clauses).unwrap();
        match solver.solve().unwrap() {
            Certificate::SAT(model) => assert!(model.iter().all(|&l| l > 0)),
            Certificate::UNSAT => panic!("expected SAT"),
        }
    }

    #[test]
    fn tautological_clause_is_dropped_at_import() {
        // (1 v -1 v 2): tautology, so the formula is equivalent to empty.
        let config = Config::default();
        let mut solver = Solver::build_from_clauses(&config, &[vec![1, -1, 2]]).unwrap();
        assert!(matches!(solver.solve().unwrap(), Certificate::SAT(_)));
    }
}
