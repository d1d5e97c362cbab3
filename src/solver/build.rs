//! Solver construction and clause ingestion (§6 "DIMACS input").
use {
    super::{restart::Restarter, Solver},
    crate::{
        assign::AssignStack,
        cdb::{AddedClause, ClauseDB},
        config::Config,
        processor::Eliminator,
        state::State,
        types::{cnf, AssignReason, CNFDescription, CNFReader, Instantiate, Lit, MaybeInconsistent, SolverError},
    },
    std::{convert::TryFrom, path::Path},
};

/// External construction/ingestion API (§6 "DIMACS input"): how a
/// collaborator (the CLI driver, or an embedding crate) builds a `Solver`
/// and feeds it clauses, without reaching into any internal module.
pub trait SatSolverIF: Sized {
    /// Build a solver from a DIMACS CNF file named by `config.cnf_file`.
    fn build(config: &Config) -> Result<Self, SolverError>;
    /// Build a solver directly from an in-memory clause list, skipping the
    /// DIMACS file machinery (used by embedders that already hold clauses
    /// in memory rather than driving this crate from a file).
    fn build_from_clauses(config: &Config, clauses: &[Vec<i32>]) -> Result<Self, SolverError>;
    /// Parse, activate variables for, and add one clause of external
    /// (signed DIMACS) literals. Non-incremental: calling this after
    /// `solve()` has returned is an API contract violation (§7).
    fn add_clause(&mut self, raw: &[i32]) -> MaybeInconsistent;
}

impl Solver {
    /// build an empty solver sized for `cnf` (§3 "Variables are activated
    /// lazily", but pre-sizing to the DIMACS header avoids one resize per
    /// variable for the common case of a well-formed file).
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Solver {
        Solver {
            asg: AssignStack::instantiate(config, cnf),
            cdb: ClauseDB::instantiate(config, cnf),
            elim: Eliminator::new(cnf.num_of_variables),
            state: State::instantiate(config, cnf),
            rst: Restarter::new(config),
            mode_switch: super::mode::ModeSwitch::new(config),
            next_reduce: config.reduce_interval,
            next_vivify: config.vivify_interval,
            original_clauses: Vec::new(),
        }
    }

    fn attach_proof(&mut self, config: &Config) -> MaybeInconsistent {
        if let Some(path) = &config.proof_file {
            let writer = crate::proof::DratWriter::create(path, config.proof_binary).map_err(|_| SolverError::IOError)?;
            self.cdb.proof = Box::new(writer);
        }
        Ok(())
    }

    /// grow every subsystem to accommodate `vi`, the largest variable index
    /// mentioned by `raw` (§3 "Variables are activated lazily when first
    /// mentioned").
    fn activate(&mut self, vi: usize) {
        self.asg.expand_to(vi);
        self.cdb.expand_to(vi);
        self.elim.expand_to(vi);
    }

}

impl SatSolverIF for Solver {
    fn build(config: &Config) -> Result<Solver, SolverError> {
        let CNFReader { cnf, mut reader } = CNFReader::try_from(Path::new(&config.cnf_file))?;
        let mut solver = Solver::instantiate(config, &cnf);
        let clauses = cnf::read_clauses(&mut reader)?;
        for raw in clauses {
            solver.add_clause(&raw)?;
        }
        solver.attach_proof(config)?;
        Ok(solver)
    }

    fn build_from_clauses(config: &Config, clauses: &[Vec<i32>]) -> Result<Solver, SolverError> {
        let cnf = CNFDescription::from(clauses);
        let mut solver = Solver::instantiate(config, &cnf);
        for raw in clauses {
            solver.add_clause(raw)?;
        }
        solver.attach_proof(config)?;
        Ok(solver)
    }

    /// Parse, activate variables for, and add one DIMACS clause line,
    /// applying the usual simplifications before it ever reaches the
    /// clause database: sort, drop duplicate literals, drop tautologies,
    /// drop literals already falsified at the root, and detect a clause
    /// already satisfied at the root (§4.1, §6).
    fn add_clause(&mut self, raw: &[i32]) -> MaybeInconsistent {
        let mut lits: Vec<Lit> = Vec::with_capacity(raw.len());
        for &i in raw {
            let lit = Lit::try_from(i).map_err(|_| SolverError::InvalidLiteral)?;
            self.activate(lit.vi());
            lits.push(lit);
        }
        lits.sort_unstable();

        // stage 1: dedup, reject tautologies, and keep the result exactly as
        // asserted (root truth untouched) for `solver::validate` (§4.13).
        let mut original: Vec<Lit> = Vec::with_capacity(lits.len());
        let mut last: Option<Lit> = None;
        for l in lits {
            if Some(!l) == last {
                return Ok(()); // tautology: drop the whole clause
            }
            if Some(l) == last {
                continue;
            }
            original.push(l);
            last = Some(l);
        }
        self.original_clauses.push(original.clone());

        // stage 2: drop literals already falsified at the root and detect a
        // clause already satisfied at the root, for internal storage.
        let mut satisfied = false;
        let mut deduped: Vec<Lit> = Vec::with_capacity(original.len());
        for l in original {
            if self.asg.assigned(l) == Some(true) {
                satisfied = true;
            }
            if self.asg.assigned(l) == Some(false) {
                continue;
            }
            deduped.push(l);
        }
        if satisfied {
            return Ok(());
        }
        match deduped.len() {
            0 => Err(SolverError::EmptyClause),
            1 => match self.asg.assigned(deduped[0]) {
                Some(false) => Err(SolverError::Inconsistent),
                Some(true) => Ok(()),
                None => {
                    self.asg.assign_at_root(deduped[0], AssignReason::None);
                    Ok(())
                }
            },
            _ => {
                let added = self.cdb.add_clause(deduped, false, 0)?;
                if let AddedClause::Unit(lit) = added {
                    if self.asg.assigned(lit).is_none() {
                        self.asg.assign_at_root(lit, AssignReason::None);
                    }
                }
                Ok(())
            }
        }
    }
}
