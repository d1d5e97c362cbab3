//! Crate `config` provides the solver's configuration, grouped the way the
//! teacher crate's `config.rs` groups its switches: enable/disable per
//! subsystem, then numeric knobs per subsystem.
use std::path::PathBuf;

/// Solver configuration. Every subsystem gated by a `use_*` switch is still
/// compiled in (§9 "Macro-driven compile-time feature flags ... become
/// runtime configuration"); only the *behavior* is toggled at construction
/// time, not at compile time, so the core contract never depends on a
/// particular combination of switches.
#[derive(Clone, Debug)]
pub struct Config {
    //
    //## Switches
    //
    /// Enable learned-clause database reduction (C9).
    pub use_reduce: bool,
    /// Enable bounded variable elimination (C10).
    pub use_elim: bool,
    /// Enable backward subsumption/strengthening (C11), run as part of
    /// elimination rounds.
    pub use_subsume: bool,
    /// Enable vivification (C12).
    pub use_vivify: bool,
    /// Enable rephasing (C8).
    pub use_rephase: bool,
    /// Enable focused/stable mode switching (C8); if disabled, the solver
    /// stays in focused mode (VMTF + EMA-forced restarts) for the whole run.
    pub use_stabilize: bool,
    /// Enable chronological backtracking (C6); if disabled, conflict
    /// analysis always backjumps to the asserting level.
    pub use_chrono_backtrack: bool,

    //
    //## Search control
    //
    /// `current_level - asserting_level` must be at or below this for a
    /// chronological jump to behave as a normal backjump (§4.5 step 7).
    pub chrono_threshold: DecisionLevel,
    /// Maximum variable count accepted; also sizes the all-ones `Lit::INVALID`
    /// margin check (§7 "API contract violation").
    pub max_vars: usize,

    //
    //## Restart control (C7)
    //
    /// Conflicts between restart checks in focused mode.
    pub restart_step: usize,
    /// Fast-EMA window length for glue.
    pub restart_glue_fast_len: usize,
    /// Slow-EMA window length for glue.
    pub restart_glue_slow_len: usize,
    /// Margin `K` in `fast-EMA(glue) >= K * slow-EMA(glue)`.
    pub restart_glue_margin: f64,
    /// Base interval multiplied by the reluctant-doubling term in stable mode.
    pub restart_stable_interval: u64,

    //
    //## Mode switching (C8)
    //
    /// Conflict limit for the very first focused -> stable switch.
    pub mode_initial_conflicts: u64,
    /// Ticks limit for the very first focused -> stable switch.
    pub mode_initial_ticks: u64,
    /// Number of conflicts between full `update_phases`/rephase sweeps.
    pub rephase_interval: u64,

    //
    //## Clause DB reduction (C9)
    //
    /// Conflicts between reduction passes.
    pub reduce_interval: u64,
    /// Glue <= this value is tier-2 (gets extra "lives"); above is tier-1.
    pub reduce_tier2_glue: u32,
    /// "Lives" granted to a tier-2 clause before it becomes reducible.
    pub reduce_tier2_lives: u8,
    /// Fraction (0..1) of eligible redundant clauses discarded per reduction.
    pub reduce_fraction: f64,

    //
    //## Bounded variable elimination (C10)
    //
    /// Accumulated elimination-candidate marks that trigger a round.
    pub elim_trigger_marks: usize,
    /// Skip a pivot if either polarity's occurrence count exceeds this.
    pub elim_occ_limit: usize,
    /// Resolvent count may exceed `|pos| + |neg|` by at most this many.
    pub elim_grow_limit: usize,
    /// Ticks budget per elimination round, as a fraction of ticks since the
    /// last elimination/subsumption checkpoint.
    pub elim_ticks_fraction: f64,

    //
    //## Subsumption & strengthening (C11)
    //
    /// Skip a subsumer/candidate clause above this size.
    pub subsume_clause_limit: usize,
    /// Ticks budget per subsumption round.
    pub subsume_ticks_fraction: f64,

    //
    //## Vivification (C12)
    //
    /// Conflicts between vivification rounds.
    pub vivify_interval: u64,
    /// Ticks budget per vivification round.
    pub vivify_ticks_fraction: f64,

    //
    //## Var activity / VSIDS (C4)
    //
    /// Growth factor applied to the global score increment on every conflict.
    pub var_decay: f64,
    /// `MAX_SCORE`: rescale all scores/increment once any score exceeds this.
    pub var_rescale_threshold: f64,

    //
    //## I/O (collaborator, §6)
    //
    pub cnf_file: PathBuf,
    /// `0..=4`; gates `State::flush`/`State::progress`.
    pub verbosity: u8,
    pub no_color: bool,
    /// write a DRAT proof to this path if `Some`.
    pub proof_file: Option<PathBuf>,
    /// emit the binary DRAT encoding instead of ASCII.
    pub proof_binary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_reduce: true,
            use_elim: true,
            use_subsume: true,
            use_vivify: true,
            use_rephase: true,
            use_stabilize: true,
            use_chrono_backtrack: true,

            chrono_threshold: 100,
            max_vars: crate::types::MAX_VAR,

            restart_step: 50,
            restart_glue_fast_len: 50,
            restart_glue_slow_len: 10_000,
            restart_glue_margin: 1.20,
            restart_stable_interval: 2_000,

            mode_initial_conflicts: 1_000,
            mode_initial_ticks: 1 << 20,
            rephase_interval: 1_000,

            reduce_interval: 2_000,
            reduce_tier2_glue: 6,
            reduce_tier2_lives: 2,
            reduce_fraction: 0.5,

            elim_trigger_marks: 64,
            elim_occ_limit: 1_000,
            elim_grow_limit: 0,
            elim_ticks_fraction: 0.05,

            subsume_clause_limit: 100,
            subsume_ticks_fraction: 0.05,

            vivify_interval: 15_000,
            vivify_ticks_fraction: 0.05,

            var_decay: 1.05,
            var_rescale_threshold: 1e100,

            cnf_file: PathBuf::new(),
            verbosity: 1,
            no_color: true,
            proof_file: None,
            proof_binary: false,
        }
    }
}

impl<T> From<T> for Config
where
    PathBuf: From<T>,
{
    fn from(path: T) -> Config {
        Config {
            cnf_file: PathBuf::from(path),
            ..Config::default()
        }
    }
}

use crate::types::DecisionLevel;
