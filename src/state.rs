//! Crate `state` is a collection of internal data: statistics, the ticks
//! budget counter, solver status, and a verbosity-gated progress reporter.
use {
    crate::types::*,
    std::{
        fmt,
        io::{stdout, Write},
        ops::{Index, IndexMut},
        time::Instant,
    },
};

/// Terminal/non-terminal solver status (§4 "State machines: Solver status").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverStatus {
    Unknown,
    Satisfiable,
    Unsatisfiable,
}

/// Statistic counters, indexed the way the teacher's `Stat` enum is: a
/// plain `usize` array behind `Index<Stat>`/`IndexMut<Stat>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(usize)]
pub enum Stat {
    Conflict,
    Decision,
    Propagation,
    Restart,
    Reduce,
    Eliminate,
    Subsume,
    Vivify,
    BacktrackChronological,
    BacktrackNonChronological,
    /// sentinel; must stay last.
    EndOfStatIndex,
}

impl Index<Stat> for [usize] {
    type Output = usize;
    #[inline]
    fn index(&self, i: Stat) -> &usize {
        &self[i as usize]
    }
}

impl IndexMut<Stat> for [usize] {
    #[inline]
    fn index_mut(&mut self, i: Stat) -> &mut usize {
        &mut self[i as usize]
    }
}

/// API for progress reporting and statistics bookkeeping.
pub trait StateIF {
    fn is_timeout(&self) -> bool;
    fn progress_header(&self);
    fn progress(&mut self, num_vars: usize, num_assigned: usize, num_clauses: usize, glue_trend: f64);
    fn flush<S: AsRef<str>>(&self, mes: S);
    fn log<S: AsRef<str>>(&mut self, tick: u64, mes: S);
}

/// Data storage shared across `Solver`'s submodules.
#[derive(Clone, Debug)]
pub struct State {
    pub config: Config,
    pub stats: [usize; Stat::EndOfStatIndex as usize],
    pub status: SolverStatus,
    pub target: CNFDescription,

    /// the ticks counter (§4.3 "Ticks", §9 "Ticks budgeting"): incremented
    /// on every clause-header touch, watch-list cache-line, and assignment.
    /// This is the solver's portable substitute for a wall-clock scheduler;
    /// every inprocessing budget is a delta against a checkpoint of this
    /// counter.
    pub ticks: u64,

    /// EMA of backjump levels, for diagnostics/progress display.
    pub b_lvl: Ema,
    /// EMA of conflict levels, for diagnostics/progress display.
    pub c_lvl: Ema,

    progress_cnt: usize,
    start: Instant,
    log_messages: Vec<String>,
}

impl Instantiate for State {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> State {
        State {
            config: config.clone(),
            stats: [0; Stat::EndOfStatIndex as usize],
            status: SolverStatus::Unknown,
            target: cnf.clone(),
            ticks: 0,
            b_lvl: Ema::new(5_000),
            c_lvl: Ema::new(5_000),
            progress_cnt: 0,
            start: Instant::now(),
            log_messages: Vec::new(),
        }
    }
}

impl Index<Stat> for State {
    type Output = usize;
    #[inline]
    fn index(&self, i: Stat) -> &usize {
        &self.stats[i as usize]
    }
}

impl IndexMut<Stat> for State {
    #[inline]
    fn index_mut(&mut self, i: Stat) -> &mut usize {
        &mut self.stats[i as usize]
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<30}|time:{:>9.2}",
            self.target,
            self.start.elapsed().as_secs_f64()
        )
    }
}

/// Wrap `mes` in an ANSI color unless `no_color` is set (§6 "colored
/// message/verbose logging" is a collaborator concern; this is the minimal
/// adapter the core's `State` calls through).
fn colored(mes: &str, code: u8, no_color: bool) -> String {
    if no_color {
        mes.to_string()
    } else {
        format!("\x1B[{code}m{mes}\x1B[0m")
    }
}

impl State {
    /// record one tick; called from the BCP hot loop and inprocessing scans.
    #[inline]
    pub fn tick(&mut self, n: u64) {
        self.ticks += n;
    }
}

impl StateIF for State {
    fn is_timeout(&self) -> bool {
        false
    }

    fn progress_header(&self) {
        if self.config.verbosity == 0 {
            return;
        }
        println!(
            "{}",
            colored(
                "   #conflict  #decision  #restart  #learnt  trend",
                36,
                self.config.no_color
            )
        );
    }

    fn progress(&mut self, num_vars: usize, num_assigned: usize, num_clauses: usize, glue_trend: f64) {
        if self.config.verbosity < 2 {
            return;
        }
        self.progress_cnt += 1;
        println!(
            "{:>12} {:>10} {:>9} {:>8} {:>7.3}  ({num_assigned}/{num_vars} assigned)",
            self[Stat::Conflict], self[Stat::Decision], self[Stat::Restart], num_clauses, glue_trend,
        );
    }

    fn flush<S: AsRef<str>>(&self, mes: S) {
        if self.config.verbosity == 0 {
            return;
        }
        if mes.as_ref().is_empty() {
            print!("\x1B[1G\x1B[K");
        } else {
            print!("{}", mes.as_ref());
        }
        let _ = stdout().flush();
    }

    fn log<S: AsRef<str>>(&mut self, tick: u64, mes: S) {
        if self.config.verbosity < 3 {
            return;
        }
        self.log_messages
            .insert(0, format!("[{tick:>10}] {}", mes.as_ref()));
        if self.log_messages.len() > 10 {
            self.log_messages.truncate(10);
        }
    }
}
