//! DIMACS CLI driver (collaborator, §6 "CLI surface"): parses a CNF file,
//! runs the solver, and prints a DIMACS-style witness. Kept outside the
//! library crate entirely; everything here goes through `SatSolverIF`/
//! `SolveIF` like any other embedder would.
use {
    chrono_cdcl::{Certificate, Config, SatSolverIF, SolveIF, Solver, SolverError},
    std::{env, path::PathBuf, process::ExitCode},
};

struct CLOpts {
    cnf: PathBuf,
    no_elim: bool,
    no_subsume: bool,
    no_vivify: bool,
    no_reduce: bool,
    no_rephase: bool,
    no_stabilize: bool,
    no_chrono: bool,
    proof: Option<PathBuf>,
    proof_binary: bool,
    no_color: bool,
    verbose: u8,
}

fn usage(prog: &str) -> String {
    format!(
        "usage: {prog} [options] <cnf-file>\n\
         \n\
         options:\n\
         \x20\x20--no-elim          disable bounded variable elimination (C10)\n\
         \x20\x20--no-subsume       disable backward subsumption/strengthening (C11)\n\
         \x20\x20--no-vivify        disable vivification (C12)\n\
         \x20\x20--no-reduce        disable learned-clause database reduction (C9)\n\
         \x20\x20--no-rephase       disable rephasing (C8)\n\
         \x20\x20--no-stabilize     disable focused/stable mode switching (C8)\n\
         \x20\x20--no-chrono        disable chronological backtracking (C6)\n\
         \x20\x20--proof <path>     write a DRAT proof to <path>\n\
         \x20\x20--binary-proof     emit the binary DRAT encoding (requires --proof)\n\
         \x20\x20-v, --verbose      raise verbosity (0..=4, repeatable)\n\
         \x20\x20-q, --quiet        verbosity 0\n\
         \x20\x20-C, --no-color     disable ANSI color in progress output\n"
    )
}

fn parse_args(mut args: env::Args) -> Result<CLOpts, String> {
    let prog = args.next().unwrap_or_else(|| "satcli".to_string());
    let mut cnf = None;
    let mut opts = CLOpts {
        cnf: PathBuf::new(),
        no_elim: false,
        no_subsume: false,
        no_vivify: false,
        no_reduce: false,
        no_rephase: false,
        no_stabilize: false,
        no_chrono: false,
        proof: None,
        proof_binary: false,
        no_color: false,
        verbose: 1,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--no-elim" => opts.no_elim = true,
            "--no-subsume" => opts.no_subsume = true,
            "--no-vivify" => opts.no_vivify = true,
            "--no-reduce" => opts.no_reduce = true,
            "--no-rephase" => opts.no_rephase = true,
            "--no-stabilize" => opts.no_stabilize = true,
            "--no-chrono" => opts.no_chrono = true,
            "--binary-proof" => opts.proof_binary = true,
            "-C" | "--no-color" => opts.no_color = true,
            "-q" | "--quiet" => opts.verbose = 0,
            "-v" | "--verbose" => opts.verbose = (opts.verbose + 1).min(4),
            "--proof" => {
                let path = args.next().ok_or_else(|| "--proof requires a path".to_string())?;
                opts.proof = Some(PathBuf::from(path));
            }
            other if !other.starts_with('-') && cnf.is_none() => cnf = Some(PathBuf::from(other)),
            other => return Err(format!("unrecognized argument: {other}\n\n{}", usage(&prog))),
        }
    }
    opts.cnf = cnf.ok_or_else(|| usage(&prog))?;
    Ok(opts)
}

fn build_config(opts: &CLOpts) -> Config {
    Config {
        use_elim: !opts.no_elim,
        use_subsume: !opts.no_subsume,
        use_vivify: !opts.no_vivify,
        use_reduce: !opts.no_reduce,
        use_rephase: !opts.no_rephase,
        use_stabilize: !opts.no_stabilize,
        use_chrono_backtrack: !opts.no_chrono,
        cnf_file: opts.cnf.clone(),
        verbosity: opts.verbose,
        no_color: opts.no_color,
        proof_file: opts.proof.clone(),
        proof_binary: opts.proof_binary,
        ..Config::default()
    }
}

/// Maps internal status to the external exit-code contract (§6 "Exit
/// codes"): 10 SAT, 20 UNSAT, any other non-zero for usage/internal errors.
/// A build-time `SolverError` from ingesting a contradictory unit clause is
/// reported the same way as a search-time UNSAT: there is no model either
/// way (§7 "Inconsistency").
fn exit_code_for_error(err: &SolverError) -> u8 {
    match err {
        SolverError::EmptyClause | SolverError::Inconsistent => 20,
        SolverError::InvalidLiteral | SolverError::ApiMisuse => 1,
        SolverError::IOError => 2,
        SolverError::OutOfMemory => 3,
    }
}

fn main() -> ExitCode {
    let opts = match parse_args(env::args()) {
        Ok(opts) => opts,
        Err(msg) => {
            eprint!("{msg}");
            return ExitCode::from(1);
        }
    };
    let config = build_config(&opts);

    let mut solver = match Solver::build(&config) {
        Ok(solver) => solver,
        Err(err) => {
            if matches!(err, SolverError::EmptyClause | SolverError::Inconsistent) {
                println!("s UNSATISFIABLE");
                return ExitCode::from(20);
            }
            eprintln!("satcli: {}: {err:?}", opts.cnf.display());
            return ExitCode::from(exit_code_for_error(&err));
        }
    };

    match solver.solve() {
        Ok(Certificate::SAT(model)) => {
            println!("s SATISFIABLE");
            print!("v");
            for lit in &model {
                print!(" {lit}");
            }
            println!(" 0");
            ExitCode::from(10)
        }
        Ok(Certificate::UNSAT) => {
            println!("s UNSATISFIABLE");
            ExitCode::from(20)
        }
        Err(err) => {
            eprintln!("satcli: {err:?}");
            ExitCode::from(exit_code_for_error(&err))
        }
    }
}
