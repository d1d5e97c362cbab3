//! DIMACS CNF ingestion (§6 "DIMACS input"). This is the external-collaborator
//! adapter the core search engine never calls directly: `solver::build`
//! consumes a `CNFReader` and feeds literals to the solver through the
//! ordinary clause-adding API.
use {
    super::SolverError,
    std::{
        fmt,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// Where a `CNFDescription` came from, for diagnostics only.
#[derive(Clone, Debug, Default)]
pub enum CNFIndicator {
    #[default]
    Void,
    File(String),
    LitVec(usize),
}

impl fmt::Display for CNFIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CNFIndicator::Void => write!(f, "(no CNF specified)"),
            CNFIndicator::File(file) => write!(f, "CNF file({file})"),
            CNFIndicator::LitVec(n) => write!(f, "an embedded vector ({n} clauses)"),
        }
    }
}

/// The `p cnf <vars> <clauses>` header, plus where it came from.
#[derive(Clone, Debug, Default)]
pub struct CNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
    pub pathname: CNFIndicator,
}

impl fmt::Display for CNFDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CNF({}, {}, {})",
            self.num_of_variables, self.num_of_clauses, self.pathname
        )
    }
}

impl<V: AsRef<[i32]>> From<&[V]> for CNFDescription {
    fn from(vec: &[V]) -> Self {
        let num_of_variables = vec
            .iter()
            .map(|clause| clause.as_ref().iter().map(|l| l.unsigned_abs()).max().unwrap_or(0))
            .max()
            .unwrap_or(0) as usize;
        CNFDescription {
            num_of_variables,
            num_of_clauses: vec.len(),
            pathname: CNFIndicator::LitVec(vec.len()),
        }
    }
}

/// A buffered DIMACS file, header already parsed; `solver::build` reads the
/// remaining clause lines from `reader`. Comments (`c ...`) are skipped;
/// clause lines may be arbitrarily long and wrap over multiple physical
/// lines, since tokens are read with `split_whitespace` until a `0`.
#[derive(Debug)]
pub struct CNFReader {
    pub cnf: CNFDescription,
    pub reader: BufReader<File>,
}

impl TryFrom<&Path> for CNFReader {
    type Error = SolverError;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let pathname = if path.to_string_lossy().is_empty() {
            "--".to_string()
        } else {
            path.file_name()
                .map_or("unnamed".to_string(), |f| f.to_string_lossy().into_owned())
        };
        let file = File::open(path).map_err(|_| SolverError::IOError)?;
        let mut reader = BufReader::new(file);
        let mut buf = String::new();
        let mut nv = 0usize;
        let mut nc = 0usize;
        let mut found_header = false;
        loop {
            buf.clear();
            match reader.read_line(&mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let mut it = buf.split_whitespace();
                    match it.next() {
                        Some("c") | None => continue,
                        Some("p") => {
                            if it.next() != Some("cnf") {
                                return Err(SolverError::IOError);
                            }
                            nv = it.next().and_then(|s| s.parse().ok()).ok_or(SolverError::IOError)?;
                            nc = it.next().and_then(|s| s.parse().ok()).ok_or(SolverError::IOError)?;
                            found_header = true;
                            break;
                        }
                        Some(_) => return Err(SolverError::IOError),
                    }
                }
                Err(_) => return Err(SolverError::IOError),
            }
        }
        if !found_header {
            return Err(SolverError::IOError);
        }
        Ok(CNFReader {
            cnf: CNFDescription {
                num_of_variables: nv,
                num_of_clauses: nc,
                pathname: CNFIndicator::File(pathname),
            },
            reader,
        })
    }
}

/// Parse the remaining whitespace-separated, zero-terminated literal stream
/// from a DIMACS body into clauses of external (signed) literals. Tautological
/// clauses and clauses with an out-of-range literal are rejected by the
/// caller, not here; this only tokenizes.
pub fn read_clauses<R: BufRead>(reader: &mut R) -> Result<Vec<Vec<i32>>, SolverError> {
    let mut clauses = Vec::new();
    let mut current = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                for tok in line.split_whitespace() {
                    if tok == "c" {
                        break;
                    }
                    let lit: i32 = tok.parse().map_err(|_| SolverError::IOError)?;
                    if lit == 0 {
                        clauses.push(std::mem::take(&mut current));
                    } else {
                        current.push(lit);
                    }
                }
            }
            Err(_) => return Err(SolverError::IOError),
        }
    }
    if !current.is_empty() {
        clauses.push(current);
    }
    Ok(clauses)
}
