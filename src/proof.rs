//! DRAT proof emission (§6 "DRAT proof", §7 "Proof I/O error is a soft
//! failure"), an external-collaborator sink the core never talks to except
//! through this narrow trait.
use {
    crate::types::Lit,
    std::{
        fs::File,
        io::{self, BufWriter, Write},
        path::Path,
    },
};

/// What conflict analysis, reduction, elimination, subsumption, and
/// vivification call when a clause is learned/deleted. A failing write is
/// swallowed (§7): the search continues, only the proof's fidelity is lost.
pub trait ProofIF {
    fn add_clause(&mut self, lits: &[Lit]);
    fn delete_clause(&mut self, lits: &[Lit]);
}

/// A proof sink that does nothing; used when no `--proof` path is given.
pub struct NullProof;

impl ProofIF for NullProof {
    fn add_clause(&mut self, _lits: &[Lit]) {}
    fn delete_clause(&mut self, _lits: &[Lit]) {}
}

/// ASCII or binary DRAT writer, buffered to a file (§6).
pub struct DratWriter {
    out: BufWriter<File>,
    binary: bool,
}

impl DratWriter {
    pub fn create(path: &Path, binary: bool) -> io::Result<DratWriter> {
        Ok(DratWriter {
            out: BufWriter::new(File::create(path)?),
            binary,
        })
    }

    fn write_ascii(&mut self, prefix: Option<&str>, lits: &[Lit]) -> io::Result<()> {
        if let Some(p) = prefix {
            write!(self.out, "{p} ")?;
        }
        for &l in lits {
            write!(self.out, "{} ", i32::from(l))?;
        }
        writeln!(self.out, "0")
    }

    /// binary DRAT literal encoding: `2*|v| + sign`, little-endian base-128
    /// varint with the continuation bit set in every byte but the last
    /// (§6 "variable-length encoding ... bit 7 set except for the last
    /// byte"). `|v|` is the external DIMACS variable number.
    fn write_binary_lit(&mut self, l: Lit) -> io::Result<()> {
        let ext = i32::from(l);
        let mut x: u32 = 2 * ext.unsigned_abs() + (ext < 0) as u32;
        loop {
            let byte = (x & 0x7f) as u8;
            x >>= 7;
            if x == 0 {
                self.out.write_all(&[byte])?;
                break;
            } else {
                self.out.write_all(&[byte | 0x80])?;
            }
        }
        Ok(())
    }

    fn write_binary(&mut self, tag: u8, lits: &[Lit]) -> io::Result<()> {
        self.out.write_all(&[tag])?;
        for &l in lits {
            self.write_binary_lit(l)?;
        }
        self.out.write_all(&[0])
    }
}

impl ProofIF for DratWriter {
    fn add_clause(&mut self, lits: &[Lit]) {
        let _ = if self.binary {
            self.write_binary(b'a', lits)
        } else {
            self.write_ascii(None, lits)
        };
    }

    fn delete_clause(&mut self, lits: &[Lit]) {
        let _ = if self.binary {
            self.write_binary(b'd', lits)
        } else {
            self.write_ascii(Some("d"), lits)
        };
    }
}
