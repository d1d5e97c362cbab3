use std::{convert::TryFrom, fmt, ops::Not};

/// A packed literal: `2 * idx + sign_bit`, `sign_bit == 1` for the negative
/// occurrence (§3 "Literal encoding"). Variables are indexed from `1`;
/// index `0` is a reserved sentinel never assigned to a real variable
/// (matches `Var::new_vars`, `VarIdHeap`, and `Vmtf`, which all size their
/// arrays `0..=n` and leave slot `0` unused).
///
/// The all-ones pattern is reserved as [`Lit::INVALID`] and never denotes a
/// real literal, since the largest supported variable index leaves the top
/// bit free.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lit(u32);

/// The largest variable index `chrono-cdcl` will allocate storage for.
pub const MAX_VAR: usize = (u32::MAX as usize - 1) / 2;

impl Lit {
    /// Sentinel for "no literal"; never returned by [`Lit::from_var_index`].
    pub const INVALID: Lit = Lit(u32::MAX);

    /// Build the positive or negative literal of variable index `idx`
    /// (`1..=MAX_VAR`; `idx == 0` is only ever used for [`Lit::INVALID`]-style
    /// placeholders, never a real variable).
    #[inline]
    pub fn from_var_index(idx: usize, negative: bool) -> Lit {
        debug_assert!(idx <= MAX_VAR);
        Lit((idx as u32) << 1 | negative as u32)
    }

    /// variable index, `lit div 2`.
    #[inline]
    pub fn vi(self) -> usize {
        (self.0 >> 1) as usize
    }

    /// `true` if this is the negative occurrence (`lit mod 2 == 1`).
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 & 1 != 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        !self.is_negative()
    }

    /// raw packed representation, usable as a dense array index.
    #[inline]
    pub fn as_index(self) -> usize {
        self.0 as usize
    }

    /// inverse of [`Lit::as_index`]: reconstruct the literal a dense-array
    /// slot (e.g. a `ClauseDB::watchers` index) belongs to.
    #[inline]
    pub fn from_index(idx: usize) -> Lit {
        Lit(idx as u32)
    }
}

impl Not for Lit {
    type Output = Lit;
    /// `¬(¬lit) = lit`: flipping the sign bit twice is the identity.
    #[inline]
    fn not(self) -> Lit {
        Lit(self.0 ^ 1)
    }
}

/// Maps an external DIMACS literal (`±v`, `1 <= v <= MAX_VAR`) to the
/// internal packed encoding (§6 "DIMACS input"). DIMACS variable numbers
/// are already 1-based, matching this crate's variable-index convention
/// directly, with no shift.
impl TryFrom<i32> for Lit {
    type Error = ();
    fn try_from(v: i32) -> Result<Lit, ()> {
        if v == 0 || v.unsigned_abs() as usize > MAX_VAR {
            return Err(());
        }
        Ok(Lit::from_var_index(v.unsigned_abs() as usize, v < 0))
    }
}

/// Maps a packed literal back to the external DIMACS representation.
impl From<Lit> for i32 {
    fn from(l: Lit) -> i32 {
        let v = l.vi() as i32;
        if l.is_negative() {
            -v
        } else {
            v
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i32::from(*self))
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}L", i32::from(*self))
    }
}

/// Render a slice of literals as external DIMACS integers, for diagnostics.
pub fn i32s(v: &[Lit]) -> Vec<i32> {
    v.iter().map(|l| i32::from(*l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        for v in [1i32, -1, 250, -250, 1] {
            let l = Lit::try_from(v).unwrap();
            assert_eq!(i32::from(l), v);
        }
    }

    #[test]
    fn double_negation_is_identity() {
        let l = Lit::from_var_index(4, false);
        assert_eq!(!!l, l);
        assert_ne!(!l, l);
    }

    #[test]
    fn encoding_matches_spec_formula() {
        let l = Lit::from_var_index(7, true);
        assert_eq!(l.as_index(), 2 * 7 + 1);
        assert_eq!(l.vi(), 7);
        assert!(l.is_negative());
    }
}
