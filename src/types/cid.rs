use std::{fmt, num::NonZeroU32};

/// Non-owning handle into the clause arena (§3 "Ownership": "the arena owns
/// the clause; `reason[idx]` is a non-owning handle"). Ordinals start at one
/// and are re-used once their slot is garbage-collected, so a stale
/// `ClauseId` must never outlive a sweep without being refreshed.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClauseId {
    ordinal: NonZeroU32,
}

impl ClauseId {
    /// unused placeholder stored in a binary [`crate::cdb::watch::Watch`],
    /// which carries its payload in `blocker`/`redundant` instead of an
    /// arena index.
    pub const SENTINEL: ClauseId = ClauseId {
        ordinal: NonZeroU32::MAX,
    };
}

impl From<usize> for ClauseId {
    #[inline]
    fn from(u: usize) -> ClauseId {
        ClauseId {
            ordinal: NonZeroU32::new(u as u32).expect("clause ordinal must be non-zero"),
        }
    }
}

impl From<ClauseId> for usize {
    #[inline]
    fn from(cid: ClauseId) -> usize {
        NonZeroU32::get(cid.ordinal) as usize
    }
}

impl fmt::Debug for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}C", self.ordinal)
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}C", self.ordinal)
    }
}
