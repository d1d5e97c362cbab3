//! Watch-list entries (§3 "Watch entry", §4.1 "Watch policy").
use crate::types::{ClauseId, Lit};

/// An entry in a literal's watch list: either a binary-clause header
/// (`binary == true`, never materialized in the arena, §4.1 "Virtual binary
/// clause") or a pointer to a clause of size >= 3. Every entry carries a
/// *blocking literal* so BCP can skip the clause body entirely when the
/// blocker is already satisfied.
#[derive(Clone, Copy, Debug)]
pub struct Watch {
    /// unused (sentinel) for a binary header; indexes the clause arena
    /// otherwise.
    pub cid: ClauseId,
    /// for a binary header, the clause's other literal; for a long clause,
    /// a cheap satisfaction check (some literal known to be in the clause).
    pub blocker: Lit,
    pub binary: bool,
    /// meaningful only when `binary`: whether this virtual binary is a
    /// learnt clause (reduction/dense-mode bookkeeping needs this without
    /// an arena lookup).
    pub redundant: bool,
}

impl Watch {
    pub fn binary(other: Lit, redundant: bool) -> Watch {
        Watch {
            cid: ClauseId::SENTINEL,
            blocker: other,
            binary: true,
            redundant,
        }
    }

    pub fn long(cid: ClauseId, blocker: Lit) -> Watch {
        Watch {
            cid,
            blocker,
            binary: false,
            redundant: false,
        }
    }
}

/// A literal's watch list, holding both binary headers and long-clause
/// watches; BCP walks this in order (§5 "Ordering guarantees": "watch-list
/// iteration order preserved across invocations").
pub type WatchList = Vec<Watch>;

/// Remove the long-clause watch for `cid` from `lit`'s list. *O(n)*, used
/// off the hot path (clause deletion, strengthening, dense/sparse
/// transitions).
pub fn detach_long(watchers: &mut [WatchList], lit: Lit, cid: ClauseId) {
    let list = &mut watchers[lit.as_index()];
    if let Some(pos) = list.iter().position(|w| !w.binary && w.cid == cid) {
        list.swap_remove(pos);
    }
}

/// Remove a binary header `(lit, other)` from `lit`'s list.
pub fn detach_binary(watchers: &mut [WatchList], lit: Lit, other: Lit) {
    let list = &mut watchers[lit.as_index()];
    if let Some(pos) = list.iter().position(|w| w.binary && w.blocker == other) {
        list.swap_remove(pos);
    }
}

/// Update the cached blocking literal for `cid` in `lit`'s list, used after
/// a clause is strengthened and its assertion literal changes.
pub fn update_blocker(watchers: &mut [WatchList], lit: Lit, cid: ClauseId, blocker: Lit) {
    for w in watchers[lit.as_index()].iter_mut() {
        if !w.binary && w.cid == cid {
            w.blocker = blocker;
            return;
        }
    }
}
