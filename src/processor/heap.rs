//! Elimination/subsumption candidate queue (§3 "flags {... eliminate-
//! candidate, subsume-candidate}", §4.10 step 4, §4.11).
//!
//! §4.10 step 4 recomputes each candidate's actual occurrence counts fresh
//! at processing time ("flushing satisfied clauses during the count"), so a
//! stale priority-by-occurrence-count ordering would be thrown away
//! immediately after being built; this is a deduplicated FIFO of variables
//! flagged as candidates instead of a re-sorted heap, named `ElimHeap` to
//! match the role the spec describes.
use std::collections::VecDeque;

#[derive(Clone, Debug, Default)]
pub struct ElimHeap {
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl ElimHeap {
    pub fn new(n: usize) -> ElimHeap {
        ElimHeap {
            queue: VecDeque::new(),
            queued: vec![false; n + 1],
        }
    }

    pub fn expand_to(&mut self, vi: usize) {
        if vi >= self.queued.len() {
            self.queued.resize(vi + 1, false);
        }
    }

    pub fn push(&mut self, vi: usize) {
        self.expand_to(vi);
        if !self.queued[vi] {
            self.queued[vi] = true;
            self.queue.push_back(vi);
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        let vi = self.queue.pop_front()?;
        self.queued[vi] = false;
        Some(vi)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
