//! Priority frontier of partial routes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use courier_core::{Stop, StopSet};

/// A partial route waiting to be expanded.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) stop: Stop,
    pub(crate) path: Vec<Stop>,
    pub(crate) visited: StopSet,
    pub(crate) g: f64,
    pub(crate) f: f64,
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    state: SearchState,
}

// `BinaryHeap` is a max-heap, so the comparison is reversed: lower `f`
// first, then lower insertion sequence.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .state
            .f
            .total_cmp(&self.state.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-`f` queue with first-in-first-out tie-breaking.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, state: SearchState) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { seq, state });
    }

    pub(crate) fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|entry| entry.state)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
