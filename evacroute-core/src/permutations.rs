//! Deterministic permutation enumeration (Heap's algorithm).

use std::iter::FusedIterator;

/// Enumerate every ordering of `0..size`.
///
/// The first item is the identity ordering and each following item differs
/// from its predecessor by a single swap. The sequence is finite (`size!`
/// items) and identical on every run, so searches that keep the first best
/// ordering break ties reproducibly.
///
/// # Examples
/// ```
/// use evacroute_core::permutations;
///
/// let all: Vec<Vec<usize>> = permutations(3).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], [0, 1, 2]);
/// assert_eq!(all[1], [1, 0, 2]);
/// ```
#[must_use]
pub fn permutations(size: usize) -> Permutations {
    Permutations {
        indices: (0..size).collect(),
        counters: vec![0; size],
        cursor: 1,
        started: false,
    }
}

/// Iterator returned by [`permutations`].
#[derive(Debug, Clone)]
pub struct Permutations {
    indices: Vec<usize>,
    counters: Vec<usize>,
    cursor: usize,
    started: bool,
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    #[expect(
        clippy::indexing_slicing,
        reason = "cursor stays below indices.len() and counters[cursor] <= cursor"
    )]
    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        while self.cursor < self.indices.len() {
            let counter = self.counters[self.cursor];
            if counter < self.cursor {
                let partner = if self.cursor & 1 == 0 { 0 } else { counter };
                self.indices.swap(partner, self.cursor);
                self.counters[self.cursor] = counter.saturating_add(1);
                self.cursor = 1;
                return Some(self.indices.clone());
            }
            self.counters[self.cursor] = 0;
            self.cursor = self.cursor.saturating_add(1);
        }
        None
    }
}

impl FusedIterator for Permutations {}
