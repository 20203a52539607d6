//! Word-packed visited set for graph traversals.
//!
//! Keeps traversal code expressing visited logic in one place. Sized once
//! from the graph's slot capacity; the graph cannot grow while a traversal
//! borrows it.

pub(crate) struct VisitedSet {
    words: Vec<u64>,
    bits: usize,
}

impl VisitedSet {
    pub(crate) fn new(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
            bits,
        }
    }

    /// Returns `true` iff this call observed the slot as not-yet-visited and
    /// marks it visited.
    pub(crate) fn try_visit(&mut self, index: usize) -> bool {
        debug_assert!(index < self.bits, "slot {index} out of bounds");
        let word = index / 64;
        let mask = 1u64 << (index % 64);
        if self.words[word] & mask != 0 {
            false
        } else {
            self.words[word] |= mask;
            true
        }
    }

    #[cfg(test)]
    pub(crate) fn is_visited(&self, index: usize) -> bool {
        let word = index / 64;
        let mask = 1u64 << (index % 64);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }
}
