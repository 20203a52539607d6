//! A FIFO queue for breadth-first traversal seeding.

use std::collections::VecDeque;

use crate::error::PedigreeError;

/// A first-in-first-out container.
///
/// The empty-pop case is reported two ways, consistently with [`Stack`]:
/// [`pop`](Queue::pop) returns the `None` sentinel, while
/// [`try_pop`](Queue::try_pop) surfaces [`PedigreeError::EmptyContainer`] for
/// callers that want an error value.
///
/// ### Performance Characteristics
/// | Operation | Complexity |
/// |-----------|------------|
/// | `push` | \(O(1)\) amortized |
/// | `pop` | \(O(1)\) |
/// | `size` | \(O(1)\) |
/// | `set_to` | \(O(n)\) (copies the input) |
///
/// [`Stack`]: crate::collections::Stack
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Creates an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Replaces the contents with a copy of `items`, preserving their order.
    ///
    /// The input is copied, so later mutation of the caller's sequence does
    /// not affect this queue.
    pub fn set_to(&mut self, items: &[T])
    where
        T: Clone,
    {
        self.items.clear();
        self.items.extend(items.iter().cloned());
    }

    /// Appends `value` at the tail.
    pub fn push(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes and returns the head element (the earliest pushed).
    ///
    /// Returns `None` when the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Like [`pop`](Queue::pop), but reports the empty case as
    /// [`PedigreeError::EmptyContainer`].
    ///
    /// # Errors
    /// Returns [`PedigreeError::EmptyContainer`] when the queue is empty.
    pub fn try_pop(&mut self) -> Result<T, PedigreeError> {
        self.pop().ok_or(PedigreeError::EmptyContainer)
    }

    /// Returns the current element count.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
