//! A LIFO stack for depth-first traversal seeding.

use crate::error::PedigreeError;

/// A last-in-first-out container.
///
/// Same contract as [`Queue`] except that [`pop`](Stack::pop) removes the
/// most recently pushed element; `clear` is provided for symmetry.
///
/// [`Queue`]: crate::collections::Queue
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty stack with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Replaces the contents with a copy of `items`, preserving their order.
    ///
    /// The first element of `items` lands at the bottom of the stack, so a
    /// subsequent `pop` returns the last element of `items`. The input is
    /// copied; later mutation of the caller's sequence does not affect this
    /// stack.
    pub fn set_to(&mut self, items: &[T])
    where
        T: Clone,
    {
        self.items.clear();
        self.items.extend_from_slice(items);
    }

    /// Pushes `value` on top.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top element (the most recently pushed).
    ///
    /// Returns `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Like [`pop`](Stack::pop), but reports the empty case as
    /// [`PedigreeError::EmptyContainer`].
    ///
    /// # Errors
    /// Returns [`PedigreeError::EmptyContainer`] when the stack is empty.
    pub fn try_pop(&mut self) -> Result<T, PedigreeError> {
        self.pop().ok_or(PedigreeError::EmptyContainer)
    }

    /// Returns the current element count.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the stack holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
