//! Ordered container primitives used by every traversal in the crate.
//!
//! Both containers store plain values (for graph work, copies of node ids),
//! never references into the graph, and are not thread-shared. The FIFO
//! [`Queue`] seeds breadth-first walks; the LIFO [`Stack`] seeds depth-first
//! walks.

mod queue;
mod stack;

pub use queue::Queue;
pub use stack::Stack;
