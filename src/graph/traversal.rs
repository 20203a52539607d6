//! Ancestor/descendant traversal and the acyclicity guard.
//!
//! A traversal seeds a [`Queue`] (breadth-first) or [`Stack`] (depth-first)
//! with the start node's neighbors and consumes it lazily. Each call is an
//! independent walk with its own visited set, so a node is yielded at most
//! once and the walk terminates even when user edits have introduced a cycle
//! transiently. Iterators borrow the graph: a traversal must run to
//! completion before any attach/detach, which the borrow checker enforces.

use serde::{Deserialize, Serialize};

use crate::collections::{Queue, Stack};
use crate::error::PedigreeError;

use super::visited::VisitedSet;
use super::{NodeId, PedigreeGraph};

/// Search order for ancestor/descendant traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalOrder {
    /// Queue-driven, level-by-level exploration.
    Bfs,
    /// Stack-driven, depth-first exploration.
    Dfs,
}

/// The pending-node container behind a traversal.
enum Worklist {
    Bfs(Queue<NodeId>),
    Dfs(Stack<NodeId>),
}

impl Worklist {
    fn new(order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::Bfs => Worklist::Bfs(Queue::new()),
            TraversalOrder::Dfs => Worklist::Dfs(Stack::new()),
        }
    }

    fn push(&mut self, node: NodeId) {
        match self {
            Worklist::Bfs(queue) => queue.push(node),
            Worklist::Dfs(stack) => stack.push(node),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Worklist::Bfs(queue) => queue.pop(),
            Worklist::Dfs(stack) => stack.pop(),
        }
    }
}

/// Walk direction: which neighbor relation a traversal follows.
#[derive(Clone, Copy)]
enum Direction {
    Down,
    Up,
}

/// A lazy traversal over the nodes reachable from a start node.
///
/// Yields each reachable node exactly once; the start node itself is marked
/// visited but not yielded. Created by [`PedigreeGraph::descendants`] and
/// [`PedigreeGraph::ancestors`].
pub struct Traversal<'a, V> {
    graph: &'a PedigreeGraph<V>,
    worklist: Worklist,
    visited: VisitedSet,
    direction: Direction,
}

impl<V> Traversal<'_, V> {
    fn expand(&mut self, node: NodeId) {
        // Both arms collect through the same visited set, so a node is
        // enqueued at most once no matter how many paths reach it.
        match self.direction {
            Direction::Down => {
                for next in self.graph.downward_neighbors(node) {
                    if self.visited.try_visit(next.index()) {
                        self.worklist.push(next);
                    }
                }
            }
            Direction::Up => {
                for next in self.graph.upward_neighbors(node) {
                    if self.visited.try_visit(next.index()) {
                        self.worklist.push(next);
                    }
                }
            }
        }
    }
}

impl<V> Iterator for Traversal<'_, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.worklist.pop()?;
        self.expand(node);
        Some(node)
    }
}

impl<V> PedigreeGraph<V> {
    fn traverse(&self, start: NodeId, order: TraversalOrder, direction: Direction) -> Traversal<'_, V> {
        let mut traversal = Traversal {
            graph: self,
            worklist: Worklist::new(order),
            visited: VisitedSet::new(self.node_slot_capacity()),
            direction,
        };
        if self.contains(start) {
            traversal.visited.try_visit(start.index());
            traversal.expand(start);
        }
        traversal
    }

    /// Nodes reachable from `start` by walking downward: outgoing verticals
    /// plus partner memberships (so a member's walk passes through their
    /// unions to grandchildren). The start node is not yielded; an absent
    /// start yields nothing.
    pub fn descendants(&self, start: NodeId, order: TraversalOrder) -> Traversal<'_, V> {
        self.traverse(start, order, Direction::Down)
    }

    /// Nodes reachable from `start` by walking upward: the incoming
    /// vertical's parents node plus that node's registered partner pair (so
    /// grandparents are reached through the couple members' own incoming
    /// verticals). The start node is not yielded; an absent start yields
    /// nothing.
    pub fn ancestors(&self, start: NodeId, order: TraversalOrder) -> Traversal<'_, V> {
        self.traverse(start, order, Direction::Up)
    }

    /// Verifies that the downward relation (verticals plus partner
    /// memberships) is acyclic, using Kahn's algorithm.
    ///
    /// The intended graph is acyclic by construction, but raw edge writes or
    /// a partner registered below their own descendants can introduce a
    /// cycle; editor actions call this after such edits.
    ///
    /// # Errors
    /// Returns [`PedigreeError::CycleDetected`] when some node never reaches
    /// in-degree zero.
    pub fn check_acyclic(&self) -> Result<(), PedigreeError> {
        let capacity = self.node_slot_capacity();
        let mut in_degrees = vec![0usize; capacity];
        for (node, _) in self.iter_nodes() {
            for next in self.downward_neighbors(node) {
                in_degrees[next.index()] += 1;
            }
        }

        let roots: Vec<NodeId> = self
            .iter_nodes()
            .map(|(node, _)| node)
            .filter(|node| in_degrees[node.index()] == 0)
            .collect();
        let mut queue = Queue::with_capacity(roots.len());
        queue.set_to(&roots);

        let mut ordered = 0usize;
        while let Some(node) = queue.pop() {
            ordered += 1;
            for next in self.downward_neighbors(node) {
                in_degrees[next.index()] -= 1;
                if in_degrees[next.index()] == 0 {
                    queue.push(next);
                }
            }
        }

        if ordered == self.node_count() {
            Ok(())
        } else {
            Err(PedigreeError::CycleDetected)
        }
    }
}
