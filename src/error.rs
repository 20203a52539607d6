//! Recoverable error conditions surfaced to the editor layer.
//!
//! None of these are fatal: each describes a local condition the interactive
//! caller can report to the user ("this person already has parents defined")
//! and recover from. Edge removal is deliberately infallible and idempotent,
//! so cleanup paths never need defensive checks.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Errors produced by graph mutation, traversal guards, and the fallible
/// container accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PedigreeError {
    /// `try_pop` on an empty `Queue` or `Stack`.
    #[error("pop on an empty container")]
    EmptyContainer,

    /// Attach attempted on a child that already has an incoming vertical.
    #[error("node {child} already has parents defined")]
    AlreadyHasParents {
        /// The child whose parents are already set.
        child: NodeId,
    },

    /// Mother/father lookup through a vertical whose parents side is unset.
    #[error("vertical edge has no parents endpoint")]
    NullParents,

    /// The acyclicity check found a cycle reachable through vertical edges
    /// or partner memberships.
    #[error("pedigree contains a cycle")]
    CycleDetected,

    /// The referenced node is not present in the graph.
    #[error("node {0} is not present in the graph")]
    MissingNode(NodeId),

    /// The referenced vertical edge is not present in the graph.
    #[error("vertical edge {0} is not present in the graph")]
    MissingEdge(EdgeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_user_presentable() {
        let err = PedigreeError::AlreadyHasParents {
            child: NodeId::new(4),
        };
        assert_eq!(err.to_string(), "node n4 already has parents defined");

        assert_eq!(
            PedigreeError::MissingEdge(EdgeId::new(2)).to_string(),
            "vertical edge e2 is not present in the graph"
        );
    }
}
