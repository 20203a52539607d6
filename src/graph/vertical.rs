//! The vertical connection: a typed parent-pair → child edge.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A directed edge stating "this parent pair produced this child".
///
/// `Vertical` is a pure data holder. Constructing one registers nothing:
/// wiring the edge into the endpoints' collections is the responsibility of
/// [`PedigreeGraph::attach_child`], and severing both sides belongs to
/// [`PedigreeGraph::remove_vertical`]. The setters here write a single field
/// and leave the old and new endpoints' back-references untouched — callers
/// using them directly own the matching inverse update.
///
/// [`PedigreeGraph::attach_child`]: super::PedigreeGraph::attach_child
/// [`PedigreeGraph::remove_vertical`]: super::PedigreeGraph::remove_vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertical {
    parents: Option<NodeId>,
    child: Option<NodeId>,
}

impl Vertical {
    /// Creates an edge with both endpoints set. No side effects.
    pub fn new(parents: NodeId, child: NodeId) -> Self {
        Self {
            parents: Some(parents),
            child: Some(child),
        }
    }

    /// The parents endpoint.
    pub fn parents(&self) -> Option<NodeId> {
        self.parents
    }

    /// The child endpoint.
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    /// Overwrites the parents endpoint without touching back-references.
    pub fn set_parents(&mut self, parents: Option<NodeId>) {
        self.parents = parents;
    }

    /// Overwrites the child endpoint without touching back-references.
    pub fn set_child(&mut self, child: Option<NodeId>) {
        self.child = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_sets_both_endpoints() {
        let vertical = Vertical::new(NodeId::new(0), NodeId::new(1));
        assert_eq!(vertical.parents(), Some(NodeId::new(0)));
        assert_eq!(vertical.child(), Some(NodeId::new(1)));
    }

    #[test]
    fn raw_setters_write_single_fields() {
        let mut vertical = Vertical::new(NodeId::new(0), NodeId::new(1));
        vertical.set_child(Some(NodeId::new(2)));
        vertical.set_parents(None);

        assert_eq!(vertical.child(), Some(NodeId::new(2)));
        assert_eq!(vertical.parents(), None);
    }
}
