//! The pedigree relationship graph.
//!
//! Nodes live in a slot pool with a free list, so ids stay stable across
//! unrelated mutations and removal is O(degree). A node plays the
//! *parent-pair* role through its outgoing [`Vertical`] edges and the *child*
//! role through its single optional incoming vertical; the same node can hold
//! both roles depending on graph position.
//!
//! Edge mutation is split between a dumb data holder and the owning
//! aggregate: [`Vertical`] exposes raw, non-synchronizing field accessors,
//! while [`PedigreeGraph`] is the exclusive place where both sides of an
//! edge are kept consistent (`attach_child`, `detach_child`,
//! `remove_vertical`, `remove_node`).
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_member` / `add_union` | \(O(1)\) amortized | Slot pool with free list |
//! | `attach_child` | \(O(1)\) amortized | Appends to the parents' edge set |
//! | `detach_child` / `remove_vertical` | \(O(\text{out-degree})\) | Scans the parents' edge set |
//! | `remove_node` | \(O(\text{degree})\) | Severs incident verticals and pair registrations |
//! | `children` / `parents_of` | \(O(1)\) to get iterator | Follows stored edge ids |

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::PedigreeError;

mod traversal;
mod vertical;
mod visited;

pub use traversal::{Traversal, TraversalOrder};
pub use vertical::Vertical;

/// A stable identifier for a node in a [`PedigreeGraph`].
///
/// Ids are indices into the graph's slot pool. Removing a node vacates its
/// slot; the id becomes dangling (lookups return `None`) until the slot is
/// reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A stable identifier for a [`Vertical`] edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(usize);

impl EdgeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Biological sex recorded on a member node.
///
/// Mother/father resolution on a parent pair picks the female and male
/// partner respectively; `Unknown` members match neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Female member; resolves as the mother of her unions.
    Female,
    /// Male member; resolves as the father of his unions.
    Male,
    /// Undetermined; union nodes also carry this.
    Unknown,
}

/// A pool slot: either a live entry or a vacancy awaiting reuse.
enum Slot<T> {
    Occupied(T),
    Vacant,
}

impl<T> Slot<T> {
    fn get(&self) -> Option<&T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }
}

/// Internal node storage.
struct NodeRecord<V> {
    payload: V,
    sex: Sex,
    /// The two members forming this node's parent-pair role, if registered.
    partners: Option<(NodeId, NodeId)>,
    /// Unions in whose partner pair this node appears.
    unions: Vec<NodeId>,
    /// Verticals where this node is the parents endpoint.
    outgoing: Vec<EdgeId>,
    /// The vertical where this node is the child endpoint. At most one: a
    /// node has exactly zero or one set of biological parents.
    incoming: Option<EdgeId>,
}

impl<V> NodeRecord<V> {
    fn new(payload: V, sex: Sex) -> Self {
        Self {
            payload,
            sex,
            partners: None,
            unions: Vec::new(),
            outgoing: Vec::new(),
            incoming: None,
        }
    }
}

/// The aggregate of member/union nodes and vertical edges.
///
/// `V` is the consumer's node payload, opaque to the core; the display and
/// editor layers attach whatever they need and query by [`NodeId`].
pub struct PedigreeGraph<V> {
    nodes: Vec<Slot<NodeRecord<V>>>,
    edges: Vec<Slot<Vertical>>,
    free_nodes: Vec<usize>,
    free_edges: Vec<usize>,
    node_count: usize,
    edge_count: usize,
}

impl<V> PedigreeGraph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            free_nodes: Vec::new(),
            free_edges: Vec::new(),
            node_count: 0,
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            edges: Vec::with_capacity(capacity),
            free_nodes: Vec::new(),
            free_edges: Vec::new(),
            node_count: 0,
            edge_count: 0,
        }
    }

    // ------------------------------------------------------------------
    // Node lifecycle
    // ------------------------------------------------------------------

    /// Adds a member node and returns its id.
    pub fn add_member(&mut self, payload: V, sex: Sex) -> NodeId {
        let id = self.alloc_node(NodeRecord::new(payload, sex));
        trace!(node = %id, "added member");
        id
    }

    /// Adds a union node whose parent-pair role is formed by `a` and `b`.
    ///
    /// The union itself carries [`Sex::Unknown`].
    ///
    /// # Errors
    /// Returns [`PedigreeError::MissingNode`] when `a` or `b` is absent.
    pub fn add_union(&mut self, payload: V, a: NodeId, b: NodeId) -> Result<NodeId, PedigreeError> {
        for id in [a, b] {
            if self.record(id).is_none() {
                return Err(PedigreeError::MissingNode(id));
            }
        }
        let union = self.add_member(payload, Sex::Unknown);
        self.set_partners(union, a, b)?;
        Ok(union)
    }

    /// Removes a node together with everything that references it: its
    /// incoming vertical, all outgoing verticals, its own pair registration,
    /// and the pair registration of any union it partnered in.
    ///
    /// Returns the payload, or `None` when the node is absent.
    pub fn remove_node(&mut self, node: NodeId) -> Option<V> {
        self.record(node)?;

        if let Some(edge) = self.record(node).and_then(|rec| rec.incoming) {
            self.remove_vertical(edge);
        }
        let outgoing: Vec<EdgeId> = self
            .record(node)
            .map(|rec| rec.outgoing.clone())
            .unwrap_or_default();
        for edge in outgoing {
            self.remove_vertical(edge);
        }

        // Unions that counted this node as a partner lose their pair.
        let memberships: Vec<NodeId> = self
            .record(node)
            .map(|rec| rec.unions.clone())
            .unwrap_or_default();
        for union in memberships {
            self.clear_partners(union);
        }
        self.clear_partners(node);

        let record = self.free_node(node)?;
        debug!(node = %node, "removed node");
        Some(record.payload)
    }

    // ------------------------------------------------------------------
    // Partner pairs
    // ------------------------------------------------------------------

    /// Registers `a` and `b` as the partner pair behind `union`'s parent-pair
    /// role, replacing any previous registration.
    ///
    /// # Errors
    /// Returns [`PedigreeError::MissingNode`] when any of the three nodes is
    /// absent.
    pub fn set_partners(&mut self, union: NodeId, a: NodeId, b: NodeId) -> Result<(), PedigreeError> {
        for id in [union, a, b] {
            if self.record(id).is_none() {
                return Err(PedigreeError::MissingNode(id));
            }
        }
        self.clear_partners(union);
        if let Some(rec) = self.record_mut(union) {
            rec.partners = Some((a, b));
        }
        if let Some(rec) = self.record_mut(a) {
            rec.unions.push(union);
        }
        if a != b {
            if let Some(rec) = self.record_mut(b) {
                rec.unions.push(union);
            }
        }
        trace!(union = %union, a = %a, b = %b, "registered partner pair");
        Ok(())
    }

    /// Drops `union`'s partner-pair registration, if any. Returns whether a
    /// registration was present.
    pub fn clear_partners(&mut self, union: NodeId) -> bool {
        let Some((a, b)) = self.record_mut(union).and_then(|rec| rec.partners.take()) else {
            return false;
        };
        for partner in [a, b] {
            if let Some(rec) = self.record_mut(partner) {
                rec.unions.retain(|&u| u != union);
            }
        }
        true
    }

    /// Returns the partner pair registered on `union`.
    pub fn partners(&self, union: NodeId) -> Option<(NodeId, NodeId)> {
        self.record(union).and_then(|rec| rec.partners)
    }

    /// Returns the female partner of `union`'s pair, if any.
    pub fn mother_of(&self, union: NodeId) -> Option<NodeId> {
        let (a, b) = self.partners(union)?;
        if self.sex_of(a) == Some(Sex::Female) {
            Some(a)
        } else if self.sex_of(b) == Some(Sex::Female) {
            Some(b)
        } else {
            None
        }
    }

    /// Returns the male partner of `union`'s pair, if any.
    pub fn father_of(&self, union: NodeId) -> Option<NodeId> {
        let (a, b) = self.partners(union)?;
        if self.sex_of(a) == Some(Sex::Male) {
            Some(a)
        } else if self.sex_of(b) == Some(Sex::Male) {
            Some(b)
        } else {
            None
        }
    }

    /// Returns the other member of `union`'s pair when `member` is one of
    /// the two partners.
    pub fn partner_of(&self, union: NodeId, member: NodeId) -> Option<NodeId> {
        let (a, b) = self.partners(union)?;
        if member == a {
            Some(b)
        } else if member == b {
            Some(a)
        } else {
            None
        }
    }

    /// Returns `true` when `member` is one of `union`'s registered partners.
    pub fn contains_partner(&self, union: NodeId, member: NodeId) -> bool {
        matches!(self.partners(union), Some((a, b)) if a == member || b == member)
    }

    /// Unions in whose partner pair `node` appears.
    pub fn unions_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.record(node)
            .into_iter()
            .flat_map(|rec| rec.unions.iter().copied())
    }

    // ------------------------------------------------------------------
    // Vertical edges
    // ------------------------------------------------------------------

    /// Creates a vertical from `parents` to `child` and registers it on both
    /// endpoints.
    ///
    /// This is the synchronized counterpart to the raw [`Vertical`] setters:
    /// the graph never writes one side of an edge without the matching
    /// inverse update in the same operation.
    ///
    /// # Errors
    /// - [`PedigreeError::MissingNode`] when either endpoint is absent.
    /// - [`PedigreeError::AlreadyHasParents`] when `child` already has an
    ///   incoming vertical; the existing parents are left untouched.
    pub fn attach_child(&mut self, parents: NodeId, child: NodeId) -> Result<EdgeId, PedigreeError> {
        if self.record(parents).is_none() {
            return Err(PedigreeError::MissingNode(parents));
        }
        let child_rec = self.record(child).ok_or(PedigreeError::MissingNode(child))?;
        if child_rec.incoming.is_some() {
            return Err(PedigreeError::AlreadyHasParents { child });
        }

        let edge = self.alloc_edge(Vertical::new(parents, child));
        self.record_mut(parents)
            .expect("parents checked present")
            .outgoing
            .push(edge);
        self.record_mut(child)
            .expect("child checked present")
            .incoming = Some(edge);

        trace!(edge = %edge, parents = %parents, child = %child, "attached child");
        Ok(edge)
    }

    /// Severs the vertical between `child` and its parents.
    ///
    /// Returns `false` (no-op) when the child is absent or has no parents.
    pub fn detach_child(&mut self, child: NodeId) -> bool {
        match self.incoming_vertical(child) {
            Some(edge) => {
                self.remove_vertical(edge);
                true
            }
            None => false,
        }
    }

    /// Removes a vertical edge, severing the child's incoming slot first and
    /// the parents' outgoing set second.
    ///
    /// Idempotent and deliberately error-free: calling it on an absent or
    /// already-removed edge leaves the graph unchanged, so cleanup paths
    /// never need defensive checks.
    pub fn remove_vertical(&mut self, edge: EdgeId) {
        let Some(vertical) = self.vertical(edge).copied() else {
            return;
        };
        if let Some(child) = vertical.child() {
            if let Some(rec) = self.record_mut(child) {
                if rec.incoming == Some(edge) {
                    rec.incoming = None;
                }
            }
        }
        if let Some(parents) = vertical.parents() {
            if let Some(rec) = self.record_mut(parents) {
                if let Some(position) = rec.outgoing.iter().position(|&e| e == edge) {
                    rec.outgoing.remove(position);
                }
            }
        }
        self.free_edge(edge);
        trace!(edge = %edge, "removed vertical");
    }

    /// Moves `child` under `new_parents`, detaching any current vertical.
    ///
    /// # Errors
    /// Returns [`PedigreeError::MissingNode`] when either node is absent; in
    /// that case the child's current parents are left untouched.
    pub fn replace_parents(&mut self, child: NodeId, new_parents: NodeId) -> Result<EdgeId, PedigreeError> {
        if self.record(new_parents).is_none() {
            return Err(PedigreeError::MissingNode(new_parents));
        }
        if self.record(child).is_none() {
            return Err(PedigreeError::MissingNode(child));
        }
        self.detach_child(child);
        self.attach_child(new_parents, child)
    }

    /// Returns the vertical edge, or `None` when it is absent.
    pub fn vertical(&self, edge: EdgeId) -> Option<&Vertical> {
        self.edges.get(edge.index()).and_then(Slot::get)
    }

    /// Mutable access to a vertical's raw endpoint fields.
    ///
    /// The setters on [`Vertical`] do not update endpoint back-references;
    /// callers taking this escape hatch own the matching inverse update.
    /// Prefer [`attach_child`](Self::attach_child) /
    /// [`detach_child`](Self::detach_child).
    pub fn vertical_mut(&mut self, edge: EdgeId) -> Option<&mut Vertical> {
        self.edges.get_mut(edge.index()).and_then(Slot::get_mut)
    }

    /// The vertical where `child` is the child endpoint.
    pub fn incoming_vertical(&self, child: NodeId) -> Option<EdgeId> {
        self.record(child).and_then(|rec| rec.incoming)
    }

    /// The mother behind a vertical's parents endpoint.
    ///
    /// # Errors
    /// - [`PedigreeError::MissingEdge`] when the edge is absent.
    /// - [`PedigreeError::NullParents`] when the parents side is unset.
    pub fn vertical_mother(&self, edge: EdgeId) -> Result<Option<NodeId>, PedigreeError> {
        let vertical = self.vertical(edge).ok_or(PedigreeError::MissingEdge(edge))?;
        let parents = vertical.parents().ok_or(PedigreeError::NullParents)?;
        Ok(self.mother_of(parents))
    }

    /// The father behind a vertical's parents endpoint.
    ///
    /// # Errors
    /// Same conditions as [`vertical_mother`](Self::vertical_mother).
    pub fn vertical_father(&self, edge: EdgeId) -> Result<Option<NodeId>, PedigreeError> {
        let vertical = self.vertical(edge).ok_or(PedigreeError::MissingEdge(edge))?;
        let parents = vertical.parents().ok_or(PedigreeError::NullParents)?;
        Ok(self.father_of(parents))
    }

    // ------------------------------------------------------------------
    // Relationship queries
    // ------------------------------------------------------------------

    /// The parents node of `child`'s incoming vertical.
    pub fn parents_of(&self, child: NodeId) -> Option<NodeId> {
        let edge = self.incoming_vertical(child)?;
        self.vertical(edge).and_then(Vertical::parents)
    }

    /// Children reached through `parents`' outgoing verticals, in attach
    /// order.
    pub fn children(&self, parents: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.record(parents)
            .into_iter()
            .flat_map(|rec| rec.outgoing.iter())
            .filter_map(|&edge| self.vertical(edge).and_then(Vertical::child))
    }

    /// Other children sharing `child`'s parents.
    pub fn siblings(&self, child: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.parents_of(child)
            .into_iter()
            .flat_map(|parents| self.children(parents))
            .filter(move |&sibling| sibling != child)
    }

    /// Nodes one step down from `node`: its children plus the unions it
    /// partners in. This is the neighbor relation that descendant traversal
    /// and the acyclicity check walk.
    pub fn downward_neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).chain(self.unions_of(node))
    }

    /// Nodes one step up from `node`: the parents node of its incoming
    /// vertical plus its own registered partner pair (for a union, the two
    /// members of the couple).
    pub fn upward_neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.parents_of(node)
            .into_iter()
            .chain(self.partners(node).into_iter().flat_map(|(a, b)| [a, b]))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns `true` when the node is present.
    pub fn contains(&self, node: NodeId) -> bool {
        self.record(node).is_some()
    }

    /// Shared access to a node's payload.
    pub fn get(&self, node: NodeId) -> Option<&V> {
        self.record(node).map(|rec| &rec.payload)
    }

    /// Mutable access to a node's payload.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut V> {
        self.record_mut(node).map(|rec| &mut rec.payload)
    }

    /// The sex recorded on a node.
    pub fn sex_of(&self, node: NodeId) -> Option<Sex> {
        self.record(node).map(|rec| rec.sex)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of live vertical edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates over all live nodes in slot order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &V)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(index, slot)| {
            slot.get().map(|rec| (NodeId::new(index), &rec.payload))
        })
    }

    /// The `(parents, child)` pairs of every live vertical, in slot order.
    ///
    /// An external serializer reconstructs the relationship structure by
    /// replaying these through [`attach_child`](Self::attach_child).
    pub fn attach_list(&self) -> Vec<(NodeId, NodeId)> {
        self.edges
            .iter()
            .filter_map(|slot| slot.get())
            .filter_map(|vertical| vertical.parents().zip(vertical.child()))
            .collect()
    }

    /// Checks the bipartite consistency invariants: every stored edge id
    /// resolves, incoming/outgoing back-references are symmetric, and pair
    /// registrations match the partners' membership lists.
    ///
    /// Raw [`vertical_mut`](Self::vertical_mut) writes can break these;
    /// every synchronized operation preserves them.
    pub fn validate_invariants(&self) -> bool {
        for (index, slot) in self.nodes.iter().enumerate() {
            let Some(rec) = slot.get() else { continue };
            let id = NodeId::new(index);
            if let Some(edge) = rec.incoming {
                match self.vertical(edge) {
                    Some(vertical) if vertical.child() == Some(id) => {}
                    _ => return false,
                }
            }
            for &edge in &rec.outgoing {
                match self.vertical(edge) {
                    Some(vertical) if vertical.parents() == Some(id) => {}
                    _ => return false,
                }
            }
            if let Some((a, b)) = rec.partners {
                for partner in [a, b] {
                    if !self.unions_of(partner).any(|u| u == id) {
                        return false;
                    }
                }
            }
        }
        for slot in &self.edges {
            let Some(vertical) = slot.get() else { continue };
            if let Some(child) = vertical.child() {
                if self.record(child).is_none() {
                    return false;
                }
            }
            if let Some(parents) = vertical.parents() {
                if self.record(parents).is_none() {
                    return false;
                }
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Pool internals
    // ------------------------------------------------------------------

    pub(crate) fn node_slot_capacity(&self) -> usize {
        self.nodes.len()
    }

    fn record(&self, node: NodeId) -> Option<&NodeRecord<V>> {
        self.nodes.get(node.index()).and_then(Slot::get)
    }

    fn record_mut(&mut self, node: NodeId) -> Option<&mut NodeRecord<V>> {
        self.nodes.get_mut(node.index()).and_then(Slot::get_mut)
    }

    fn alloc_node(&mut self, record: NodeRecord<V>) -> NodeId {
        self.node_count += 1;
        if let Some(index) = self.free_nodes.pop() {
            self.nodes[index] = Slot::Occupied(record);
            NodeId::new(index)
        } else {
            self.nodes.push(Slot::Occupied(record));
            NodeId::new(self.nodes.len() - 1)
        }
    }

    fn free_node(&mut self, node: NodeId) -> Option<NodeRecord<V>> {
        let slot = self.nodes.get_mut(node.index())?;
        match core::mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(record) => {
                self.free_nodes.push(node.index());
                self.node_count -= 1;
                Some(record)
            }
            Slot::Vacant => None,
        }
    }

    fn alloc_edge(&mut self, vertical: Vertical) -> EdgeId {
        self.edge_count += 1;
        if let Some(index) = self.free_edges.pop() {
            self.edges[index] = Slot::Occupied(vertical);
            EdgeId::new(index)
        } else {
            self.edges.push(Slot::Occupied(vertical));
            EdgeId::new(self.edges.len() - 1)
        }
    }

    fn free_edge(&mut self, edge: EdgeId) {
        if let Some(slot) = self.edges.get_mut(edge.index()) {
            if matches!(slot, Slot::Occupied(_)) {
                *slot = Slot::Vacant;
                self.free_edges.push(edge.index());
                self.edge_count -= 1;
            }
        }
    }
}

impl<V> Default for PedigreeGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}
