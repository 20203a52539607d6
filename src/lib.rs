//! # `lineage` — Pedigree Relationship Graph
//!
//! A genealogical graph with typed **vertical** edges (parent-pair → child),
//! pool-backed node storage with stable ids, safe structural mutation, and
//! deterministic breadth-first / depth-first traversal of ancestors and
//! descendants.
//!
//! ## Key Features
//!
//! - **Vertical edges**: a `Vertical` links exactly one parent-pair node to
//!   exactly one child node; a node has at most one incoming vertical.
//! - **Synchronized mutation**: the edge type itself is a dumb data holder;
//!   [`PedigreeGraph`] is the only place where both sides of an edge are kept
//!   consistent (`attach_child`, `detach_child`, `remove_vertical`,
//!   `remove_node`).
//! - **Deterministic traversal**: ancestors and descendants walks are seeded
//!   through explicit [`Queue`]/[`Stack`] containers and guarded by a visited
//!   set, so they terminate even on transiently cyclic graphs.
//! - **Gene legends**: an [`AnnotationRegistry`] maps gene keys to affected
//!   nodes; [`GeneLegend`] composes one registry with a [`LegendConfig`]
//!   value object instead of per-classification subclasses.
//!
//! ## Example
//!
//! ```rust
//! use lineage::{PedigreeGraph, Sex, TraversalOrder};
//!
//! let mut graph = PedigreeGraph::new();
//! let mother = graph.add_member("Anna", Sex::Female);
//! let father = graph.add_member("Tomas", Sex::Male);
//! let family = graph.add_union("Anna+Tomas", mother, father).unwrap();
//! let child = graph.add_member("Jonas", Sex::Male);
//! graph.attach_child(family, child).unwrap();
//!
//! assert_eq!(graph.parents_of(child), Some(family));
//! assert_eq!(graph.mother_of(family), Some(mother));
//!
//! let reachable: Vec<_> = graph.descendants(mother, TraversalOrder::Bfs).collect();
//! assert!(reachable.contains(&child));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod error;
pub mod graph;
pub mod legend;

pub use collections::{Queue, Stack};
pub use error::PedigreeError;
pub use graph::{EdgeId, NodeId, PedigreeGraph, Sex, Traversal, TraversalOrder, Vertical};
pub use legend::{AnnotationRegistry, GeneLegend, LegendConfig};
