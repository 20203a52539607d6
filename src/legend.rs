//! Gene annotations and legend configuration.
//!
//! The display layer propagates gene/status information through the graph
//! (via [`descendants`]/[`ancestors`]) and records which nodes carry which
//! gene here. The registry never mutates the graph; it only maps keys to
//! node ids.
//!
//! A legend classification (candidate, causal, carrier, …) is a
//! [`LegendConfig`] value object composed into a single [`GeneLegend`] type
//! — one type plus a configuration record per classification, not a subclass
//! per classification.
//!
//! [`descendants`]: crate::PedigreeGraph::descendants
//! [`ancestors`]: crate::PedigreeGraph::ancestors

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::NodeId;

/// Maps gene keys to the set of affected nodes, with the reverse query.
///
/// Iteration order is deterministic: genes in first-registration order,
/// nodes per gene in first-case order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    cases: IndexMap<String, IndexSet<NodeId>>,
}

impl AnnotationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            cases: IndexMap::new(),
        }
    }

    /// Records that `node` carries `gene`. Returns `true` when this is a new
    /// case (the gene was absent, or the node was not yet registered under
    /// it).
    pub fn register(&mut self, gene: &str, node: NodeId) -> bool {
        let fresh = self
            .cases
            .entry(gene.to_owned())
            .or_default()
            .insert(node);
        if fresh {
            debug!(gene, node = %node, "registered gene case");
        }
        fresh
    }

    /// Drops `node`'s case of `gene`; a gene with no remaining cases is
    /// removed entirely. Returns `true` when a case was present.
    pub fn unregister(&mut self, gene: &str, node: NodeId) -> bool {
        let Some(nodes) = self.cases.get_mut(gene) else {
            return false;
        };
        let removed = nodes.shift_remove(&node);
        if nodes.is_empty() {
            self.cases.shift_remove(gene);
        }
        if removed {
            debug!(gene, node = %node, "unregistered gene case");
        }
        removed
    }

    /// Nodes registered under `gene`, in first-case order. Empty when the
    /// gene is unknown.
    pub fn nodes_with(&self, gene: &str) -> impl Iterator<Item = NodeId> + '_ {
        self.cases
            .get(gene)
            .into_iter()
            .flat_map(|nodes| nodes.iter().copied())
    }

    /// Genes registered on `node`, in first-registration order.
    pub fn genes_of(&self, node: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.cases
            .iter()
            .filter(move |(_, nodes)| nodes.contains(&node))
            .map(|(gene, _)| gene.as_str())
    }

    /// Returns `true` when at least one node is registered under `gene`.
    pub fn contains_gene(&self, gene: &str) -> bool {
        self.cases.contains_key(gene)
    }

    /// Number of nodes registered under `gene`.
    pub fn case_count(&self, gene: &str) -> usize {
        self.cases.get(gene).map_or(0, IndexSet::len)
    }

    /// Number of distinct genes with at least one case.
    pub fn gene_count(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` when no cases are registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Keeps only cases whose node satisfies `keep`; used after node
    /// removal to drop dangling ids. Genes left with no cases are removed.
    pub fn retain_nodes<F>(&mut self, mut keep: F)
    where
        F: FnMut(NodeId) -> bool,
    {
        self.cases.retain(|_, nodes| {
            nodes.retain(|&node| keep(node));
            !nodes.is_empty()
        });
    }

    /// Removes every case.
    pub fn clear(&mut self) {
        self.cases.clear();
    }
}

/// Display configuration for one gene classification.
///
/// The original editor shipped a near-identical subclass per classification;
/// these collapse to configuration records consumed by one [`GeneLegend`].
/// The palette is opaque color data for the display layer — no assignment
/// policy lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Stable classification key, e.g. `"candidate"`.
    pub key: String,
    /// Human-readable box title, e.g. `"Candidate Genes"`.
    pub label: String,
    /// Preferred colors, most-preferred first.
    pub palette: Vec<String>,
    /// Whether the display layer shows this legend at all.
    pub visible: bool,
}

impl LegendConfig {
    /// Creates a visible configuration with an empty palette.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            palette: Vec::new(),
            visible: true,
        }
    }

    /// Sets the preferred palette.
    #[must_use]
    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the legend as hidden from display.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// One gene classification: a configuration record plus its case registry.
#[derive(Debug, Clone)]
pub struct GeneLegend {
    config: LegendConfig,
    registry: AnnotationRegistry,
}

impl GeneLegend {
    /// Creates an empty legend for `config`.
    pub fn new(config: LegendConfig) -> Self {
        Self {
            config,
            registry: AnnotationRegistry::new(),
        }
    }

    /// The classification configuration.
    pub fn config(&self) -> &LegendConfig {
        &self.config
    }

    /// The case registry.
    pub fn registry(&self) -> &AnnotationRegistry {
        &self.registry
    }

    /// Mutable access to the case registry.
    pub fn registry_mut(&mut self) -> &mut AnnotationRegistry {
        &mut self.registry
    }

    /// Records a case of `gene` on `node`. Returns `true` when new.
    pub fn add_case(&mut self, gene: &str, node: NodeId) -> bool {
        self.registry.register(gene, node)
    }

    /// Drops a case of `gene` from `node`. Returns `true` when present.
    pub fn remove_case(&mut self, gene: &str, node: NodeId) -> bool {
        self.registry.unregister(gene, node)
    }

    /// Returns `true` when the legend has no cases and the display layer
    /// can omit its box.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
