//! Graph materialization from a validated edge-list table.
//!
//! # Overview
//!
//! [`ImportedGraph::from_table`] walks the data rows in file order and turns
//! each one into an edge. Endpoint labels are interned into petgraph nodes
//! the first time they appear, so node indices follow first-appearance order
//! and re-running the build on the same table yields an identical graph.
//!
//! ## Edge attributes
//!
//! Every column that is neither the source nor the target column becomes an
//! edge attribute, keyed by its header name. A table with only the two
//! endpoint columns produces edges with empty attribute maps.
//!
//! ## No re-validation
//!
//! The builder trusts its inputs: it does not re-run feasibility analysis
//! and will happily append parallel edges or self-loops. Gate on
//! [`crate::graph::classify::classify`] first when simple-graph semantics
//! matter.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::table::Table;

/// Attributes attached to one edge: non-endpoint columns keyed by header
/// name. A `BTreeMap` keeps serialization and test output deterministic.
pub type EdgeAttrs = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// ImportedGraph
// ---------------------------------------------------------------------------

/// A graph materialized from an edge-list table.
///
/// Nodes are cell labels (strings); edges follow table row order and carry
/// the row's non-endpoint columns as attributes. Storage is always a
/// [`DiGraph`]; [`Self::directed`] records how the edges are meant to be
/// interpreted and is consumed by the degree analyzer.
#[derive(Debug, Clone)]
pub struct ImportedGraph {
    /// Display name, conventionally the name of the ingestion source.
    pub name: String,
    /// Whether edges are read as directed arcs or undirected links.
    pub directed: bool,
    /// Underlying storage: node weights are labels, edge weights are
    /// attribute maps. Parallel edges are preserved as-is.
    pub graph: DiGraph<String, EdgeAttrs>,
    /// Mapping from node label to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl ImportedGraph {
    /// Build a graph from `table`, reading endpoints from the `source` and
    /// `target` columns (0-based).
    ///
    /// # Panics
    ///
    /// Panics if either column index is out of range; callers are expected
    /// to have resolved columns against [`Table::header`] first.
    #[must_use]
    #[instrument(skip(table, name), fields(rows = table.row_count()))]
    pub fn from_table(
        table: &Table,
        source: usize,
        target: usize,
        directed: bool,
        name: impl Into<String>,
    ) -> Self {
        let columns = table.column_count();
        assert!(
            source < columns && target < columns,
            "column indices out of range: source={source}, target={target}, columns={columns}"
        );

        let attr_columns: Vec<usize> = (0..columns)
            .filter(|&column| column != source && column != target)
            .collect();

        let mut graph = DiGraph::<String, EdgeAttrs>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for row in table.rows() {
            let from = *node_map
                .entry(row[source].clone())
                .or_insert_with(|| graph.add_node(row[source].clone()));
            let to = *node_map
                .entry(row[target].clone())
                .or_insert_with(|| graph.add_node(row[target].clone()));

            let mut attrs = EdgeAttrs::new();
            for &column in &attr_columns {
                attrs.insert(table.header()[column].clone(), row[column].clone());
            }
            graph.add_edge(from, to, attrs);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph materialized"
        );
        Self {
            name: name.into(),
            directed,
            graph,
            node_map,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a label.
    #[must_use]
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_map.get(label).copied()
    }

    /// The label stored at a node.
    #[must_use]
    pub fn label(&self, index: NodeIndex) -> Option<&str> {
        self.graph.node_weight(index).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
