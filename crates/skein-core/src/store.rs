//! Session-scoped collection of imported graphs.
//!
//! # Overview
//!
//! The store owns every graph imported during a session, in import order.
//! Indices are positional: removing a graph shifts every later graph down
//! by one, exactly like `Vec::remove`. Nothing is persisted; when the store
//! is dropped the graphs are gone.
//!
//! ## Change notification
//!
//! Presentation layers poll the store rather than holding references into
//! it, so the store carries a single change callback: registered with
//! [`GraphStore::set_on_change`] (replacing any previous one) and invoked
//! synchronously after every successful `add` or `remove`. The callback
//! takes no arguments; it is a "something changed, re-poll" signal, not a
//! change description.

#![allow(clippy::module_name_repetitions)]

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::graph::build::ImportedGraph;

/// Cheap, serializable description of one stored graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub directed: bool,
}

impl From<&ImportedGraph> for GraphSummary {
    fn from(graph: &ImportedGraph) -> Self {
        Self {
            name: graph.name.clone(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            directed: graph.directed,
        }
    }
}

type ChangeCallback = Box<dyn FnMut() + Send>;

/// Ordered, in-memory collection of imported graphs.
#[derive(Default)]
pub struct GraphStore {
    graphs: Vec<ImportedGraph>,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("graphs", &self.graphs.len())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl GraphStore {
    /// Empty store with no callback registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored graphs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.graphs.len()
    }

    /// Borrow the graph at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> &ImportedGraph {
        assert!(
            index < self.graphs.len(),
            "graph index {index} out of range ({} stored)",
            self.graphs.len()
        );
        &self.graphs[index]
    }

    /// Summary of the graph at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn summary(&self, index: usize) -> GraphSummary {
        GraphSummary::from(self.get(index))
    }

    /// Summaries of all stored graphs, in index order.
    #[must_use]
    pub fn summaries(&self) -> Vec<GraphSummary> {
        self.graphs.iter().map(GraphSummary::from).collect()
    }

    /// Append a graph and notify the change callback.
    pub fn add(&mut self, graph: ImportedGraph) {
        debug!(name = %graph.name, nodes = graph.node_count(), "graph added to store");
        self.graphs.push(graph);
        self.notify();
    }

    /// Remove the graph at `index`, shifting later indices down by one, and
    /// notify the change callback. The graph is discarded.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn remove(&mut self, index: usize) {
        assert!(
            index < self.graphs.len(),
            "graph index {index} out of range ({} stored)",
            self.graphs.len()
        );
        let removed = self.graphs.remove(index);
        debug!(name = %removed.name, "graph removed from store");
        self.notify();
    }

    /// Register `callback`, replacing any previously registered one. The
    /// callback is not invoked at registration time.
    pub fn set_on_change(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
