//! Graph construction and analysis over validated edge-list tables.
//!
//! # Overview
//!
//! This module turns a validated [`crate::table::Table`] into a
//! [`petgraph`]-backed graph and answers structural questions about it.
//! Everything here is synchronous and CPU-bound; resolving the bytes that
//! become a table is the ingestion layer's job.
//!
//! ## Pipeline
//!
//! ```text
//! Table (validated, rectangular)
//!    ↓  classify::classify(table, source, target)
//! Feasibility { directed, undirected }
//!    ↓  build::ImportedGraph::from_table(table, source, target, directed, name)
//! ImportedGraph (DiGraph + node_map + orientation flag)
//!    ↓  degree::degree_distribution(graph, kind)
//! BTreeMap<usize, usize> (degree → node count)
//! ```
//!
//! ## Orientation
//!
//! Storage is always a directed [`petgraph::graph::DiGraph`]; the
//! [`build::ImportedGraph::directed`] flag records how edges are meant to be
//! read. Undirected semantics are applied at analysis time (a stored edge
//! contributes to both endpoints' undirected degree), never by rewriting
//! stored endpoints.
//!
//! ## Typical usage
//!
//! ```rust,ignore
//! use skein_core::graph::{classify, ImportedGraph, degree_distribution, DegreeKind};
//!
//! let feasibility = classify(&table, 0, 1);
//! let graph = ImportedGraph::from_table(&table, 0, 1, feasibility.directed, "friends");
//! let dist = degree_distribution(&graph, DegreeKind::Out);
//! ```

pub mod build;
pub mod classify;
pub mod degree;

// Re-export primary types at module level for convenience.
pub use build::{EdgeAttrs, ImportedGraph};
pub use classify::{Feasibility, classify};
pub use degree::{DegreeKind, degree_distribution, node_degrees};
