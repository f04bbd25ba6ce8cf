//! Degree analysis over imported graphs.
//!
//! # Overview
//!
//! Degrees come in three kinds. `In` and `Out` apply to graphs imported as
//! directed; `Undirected` applies to graphs imported as undirected. Asking
//! for a kind that does not match the graph's orientation is a caller bug
//! and panics.
//!
//! A self-loop contributes 2 to its node's undirected degree (both edge
//! ends land on the node) and 1 each to in- and out-degree, which keeps the
//! handshake identity intact: undirected degrees sum to twice the edge
//! count, and in- plus out-degrees do as well.
//!
//! Distributions are sparse: only degree values that occur appear as keys,
//! and nothing is cached — callers get a fresh computation against the
//! graph as it is now.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::debug;

use crate::graph::build::ImportedGraph;

// ---------------------------------------------------------------------------
// DegreeKind
// ---------------------------------------------------------------------------

/// Which degree to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeKind {
    /// Incoming edges; directed graphs only.
    In,
    /// Outgoing edges; directed graphs only.
    Out,
    /// Incident edge ends; undirected graphs only.
    Undirected,
}

impl fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Undirected => "undirected",
        };
        f.write_str(name)
    }
}

/// Error for [`DegreeKind::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown degree kind `{0}` (expected `in`, `out`, or `undirected`)")]
pub struct ParseDegreeKindError(String);

impl FromStr for DegreeKind {
    type Err = ParseDegreeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "undirected" => Ok(Self::Undirected),
            other => Err(ParseDegreeKindError(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Degree computation
// ---------------------------------------------------------------------------

/// Per-node degree of `kind`, indexed by node insertion order.
///
/// # Panics
///
/// Panics when `kind` does not match the graph's orientation (`In`/`Out`
/// on an undirected graph, `Undirected` on a directed one).
#[must_use]
pub fn node_degrees(imported: &ImportedGraph, kind: DegreeKind) -> Vec<usize> {
    assert_kind_matches(imported, kind);

    let mut degrees = vec![0_usize; imported.graph.node_count()];
    for edge in imported.graph.edge_references() {
        match kind {
            DegreeKind::In => degrees[edge.target().index()] += 1,
            DegreeKind::Out => degrees[edge.source().index()] += 1,
            DegreeKind::Undirected => {
                // A self-loop hits the same slot twice, counting 2.
                degrees[edge.source().index()] += 1;
                degrees[edge.target().index()] += 1;
            }
        }
    }
    degrees
}

/// Sparse histogram of `kind` degrees: degree value → number of nodes with
/// that degree. Absent keys mean zero nodes.
///
/// # Panics
///
/// Panics when `kind` does not match the graph's orientation.
#[must_use]
pub fn degree_distribution(imported: &ImportedGraph, kind: DegreeKind) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for degree in node_degrees(imported, kind) {
        *distribution.entry(degree).or_insert(0) += 1;
    }
    debug!(kind = %kind, buckets = distribution.len(), "degree distribution computed");
    distribution
}

fn assert_kind_matches(imported: &ImportedGraph, kind: DegreeKind) {
    let compatible = match kind {
        DegreeKind::In | DegreeKind::Out => imported.directed,
        DegreeKind::Undirected => !imported.directed,
    };
    let orientation = if imported.directed {
        "directed"
    } else {
        "undirected"
    };
    assert!(
        compatible,
        "degree kind `{kind}` does not apply to {orientation} graph `{}`",
        imported.name
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
