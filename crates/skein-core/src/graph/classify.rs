//! Directed/undirected feasibility analysis.
//!
//! # Overview
//!
//! Before materializing a graph, callers ask which orientations the edge
//! list can represent as a *simple* graph (no parallel edges). One pass over
//! the data rows answers both questions at once:
//!
//! - an exact repeat of an earlier `(source, target)` pair rules out both
//!   orientations (some pair of rows collides no matter how edges are read);
//! - a row whose reverse was seen earlier rules out only the undirected
//!   reading (the pair collapses onto one undirected edge) while staying
//!   valid as a directed pair.
//!
//! Both verdicts only ever move from feasible to infeasible, so the scan
//! stops early once both are gone. A row whose source equals its target is
//! an ordinary edge here: its reverse is itself, but only *earlier* rows are
//! consulted, so a lone self-loop rules out nothing.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::table::Table;

/// Which orientations an edge list can represent as a simple graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feasibility {
    /// No `(source, target)` pair occurs twice.
    pub directed: bool,
    /// No unordered endpoint pair occurs twice.
    pub undirected: bool,
}

/// Scan all data rows of `table` and report orientation feasibility.
///
/// `source` and `target` are 0-based column indices into the table.
///
/// # Panics
///
/// Panics if either column index is out of range; callers are expected to
/// have resolved columns against [`Table::header`] first.
#[must_use]
#[instrument(skip(table))]
pub fn classify(table: &Table, source: usize, target: usize) -> Feasibility {
    let columns = table.column_count();
    assert!(
        source < columns && target < columns,
        "column indices out of range: source={source}, target={target}, columns={columns}"
    );

    let mut directed = true;
    let mut undirected = true;
    let mut outgoing: HashMap<&str, HashSet<&str>> = HashMap::new();

    for row in table.rows() {
        let u = row[source].as_str();
        let v = row[target].as_str();
        if outgoing.get(u).is_some_and(|seen| seen.contains(v)) {
            // Exact repeat of an earlier row: collides in every orientation.
            directed = false;
            undirected = false;
            break;
        }
        if outgoing.get(v).is_some_and(|seen| seen.contains(u)) {
            // Reverse seen earlier: a directed pair, not an undirected edge.
            undirected = false;
        }
        outgoing.entry(u).or_default().insert(v);
    }

    debug!(directed, undirected, rows = table.row_count(), "edge list classified");
    Feasibility {
        directed,
        undirected,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
