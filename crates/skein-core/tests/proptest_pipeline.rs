//! Property-based tests for the ingest pipeline.

use proptest::prelude::*;

use skein_core::{DegreeKind, ImportedGraph, ParseError, Table, TableParser, classify, node_degrees};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Small label alphabet so duplicates and reverse pairs actually occur.
fn arb_label() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn arb_edges() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_label(), arb_label()), 1..40)
}

/// Well-formed cells: non-empty, no delimiter/quote/newline, already trimmed
/// once the parser is done with them.
fn arb_cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-]{1,8}"
}

fn edge_text(edges: &[(String, String)]) -> String {
    let mut text = String::from("source,target\n");
    for (u, v) in edges {
        text.push_str(&format!("{u},{v}\n"));
    }
    text
}

fn edge_table(edges: &[(String, String)]) -> Table {
    TableParser::new()
        .parse(edge_text(edges).as_bytes())
        .expect("generated edge list is valid DSV")
}

proptest! {
    /// The parser never panics, whatever the bytes.
    #[test]
    fn parse_total_on_arbitrary_bytes(input in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = TableParser::new().parse(&input);
    }

    /// Well-formed input parses, counts rows correctly, and trims cells.
    #[test]
    fn well_formed_tables_round_trip(
        rows in prop::collection::vec(prop::collection::vec(arb_cell(), 3), 1..25),
    ) {
        let mut text = String::from("col_a,col_b,col_c\n");
        for row in &rows {
            text.push_str(&format!("  {} , {} , {} \n", row[0], row[1], row[2]));
        }

        let table = TableParser::new().parse(text.as_bytes()).expect("valid input");
        prop_assert_eq!(table.row_count(), rows.len());
        prop_assert_eq!(table.column_count(), 3);
        for (parsed, original) in table.rows().iter().zip(&rows) {
            prop_assert_eq!(parsed, original);
        }
    }

    /// A one-column table always fails the minimum-width rule.
    #[test]
    fn single_column_never_parses(cells in prop::collection::vec(arb_cell(), 2..10)) {
        let text = cells.join("\n");
        let err = TableParser::new().parse(text.as_bytes()).expect_err("one column");
        prop_assert_eq!(err, ParseError::RowTooShort { row: 1, found: 1 });
    }

    /// Classification is deterministic.
    #[test]
    fn classify_is_deterministic(edges in arb_edges()) {
        let table = edge_table(&edges);
        let first = classify(&table, 0, 1);
        let second = classify(&table, 0, 1);
        prop_assert_eq!(first, second);
    }

    /// Feasibility flags are monotone: appending rows can only take a flag
    /// from feasible to infeasible, never back.
    #[test]
    fn classify_flags_are_monotone(edges in arb_edges()) {
        let split = (edges.len() / 2).max(1);
        let full = classify(&edge_table(&edges), 0, 1);
        let prefix = classify(&edge_table(&edges[..split]), 0, 1);
        // full feasible ⇒ prefix feasible
        prop_assert!(!full.directed || prefix.directed);
        prop_assert!(!full.undirected || prefix.undirected);
    }

    /// Undirected degrees satisfy the handshake identity, self-loops and
    /// parallel edges included.
    #[test]
    fn handshake_identity_undirected(edges in arb_edges()) {
        let table = edge_table(&edges);
        let graph = ImportedGraph::from_table(&table, 0, 1, false, "prop");
        let total: usize = node_degrees(&graph, DegreeKind::Undirected).iter().sum();
        prop_assert_eq!(total, 2 * graph.edge_count());
    }

    /// In- and out-degrees each sum to the edge count on directed graphs.
    #[test]
    fn directed_degree_sums(edges in arb_edges()) {
        let table = edge_table(&edges);
        let graph = ImportedGraph::from_table(&table, 0, 1, true, "prop");
        let in_total: usize = node_degrees(&graph, DegreeKind::In).iter().sum();
        let out_total: usize = node_degrees(&graph, DegreeKind::Out).iter().sum();
        prop_assert_eq!(in_total, graph.edge_count());
        prop_assert_eq!(out_total, graph.edge_count());
    }

    /// The distribution is a re-bucketing of per-node degrees: bucket counts
    /// sum to the node count and weighted degrees match the per-node sum.
    #[test]
    fn distribution_is_consistent_with_node_degrees(edges in arb_edges()) {
        let table = edge_table(&edges);
        let graph = ImportedGraph::from_table(&table, 0, 1, false, "prop");
        let degrees = node_degrees(&graph, DegreeKind::Undirected);
        let distribution = skein_core::degree_distribution(&graph, DegreeKind::Undirected);

        let bucket_total: usize = distribution.values().sum();
        prop_assert_eq!(bucket_total, graph.node_count());

        let weighted: usize = distribution.iter().map(|(degree, count)| degree * count).sum();
        prop_assert_eq!(weighted, degrees.iter().sum::<usize>());

        prop_assert!(distribution.keys().all(|&degree| degrees.contains(&degree)));
    }
}
