//! Known-topology regression tests for the ingest pipeline.
//!
//! Each test feeds a hand-crafted DSV input through the full core path —
//! parse → classify → build → degrees — and asserts analytically computed
//! values. Any behavior change in one stage shows up as a shifted value
//! here.

use std::collections::BTreeMap;

use skein_core::{
    DegreeKind, GraphStore, ImportedGraph, TableParser, classify, degree_distribution,
    node_degrees,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse(text: &str) -> skein_core::Table {
    TableParser::new()
        .parse(text.as_bytes())
        .expect("valid DSV input")
}

fn import(text: &str, directed: bool, name: &str) -> ImportedGraph {
    let table = parse(text);
    ImportedGraph::from_table(&table, 0, 1, directed, name)
}

// ===========================================================================
// Topology 1: Triangle cycle (a → b → c → a)
//
// Properties:
//   - No duplicate or reverse pairs: feasible both ways.
//   - Directed: every node has in = out = 1.
//   - Undirected: every node has degree 2.
// ===========================================================================

#[test]
fn triangle_is_feasible_both_ways() {
    let table = parse("source,target\na,b\nb,c\nc,a\n");
    let feasibility = classify(&table, 0, 1);
    assert!(feasibility.directed);
    assert!(feasibility.undirected);
}

#[test]
fn triangle_directed_degrees() {
    let graph = import("source,target\na,b\nb,c\nc,a\n", true, "triangle");
    assert_eq!(
        degree_distribution(&graph, DegreeKind::In),
        BTreeMap::from([(1, 3)])
    );
    assert_eq!(
        degree_distribution(&graph, DegreeKind::Out),
        BTreeMap::from([(1, 3)])
    );
}

#[test]
fn triangle_undirected_degrees() {
    let graph = import("source,target\na,b\nb,c\nc,a\n", false, "triangle");
    assert_eq!(
        degree_distribution(&graph, DegreeKind::Undirected),
        BTreeMap::from([(2, 3)])
    );
}

// ===========================================================================
// Topology 2: Reciprocal pair (a → b, b → a)
//
// Properties:
//   - The reverse pair rules out the undirected reading only.
//   - Directed degrees are symmetric.
// ===========================================================================

#[test]
fn reciprocal_pair_is_directed_only() {
    let table = parse("source,target\na,b\nb,a\n");
    let feasibility = classify(&table, 0, 1);
    assert!(feasibility.directed);
    assert!(!feasibility.undirected);
}

#[test]
fn reciprocal_pair_directed_degrees() {
    let graph = import("source,target\na,b\nb,a\n", true, "reciprocal");
    assert_eq!(node_degrees(&graph, DegreeKind::In), vec![1, 1]);
    assert_eq!(node_degrees(&graph, DegreeKind::Out), vec![1, 1]);
}

// ===========================================================================
// Topology 3: Star (hub linked to a, b, c), read undirected
//
// Properties:
//   - Hub has degree 3, leaves degree 1.
// ===========================================================================

#[test]
fn star_undirected_distribution() {
    let graph = import(
        "source,target\nhub,a\nhub,b\nhub,c\n",
        false,
        "star",
    );
    assert_eq!(
        degree_distribution(&graph, DegreeKind::Undirected),
        BTreeMap::from([(1, 3), (3, 1)])
    );
}

// ===========================================================================
// Topology 4: Self-loop plus pendant edge (a → a, a → b), read undirected
//
// Properties:
//   - The loop contributes 2 to a's degree, the pendant edge 1 more.
//   - Handshake identity: degrees sum to twice the edge count.
// ===========================================================================

#[test]
fn self_loop_feasibility_and_degrees() {
    let text = "source,target\na,a\na,b\n";
    let table = parse(text);
    let feasibility = classify(&table, 0, 1);
    assert!(feasibility.directed);
    assert!(feasibility.undirected);

    let graph = import(text, false, "looped");
    let degrees = node_degrees(&graph, DegreeKind::Undirected);
    assert_eq!(degrees, vec![3, 1]);
    assert_eq!(degrees.iter().sum::<usize>(), 2 * graph.edge_count());
}

// ===========================================================================
// Topology 5: Attribute-rich table (endpoints not in columns 0/1)
// ===========================================================================

#[test]
fn attributes_survive_the_whole_pipeline() {
    use petgraph::visit::EdgeRef;

    let table = parse("from,to,weight,since\nann,bob,5,2019\nbob,cam,1,2021\n");
    let feasibility = classify(&table, 0, 1);
    assert!(feasibility.directed);

    let graph = ImportedGraph::from_table(&table, 0, 1, true, "friends");
    let weights: Vec<&str> = graph
        .graph
        .edge_references()
        .filter_map(|edge| edge.weight().get("weight").map(String::as_str))
        .collect();
    assert_eq!(weights, vec!["5", "1"]);

    let edge = graph.graph.edge_references().next().expect("first edge");
    assert_eq!(edge.weight().get("since").map(String::as_str), Some("2019"));
    assert!(!edge.weight().contains_key("from"));
    assert!(!edge.weight().contains_key("to"));
}

// ===========================================================================
// Topology 6: Preview slicing feeds presentation without mutating state
// ===========================================================================

#[test]
fn slice_previews_rows_in_order() {
    let table = parse("source,target\na,b\nb,c\nc,d\nd,e\n");
    let preview = table.slice(1, 3);
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0], vec!["b", "c"]);
    assert_eq!(preview[1], vec!["c", "d"]);
    // Bounds beyond the table truncate instead of failing.
    assert_eq!(table.slice(3, 100).len(), 1);
    assert_eq!(table.row_count(), 4, "slicing never consumes rows");
}

// ===========================================================================
// Store round trip: import order, summaries, shifting removal
// ===========================================================================

#[test]
fn store_tracks_imports_in_order() {
    let mut store = GraphStore::new();
    store.add(import("source,target\na,b\n", true, "first"));
    store.add(import("source,target\nx,y\ny,z\n", false, "second"));

    assert_eq!(store.count(), 2);
    let summary = store.summary(1);
    assert_eq!(summary.name, "second");
    assert_eq!(summary.node_count, 3);
    assert_eq!(summary.edge_count, 2);
    assert!(!summary.directed);

    store.remove(0);
    assert_eq!(store.count(), 1);
    assert_eq!(store.summary(0).name, "second");
}
