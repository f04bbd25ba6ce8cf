//! `sk import` — materialize an input as a graph and report its shape.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use skein_core::Feasibility;

use crate::cmd::ingest::{self, ColumnArgs, InputArgs, OrientationArgs};
use crate::output::{OutputMode, pretty_kv, render};

/// Arguments for `sk import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub orientation: OrientationArgs,
}

/// Report payload for `sk import`.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub name: String,
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub attr_columns: Vec<String>,
    pub feasibility: Feasibility,
}

/// Execute `sk import`.
pub async fn run_import(args: &ImportArgs, output: OutputMode) -> anyhow::Result<()> {
    let mut loaded = ingest::load(&args.input).await?;
    let (source, target) = args.columns.resolve(&loaded.header)?;
    let feasibility = loaded.session.determine(loaded.index, source, target);
    let directed = ingest::choose_orientation(&args.orientation, feasibility)?;
    let summary = loaded.session.import(loaded.index, source, target, directed);
    tracing::debug!(
        graph = %summary.name,
        nodes = summary.node_count,
        edges = summary.edge_count,
        "graph imported"
    );

    let attr_columns = loaded
        .header
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != source && index != target)
        .map(|(_, column)| column.clone())
        .collect();
    let payload = ImportReport {
        name: summary.name,
        directed: summary.directed,
        node_count: summary.node_count,
        edge_count: summary.edge_count,
        attr_columns,
        feasibility,
    };
    render(output, &payload, |payload, w| render_import_human(payload, w))
}

fn render_import_human(report: &ImportReport, w: &mut dyn Write) -> std::io::Result<()> {
    let orientation = if report.directed { "directed" } else { "undirected" };
    writeln!(w, "imported {} as a {orientation} graph", report.name)?;
    pretty_kv(w, "nodes", report.node_count.to_string())?;
    pretty_kv(w, "edges", report.edge_count.to_string())?;
    if !report.attr_columns.is_empty() {
        pretty_kv(w, "attributes", report.attr_columns.join(", "))?;
    }
    Ok(())
}
