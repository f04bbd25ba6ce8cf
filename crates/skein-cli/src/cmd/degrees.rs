//! `sk degrees` — degree distribution (and optional top nodes) for an input.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::bail;
use clap::Args;
use serde::Serialize;

use skein_core::{DegreeKind, degree_distribution, node_degrees};

use crate::cmd::ingest::{self, ColumnArgs, InputArgs, OrientationArgs};
use crate::output::{OutputMode, render};

/// Arguments for `sk degrees`.
#[derive(Args, Debug)]
pub struct DegreesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub orientation: OrientationArgs,

    /// Degree kind: `in`, `out`, or `undirected`. Defaults to `out` for
    /// directed graphs and `undirected` otherwise.
    #[arg(long, value_name = "KIND")]
    pub kind: Option<DegreeKind>,

    /// Also list the N highest-degree nodes.
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub top: usize,
}

/// One entry of the optional highest-degree listing.
#[derive(Debug, Serialize)]
pub struct TopNode {
    pub label: String,
    pub degree: usize,
}

/// Report payload for `sk degrees`.
#[derive(Debug, Serialize)]
pub struct DegreeReport {
    pub name: String,
    pub directed: bool,
    pub kind: DegreeKind,
    pub distribution: BTreeMap<usize, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top: Vec<TopNode>,
}

/// Execute `sk degrees`.
pub async fn run_degrees(args: &DegreesArgs, output: OutputMode) -> anyhow::Result<()> {
    let mut loaded = ingest::load(&args.input).await?;
    let (source, target) = args.columns.resolve(&loaded.header)?;
    let feasibility = loaded.session.determine(loaded.index, source, target);
    let directed = ingest::choose_orientation(&args.orientation, feasibility)?;

    let default_kind = if directed {
        DegreeKind::Out
    } else {
        DegreeKind::Undirected
    };
    let kind = args.kind.unwrap_or(default_kind);
    let applies = match kind {
        DegreeKind::In | DegreeKind::Out => directed,
        DegreeKind::Undirected => !directed,
    };
    if !applies {
        let orientation = if directed { "directed" } else { "undirected" };
        bail!("degree kind `{kind}` does not apply to a {orientation} graph");
    }

    let summary = loaded.session.import(loaded.index, source, target, directed);
    let graph = loaded.session.graph(0);
    let distribution = degree_distribution(graph, kind);
    let top = if args.top == 0 {
        Vec::new()
    } else {
        let mut ranked: Vec<TopNode> = graph
            .graph
            .node_weights()
            .cloned()
            .zip(node_degrees(graph, kind))
            .map(|(label, degree)| TopNode { label, degree })
            .collect();
        ranked.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.label.cmp(&b.label)));
        ranked.truncate(args.top);
        ranked
    };

    let payload = DegreeReport {
        name: summary.name,
        directed: summary.directed,
        kind,
        distribution,
        top,
    };
    render(output, &payload, |payload, w| render_degrees_human(payload, w))
}

fn render_degrees_human(report: &DegreeReport, w: &mut dyn Write) -> std::io::Result<()> {
    let orientation = if report.directed { "directed" } else { "undirected" };
    writeln!(
        w,
        "{} degree distribution for {} ({orientation}):",
        report.kind, report.name
    )?;
    writeln!(w, "  degree  nodes")?;
    for (degree, count) in &report.distribution {
        writeln!(w, "  {degree:>6}  {count}")?;
    }
    if !report.top.is_empty() {
        writeln!(w, "\ntop nodes:")?;
        for node in &report.top {
            writeln!(w, "  {}  {}", node.label, node.degree)?;
        }
    }
    Ok(())
}
