//! `sk classify` — report which graph orientations can represent an input.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::cmd::ingest::{self, ColumnArgs, InputArgs};
use crate::output::{OutputMode, render};

/// Arguments for `sk classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Report payload for `sk classify`.
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub name: String,
    pub source_column: String,
    pub target_column: String,
    pub directed: bool,
    pub undirected: bool,
}

/// Execute `sk classify`.
pub async fn run_classify(args: &ClassifyArgs, output: OutputMode) -> anyhow::Result<()> {
    let loaded = ingest::load(&args.input).await?;
    let (source, target) = args.columns.resolve(&loaded.header)?;
    let feasibility = loaded.session.determine(loaded.index, source, target);
    let payload = ClassifyReport {
        name: loaded.name,
        source_column: loaded.header[source].clone(),
        target_column: loaded.header[target].clone(),
        directed: feasibility.directed,
        undirected: feasibility.undirected,
    };
    render(output, &payload, |payload, w| render_classify_human(payload, w))
}

fn render_classify_human(report: &ClassifyReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "feasible orientations for {} ({} -> {}):",
        report.name, report.source_column, report.target_column
    )?;
    writeln!(w, "  directed:    {}", yes_no(report.directed))?;
    writeln!(w, "  undirected:  {}", yes_no(report.undirected))?;
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_rendering_names_columns() {
        let report = ClassifyReport {
            name: "edges.csv".to_owned(),
            source_column: "from".to_owned(),
            target_column: "to".to_owned(),
            directed: true,
            undirected: false,
        };
        let mut buf = Vec::new();
        render_classify_human(&report, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert!(text.contains("edges.csv (from -> to)"));
        assert!(text.contains("directed:    yes"));
        assert!(text.contains("undirected:  no"));
    }
}
