//! `sk inspect` — parse an input and preview the validated table.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::cmd::ingest::{self, InputArgs};
use crate::output::{OutputMode, pretty_kv, render};

/// Arguments for `sk inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of data rows to include in the preview.
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub head: usize,
}

/// Report payload for `sk inspect`.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub name: String,
    pub size_bytes: usize,
    pub header: Vec<String>,
    pub row_count: usize,
    pub preview: Vec<Vec<String>>,
}

/// Execute `sk inspect`.
pub async fn run_inspect(args: &InspectArgs, output: OutputMode) -> anyhow::Result<()> {
    let loaded = ingest::load(&args.input).await?;
    let preview = loaded.session.slice(loaded.index, 0, args.head).to_vec();
    let payload = InspectReport {
        name: loaded.name,
        size_bytes: loaded.size_bytes,
        header: loaded.header,
        row_count: loaded.row_count,
        preview,
    };
    render(output, &payload, |payload, w| render_inspect_human(payload, w))
}

fn render_inspect_human(report: &InspectReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_kv(w, "source", format!("{} ({} bytes)", report.name, report.size_bytes))?;
    pretty_kv(w, "rows", report.row_count.to_string())?;
    pretty_kv(
        w,
        "columns",
        format!("{} ({})", report.header.len(), report.header.join(", ")),
    )?;
    if !report.preview.is_empty() {
        writeln!(w, "\nfirst {} row(s):", report.preview.len())?;
        for row in &report.preview {
            writeln!(w, "  {}", row.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_rendering_shows_header_and_preview() {
        let report = InspectReport {
            name: "edges.csv".to_owned(),
            size_bytes: 24,
            header: vec!["source".to_owned(), "target".to_owned()],
            row_count: 3,
            preview: vec![vec!["a".to_owned(), "b".to_owned()]],
        };
        let mut buf = Vec::new();
        render_inspect_human(&report, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert!(text.contains("edges.csv (24 bytes)"));
        assert!(text.contains("2 (source, target)"));
        assert!(text.contains("  a, b"));
    }

    #[test]
    fn human_rendering_skips_empty_preview() {
        let report = InspectReport {
            name: "edges.csv".to_owned(),
            size_bytes: 10,
            header: vec!["source".to_owned(), "target".to_owned()],
            row_count: 5,
            preview: Vec::new(),
        };
        let mut buf = Vec::new();
        render_inspect_human(&report, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert!(!text.contains("row(s)"));
    }
}
