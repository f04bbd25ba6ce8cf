//! Shared plumbing for commands that ingest an edge list: input resolution
//! (file path, URL, or embedded sample), column selection against the parsed
//! header, and orientation choice against classifier feasibility.

use anyhow::{Context, Result, anyhow, bail};
use bytes::Bytes;
use clap::Args;

use skein_core::{Feasibility, TableParser};
use skein_session::Session;

use crate::cmd::samples;

// ---------------------------------------------------------------------------
// Input selection
// ---------------------------------------------------------------------------

/// Where the edge list comes from, plus parser tuning.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// File path or http(s) URL of the edge list.
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Use an embedded sample instead of a file (see `sk samples`).
    #[arg(long, value_name = "NAME", conflicts_with = "input")]
    pub sample: Option<String>,

    /// Field delimiter.
    #[arg(long, short = 'd', default_value_t = ',', value_name = "CHAR")]
    pub delimiter: char,

    /// Stop parsing after N records and fail with a truncation error.
    #[arg(long, value_name = "N")]
    pub max_records: Option<usize>,
}

/// A fully resolved and successfully parsed input, ready for column work.
pub struct Loaded {
    pub session: Session,
    pub index: usize,
    pub name: String,
    pub size_bytes: usize,
    pub header: Vec<String>,
    pub row_count: usize,
}

/// Resolve the input, wait for its content, and parse it.
///
/// # Errors
///
/// Fails when no input was given, the sample name is unknown, the content
/// cannot be resolved, or the bytes do not form a valid table.
pub async fn load(args: &InputArgs) -> Result<Loaded> {
    let delimiter = u8::try_from(args.delimiter)
        .map_err(|_| anyhow!("delimiter must be a single-byte character, got `{}`", args.delimiter))?;
    let mut parser = TableParser::new().delimiter(delimiter);
    if let Some(limit) = args.max_records {
        parser = parser.max_records(limit);
    }
    let mut session = Session::with_parser(parser);

    let index = match (args.sample.as_deref(), args.input.as_deref()) {
        (Some(sample_name), _) => {
            let sample = samples::find(sample_name).ok_or_else(|| {
                anyhow!(
                    "unknown sample `{sample_name}` (available: {})",
                    samples::names().join(", ")
                )
            })?;
            session.enqueue_bytes(sample.name, Bytes::from_static(sample.data.as_bytes()))
        }
        (None, Some(input)) if is_url(input) => session.enqueue_url(input, None)?,
        (None, Some(path)) => session.enqueue_file(path, None),
        (None, None) => bail!("missing input: pass a file path, a URL, or --sample NAME"),
    };

    let name = session.source_name(index).to_owned();
    let report = session
        .parse(index)
        .await
        .with_context(|| format!("could not resolve `{name}`"))?;
    if let Some(message) = report.parse_error {
        bail!("{name}: {message}");
    }

    let header = report.header.unwrap_or_default();
    let size_bytes = session.source_size(index).unwrap_or_default();
    tracing::debug!(name = %name, bytes = size_bytes, rows = report.row_count, "input resolved");
    Ok(Loaded {
        session,
        index,
        name,
        size_bytes,
        header,
        row_count: report.row_count,
    })
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Endpoint column selectors, by header name or zero-based index.
#[derive(Args, Debug)]
pub struct ColumnArgs {
    /// Column holding the edge source (header name or zero-based index).
    #[arg(long, short = 's', value_name = "COL")]
    pub source: String,

    /// Column holding the edge target (header name or zero-based index).
    #[arg(long, short = 't', value_name = "COL")]
    pub target: String,
}

impl ColumnArgs {
    /// Resolve both selectors against the parsed header.
    ///
    /// # Errors
    ///
    /// Fails when either selector matches no column, or both name the same
    /// column.
    pub fn resolve(&self, header: &[String]) -> Result<(usize, usize)> {
        let source = resolve_column(header, &self.source).context("invalid --source")?;
        let target = resolve_column(header, &self.target).context("invalid --target")?;
        if source == target {
            bail!("--source and --target must name different columns");
        }
        Ok((source, target))
    }
}

/// Map a selector to a column index. Header names win over indices, so a
/// header literally named `0` is addressed by name and its neighbors by
/// position.
fn resolve_column(header: &[String], selector: &str) -> Result<usize> {
    if let Some(index) = header.iter().position(|column| column == selector) {
        return Ok(index);
    }
    if let Ok(index) = selector.parse::<usize>() {
        if index < header.len() {
            return Ok(index);
        }
    }
    bail!("no column `{selector}` (header: {})", header.join(", "))
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Explicit orientation flags; when absent the classifier decides.
#[derive(Args, Debug)]
pub struct OrientationArgs {
    /// Import as a directed graph.
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,

    /// Import as an undirected graph.
    #[arg(long)]
    pub undirected: bool,
}

/// Pick an orientation, honoring explicit flags and falling back to the
/// classifier. Auto mode prefers directed, which never loses information
/// from an edge list.
///
/// # Errors
///
/// Fails when the requested (or any) orientation cannot represent the input.
pub fn choose_orientation(args: &OrientationArgs, feasibility: Feasibility) -> Result<bool> {
    if args.directed {
        if !feasibility.directed {
            bail!("input is not directed-feasible: some connection repeats");
        }
        return Ok(true);
    }
    if args.undirected {
        if !feasibility.undirected {
            bail!(
                "input is not undirected-feasible: a connection repeats or appears in both directions"
            );
        }
        return Ok(false);
    }
    if feasibility.directed {
        Ok(true)
    } else {
        bail!("no orientation can represent this edge list: duplicate connections present")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|&name| name.to_owned()).collect()
    }

    #[test]
    fn resolve_by_name_and_index() {
        let header = header(&["from", "to", "weight"]);
        assert_eq!(resolve_column(&header, "to").expect("by name"), 1);
        assert_eq!(resolve_column(&header, "2").expect("by index"), 2);
    }

    #[test]
    fn name_wins_over_index() {
        let header = header(&["0", "1"]);
        // `1` names the second column, not index 1 by accident: same answer,
        // but `0` must resolve to position 0 by name.
        assert_eq!(resolve_column(&header, "0").expect("by name"), 0);
        assert_eq!(resolve_column(&header, "1").expect("by name"), 1);
    }

    #[test]
    fn unknown_column_lists_header() {
        let header = header(&["from", "to"]);
        let error = resolve_column(&header, "weight").expect_err("unknown");
        assert!(error.to_string().contains("from, to"), "got: {error}");
    }

    #[test]
    fn out_of_range_index_rejected() {
        let header = header(&["from", "to"]);
        assert!(resolve_column(&header, "2").is_err());
    }

    #[test]
    fn same_column_rejected() {
        let header = header(&["from", "to"]);
        let args = ColumnArgs {
            source: "from".to_owned(),
            target: "0".to_owned(),
        };
        assert!(args.resolve(&header).is_err());
    }

    #[test]
    fn orientation_auto_prefers_directed() {
        let args = OrientationArgs {
            directed: false,
            undirected: false,
        };
        let both = Feasibility {
            directed: true,
            undirected: true,
        };
        assert!(choose_orientation(&args, both).expect("feasible"));
    }

    #[test]
    fn orientation_explicit_undirected_checked() {
        let args = OrientationArgs {
            directed: false,
            undirected: true,
        };
        let directed_only = Feasibility {
            directed: true,
            undirected: false,
        };
        assert!(choose_orientation(&args, directed_only).is_err());
    }

    #[test]
    fn orientation_infeasible_both_ways() {
        let args = OrientationArgs {
            directed: false,
            undirected: false,
        };
        let neither = Feasibility {
            directed: false,
            undirected: false,
        };
        assert!(choose_orientation(&args, neither).is_err());
    }

    #[test]
    fn url_detection() {
        assert!(is_url("http://example.test/edges.csv"));
        assert!(is_url("https://example.test/edges.csv"));
        assert!(!is_url("edges.csv"));
        assert!(!is_url("./http/edges.csv"));
    }

    #[tokio::test]
    async fn load_sample_end_to_end() {
        let args = InputArgs {
            input: None,
            sample: Some("triangle".to_owned()),
            delimiter: ',',
            max_records: None,
        };
        let loaded = load(&args).await.expect("sample loads");
        assert_eq!(loaded.name, "triangle");
        assert_eq!(loaded.row_count, 3);
        assert_eq!(loaded.header, ["source", "target"]);
    }

    #[tokio::test]
    async fn load_unknown_sample_names_alternatives() {
        let args = InputArgs {
            input: None,
            sample: Some("nope".to_owned()),
            delimiter: ',',
            max_records: None,
        };
        let error = load(&args).await.expect_err("unknown sample");
        assert!(error.to_string().contains("triangle"), "got: {error}");
    }

    #[tokio::test]
    async fn load_without_input_fails() {
        let args = InputArgs {
            input: None,
            sample: None,
            delimiter: ',',
            max_records: None,
        };
        assert!(load(&args).await.is_err());
    }
}
