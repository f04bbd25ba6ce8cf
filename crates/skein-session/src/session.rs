//! Session facade: one queue, one parse slot, one graph store.
//!
//! # Overview
//!
//! A [`Session`] is the single mutation point presentation layers talk to.
//! It owns the ingestion queue, the store of imported graphs, and a
//! single-slot parse cache keyed by queue index:
//!
//! ```text
//! enqueue_* → SourceQueue (async settlement per source)
//!     parse(i) → awaits content, runs TableParser, fills the slot
//!         slice / determine / import(i, ...) → read the slot (same i only)
//!             import → GraphStore.add → change callback
//!                 degree_distribution(g, kind) → fresh computation
//! ```
//!
//! ## Recency contract
//!
//! `slice`, `determine`, and `import` only operate on the most recently
//! parsed queue index, and only when that parse succeeded. Calling them for
//! any other index, or after a failed parse, is a caller bug and panics;
//! the flow is parse-inspect-import, in that order, one source at a time.
//!
//! ## Index hygiene
//!
//! Removing a source keeps the parse slot consistent: the slot is cleared
//! when the removed index is the cached one and shifted down by one when
//! the cached index lies past the removal point.

use std::collections::BTreeMap;
use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, instrument};

use skein_core::{
    DegreeKind, Feasibility, GraphStore, GraphSummary, ImportedGraph, ParseError, Table,
    TableParser, classify, degree_distribution,
};

use crate::queue::SourceQueue;
use crate::source::ResolveError;

// ---------------------------------------------------------------------------
// ParseReport
// ---------------------------------------------------------------------------

/// What a parse attempt looked like from the outside: exactly one of
/// `header` and `parse_error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Column names when the parse succeeded.
    pub header: Option<Vec<String>>,
    /// Human-readable failure when it did not.
    pub parse_error: Option<String>,
    /// Data rows available for preview and import; 0 on failure.
    pub row_count: usize,
}

impl ParseReport {
    fn from_outcome(outcome: &Result<Table, ParseError>) -> Self {
        match outcome {
            Ok(table) => Self {
                header: Some(table.header().to_vec()),
                parse_error: None,
                row_count: table.row_count(),
            },
            Err(error) => Self {
                header: None,
                parse_error: Some(error.to_string()),
                row_count: 0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's ingestion session. Nothing survives drop.
#[derive(Debug, Default)]
pub struct Session {
    parser: TableParser,
    queue: SourceQueue,
    store: GraphStore,
    /// Most recent parse attempt: queue index plus its outcome.
    parsed: Option<(usize, Result<Table, ParseError>)>,
}

impl Session {
    /// Session with the default parser configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a custom-configured parser (delimiter, record cap).
    #[must_use]
    pub fn with_parser(parser: TableParser) -> Self {
        Self {
            parser,
            ..Self::default()
        }
    }

    // --- queue surface ----------------------------------------------------

    /// Append an already-resolved buffer to the queue. Returns the index.
    pub fn enqueue_bytes(&mut self, name: impl Into<String>, bytes: Bytes) -> usize {
        self.queue.enqueue_bytes(name, bytes)
    }

    /// Append a file-backed source. Returns the index.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime.
    pub fn enqueue_file(&mut self, path: impl Into<PathBuf>, name: Option<String>) -> usize {
        self.queue.enqueue_file(path, name)
    }

    /// Append a URL-backed source. Returns the index.
    ///
    /// # Errors
    ///
    /// See [`SourceQueue::enqueue_url`]; on error nothing is enqueued.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime.
    pub fn enqueue_url(&mut self, url: &str, name: Option<String>) -> Result<usize, ResolveError> {
        self.queue.enqueue_url(url, name)
    }

    /// Append a source backed by a deferred producer. Returns the index.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime.
    pub fn enqueue_deferred<F>(&mut self, name: impl Into<String>, producer: F) -> usize
    where
        F: Future<Output = Result<Bytes, ResolveError>> + Send + 'static,
    {
        self.queue.enqueue_deferred(name, producer)
    }

    /// Remove the source at `index` and keep the parse slot consistent:
    /// cleared when it cached this index, shifted down when it cached a
    /// later one.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn remove_source(&mut self, index: usize) {
        self.queue.remove(index);
        self.parsed = match self.parsed.take() {
            Some((cached, _)) if cached == index => None,
            Some((cached, outcome)) if cached > index => Some((cached - 1, outcome)),
            other => other,
        };
    }

    /// Number of queued sources.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Display name of the source at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn source_name(&self, index: usize) -> &str {
        self.queue.name(index)
    }

    /// Byte size once resolved; `None` while pending or failed.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn source_size(&self, index: usize) -> Option<usize> {
        self.queue.size(index)
    }

    /// Resolution failure, if any. `None` while pending or once ready.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn source_error(&self, index: usize) -> Option<ResolveError> {
        self.queue.error(index)
    }

    // --- parse and inspect ------------------------------------------------

    /// Await the source at `index`, parse it, and cache the outcome as the
    /// session's current table. Re-parsing the index the slot already holds
    /// re-reports the cached outcome without touching the source; any
    /// previously cached outcome for another index is discarded.
    ///
    /// # Errors
    ///
    /// Returns the source's [`ResolveError`] when resolution failed; the
    /// parse slot then still holds whatever it held before.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[instrument(skip(self))]
    pub async fn parse(&mut self, index: usize) -> Result<ParseReport, ResolveError> {
        if let Some((cached, outcome)) = &self.parsed
            && *cached == index
        {
            debug!(index, "parse slot already current");
            return Ok(ParseReport::from_outcome(outcome));
        }
        let bytes = self.queue.content(index).await?;
        let outcome = self.parser.parse(&bytes);
        let report = ParseReport::from_outcome(&outcome);
        self.parsed = Some((index, outcome));
        debug!(index, ok = report.parse_error.is_none(), "source parsed");
        Ok(report)
    }

    /// Preview rows `start..end` of the table parsed from `index`. Bounds
    /// are clamped; see [`Table::slice`].
    ///
    /// # Panics
    ///
    /// Panics when `index` is not the most recent successful parse.
    #[must_use]
    pub fn slice(&self, index: usize, start: usize, end: usize) -> &[Vec<String>] {
        self.cached_table(index).slice(start, end)
    }

    /// Orientation feasibility of the table parsed from `index`, reading
    /// endpoints from the `source` and `target` columns.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not the most recent successful parse, or when
    /// a column index is out of range.
    #[must_use]
    pub fn determine(&self, index: usize, source: usize, target: usize) -> Feasibility {
        classify(self.cached_table(index), source, target)
    }

    /// Materialize the table parsed from `index` into a graph named after
    /// the source, append it to the store, and fire the change callback.
    /// Returns the stored graph's summary.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not the most recent successful parse, or when
    /// a column index is out of range.
    #[instrument(skip(self))]
    pub fn import(
        &mut self,
        index: usize,
        source: usize,
        target: usize,
        directed: bool,
    ) -> GraphSummary {
        let graph = {
            let table = self.cached_table(index);
            ImportedGraph::from_table(table, source, target, directed, self.queue.name(index))
        };
        let summary = GraphSummary::from(&graph);
        self.store.add(graph);
        summary
    }

    // --- graph surface ----------------------------------------------------

    /// Number of imported graphs.
    #[must_use]
    pub fn num_graphs(&self) -> usize {
        self.store.count()
    }

    /// Summary of the graph at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn graph_summary(&self, index: usize) -> GraphSummary {
        self.store.summary(index)
    }

    /// Summaries of all imported graphs, in import order.
    #[must_use]
    pub fn graph_summaries(&self) -> Vec<GraphSummary> {
        self.store.summaries()
    }

    /// Borrow the graph at `index`, e.g. for per-node listings.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn graph(&self, index: usize) -> &ImportedGraph {
        self.store.get(index)
    }

    /// Remove the graph at `index` (later indices shift down) and fire the
    /// change callback.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn remove_graph(&mut self, index: usize) {
        self.store.remove(index);
    }

    /// Degree distribution of the graph at `index`, computed fresh.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range or `kind` does not match the
    /// graph's orientation.
    #[must_use]
    pub fn degree_distribution(&self, index: usize, kind: DegreeKind) -> BTreeMap<usize, usize> {
        degree_distribution(self.store.get(index), kind)
    }

    /// Register the single change callback, replacing any previous one.
    /// Invoked synchronously after every import and graph removal.
    pub fn set_graph_changed_callback(&mut self, callback: impl FnMut() + Send + 'static) {
        self.store.set_on_change(callback);
    }

    fn cached_table(&self, index: usize) -> &Table {
        let Some((cached, outcome)) = &self.parsed else {
            panic!("no parsed table for queue index {index}; call parse first");
        };
        assert!(
            *cached == index,
            "no parsed table for queue index {index}; most recent parse was index {cached}"
        );
        match outcome {
            Ok(table) => table,
            Err(error) => panic!(
                "parse for queue index {index} failed ({error}); slice/determine/import require a successful parse"
            ),
        }
    }
}
