//! FIFO ingestion queue over resolving sources.
//!
//! # Overview
//!
//! Sources are appended in call order and addressed by position, so index
//! assignment is FIFO even though settlement is not: a fast network fetch
//! enqueued second can settle before a slow file read enqueued first.
//! Removal shifts later indices down by one, exactly like `Vec::remove`.
//!
//! All mutation goes through `&mut self`; the only state a resolution task
//! shares with the queue is its own settlement cell.

#![allow(clippy::module_name_repetitions)]

use std::path::PathBuf;

use bytes::Bytes;
use tracing::debug;

use crate::source::{HTTP_TIMEOUT, QueuedSource, Resolution, ResolveError};

/// Ordered collection of ingestion sources.
#[derive(Debug, Default)]
pub struct SourceQueue {
    items: Vec<QueuedSource>,
    client: Option<reqwest::Client>,
}

impl SourceQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued sources, settled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an already-resolved buffer. Returns the assigned index.
    pub fn enqueue_bytes(&mut self, name: impl Into<String>, bytes: Bytes) -> usize {
        self.push(QueuedSource::from_bytes(name, bytes))
    }

    /// Append a source resolved by reading a file. Returns the assigned
    /// index; read faults settle later in the source's slot.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime; spawns the resolution task.
    pub fn enqueue_file(&mut self, path: impl Into<PathBuf>, name: Option<String>) -> usize {
        self.push(QueuedSource::from_path(path, name))
    }

    /// Append a source resolved by fetching a URL. The URL is validated
    /// eagerly: on a malformed URL nothing is enqueued. All later faults
    /// (connect errors, non-success statuses) settle in the source's slot.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidUrl`] when `url` does not parse;
    /// [`ResolveError::Network`] when the HTTP client cannot be built.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime; spawns the resolution task.
    pub fn enqueue_url(&mut self, url: &str, name: Option<String>) -> Result<usize, ResolveError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|error| ResolveError::InvalidUrl(error.to_string()))?;
        let client = self.http_client()?;
        let name = name.unwrap_or_else(|| url.to_owned());
        Ok(self.push(QueuedSource::from_url(parsed, name, client)))
    }

    /// Append a source resolved by an arbitrary deferred producer. Returns
    /// the assigned index.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime; spawns the resolution task.
    pub fn enqueue_deferred<F>(&mut self, name: impl Into<String>, producer: F) -> usize
    where
        F: Future<Output = Result<Bytes, ResolveError>> + Send + 'static,
    {
        self.push(QueuedSource::from_future(name, producer))
    }

    /// Remove the source at `index`, shifting later indices down by one.
    /// An unsettled resolution task is not cancelled; its result is
    /// discarded when it eventually completes.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn remove(&mut self, index: usize) {
        assert!(
            index < self.items.len(),
            "queue index {index} out of range ({} queued)",
            self.items.len()
        );
        let removed = self.items.remove(index);
        debug!(name = %removed.name(), "source removed from queue");
    }

    /// Display name of the source at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn name(&self, index: usize) -> &str {
        self.item(index).name()
    }

    /// Byte size of the source at `index` once `Ready`, `None` while
    /// `Pending` or after a failure. Never blocks.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn size(&self, index: usize) -> Option<usize> {
        match self.item(index).resolution() {
            Resolution::Ready(bytes) => Some(bytes.len()),
            Resolution::Pending | Resolution::Failed(_) => None,
        }
    }

    /// Resolution failure of the source at `index`, `None` while `Pending`
    /// or once `Ready`. Never blocks.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn error(&self, index: usize) -> Option<ResolveError> {
        match self.item(index).resolution() {
            Resolution::Failed(error) => Some(error),
            Resolution::Pending | Resolution::Ready(_) => None,
        }
    }

    /// Current settlement state of the source at `index`. Never blocks.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn resolution(&self, index: usize) -> Resolution {
        self.item(index).resolution()
    }

    /// Await settlement of the source at `index` and yield its bytes.
    ///
    /// # Errors
    ///
    /// Returns the source's [`ResolveError`] when resolution failed.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub async fn content(&self, index: usize) -> Result<Bytes, ResolveError> {
        self.item(index).content().await
    }

    fn push(&mut self, source: QueuedSource) -> usize {
        self.items.push(source);
        let index = self.items.len() - 1;
        debug!(index, name = %self.items[index].name(), "source enqueued");
        index
    }

    fn item(&self, index: usize) -> &QueuedSource {
        assert!(
            index < self.items.len(),
            "queue index {index} out of range ({} queued)",
            self.items.len()
        );
        &self.items[index]
    }

    fn http_client(&mut self) -> Result<reqwest::Client, ResolveError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|error| ResolveError::Network(error.to_string()))?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
