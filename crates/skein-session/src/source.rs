//! Single-assignment settlement for ingestion sources.
//!
//! # Overview
//!
//! Every queued source owns a watch channel holding its [`Resolution`]. A
//! detached task resolves the source's bytes and writes the final state
//! exactly once; the queue side only ever reads. This gives both access
//! styles the design needs:
//!
//! - non-blocking polls (`resolution()`) for progress displays, and
//! - an awaitable settlement (`content()`) for the parse path.
//!
//! Removing a source from the queue just drops the receiver. The in-flight
//! task keeps running and its final send is discarded; resolution work is
//! never cancelled, only orphaned.

#![allow(clippy::module_name_repetitions)]

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::debug;

/// Timeout applied to every outbound fetch.
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// ResolveError
// ---------------------------------------------------------------------------

/// Why a source failed to resolve.
///
/// Resolution failures are per-source and recoverable: they park in the
/// source's slot and are reported on demand, they never abort the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The source resolved to zero bytes.
    #[error("empty file or directory")]
    Empty,
    /// Reading from the filesystem failed; carries the underlying reason.
    #[error("{0}")]
    Read(String),
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),
    /// The fetch itself failed (DNS, connect, timeout, ...).
    #[error("{0}")]
    Network(String),
    /// The URL did not parse; rejected before anything is enqueued.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The resolution task died without settling. Not expected in practice.
    #[error("content resolution task failed")]
    TaskFailed,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Settlement state of one source. Written exactly once after `Pending`.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Still resolving.
    Pending,
    /// Resolved; the bytes are cheap to clone out of the cell.
    Ready(Bytes),
    /// Settled with a failure.
    Failed(ResolveError),
}

impl Resolution {
    /// Whether the source is still unsettled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

// ---------------------------------------------------------------------------
// QueuedSource
// ---------------------------------------------------------------------------

/// One ingestion source: a display name plus its settlement cell.
#[derive(Debug, Clone)]
pub struct QueuedSource {
    name: String,
    state: watch::Receiver<Resolution>,
}

impl QueuedSource {
    /// An already-resolved buffer. Settles immediately; zero bytes settle
    /// as [`ResolveError::Empty`].
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: Bytes) -> Self {
        let resolution = if bytes.is_empty() {
            Resolution::Failed(ResolveError::Empty)
        } else {
            Resolution::Ready(bytes)
        };
        let (_sender, state) = watch::channel(resolution);
        Self {
            name: name.into(),
            state,
        }
    }

    /// Resolve by reading `path`. The default name is the file-name
    /// component of the path.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime; spawns the resolution task.
    pub fn from_path(path: impl Into<PathBuf>, name: Option<String>) -> Self {
        let path = path.into();
        let name = name.unwrap_or_else(|| default_file_name(&path));
        Self::spawn(name, async move {
            match tokio::fs::read(&path).await {
                Ok(data) if data.is_empty() => Err(ResolveError::Empty),
                Ok(data) => Ok(Bytes::from(data)),
                Err(error) => Err(ResolveError::Read(error.to_string())),
            }
        })
    }

    /// Resolve by fetching `url` with `client`. A non-success status
    /// settles as [`ResolveError::Status`]; transport faults settle as
    /// [`ResolveError::Network`].
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime; spawns the resolution task.
    pub fn from_url(url: reqwest::Url, name: String, client: reqwest::Client) -> Self {
        Self::spawn(name, async move {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|error| ResolveError::Network(error.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(ResolveError::Status(status.as_u16()));
            }
            response
                .bytes()
                .await
                .map_err(|error| ResolveError::Network(error.to_string()))
        })
    }

    /// Resolve with an arbitrary deferred producer. This is how
    /// collaborators hand over "a promise of bytes" without the queue
    /// knowing the transport.
    ///
    /// # Panics
    ///
    /// Must be called within a tokio runtime; spawns the resolution task.
    pub fn from_future<F>(name: impl Into<String>, producer: F) -> Self
    where
        F: Future<Output = Result<Bytes, ResolveError>> + Send + 'static,
    {
        Self::spawn(name.into(), producer)
    }

    fn spawn<F>(name: String, producer: F) -> Self
    where
        F: Future<Output = Result<Bytes, ResolveError>> + Send + 'static,
    {
        let (sender, state) = watch::channel(Resolution::Pending);
        tokio::spawn(async move {
            let resolution = match producer.await {
                Ok(bytes) => Resolution::Ready(bytes),
                Err(error) => Resolution::Failed(error),
            };
            // The receiver is gone when the source was removed mid-flight;
            // the settled value is simply discarded then.
            let _ = sender.send(resolution);
        });
        debug!(name = %name, "source resolution started");
        Self { name, state }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current settlement state, without blocking.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.state.borrow().clone()
    }

    /// Await settlement and yield the bytes or the failure.
    ///
    /// # Errors
    ///
    /// Returns the source's [`ResolveError`] when resolution settled with a
    /// failure (or the task died without settling).
    pub async fn content(&self) -> Result<Bytes, ResolveError> {
        // Clone the receiver so waiting needs no `&mut self`.
        let mut state = self.state.clone();
        let resolution = match state.wait_for(|current| !current.is_pending()).await {
            Ok(settled) => (*settled).clone(),
            Err(_closed) => return Err(ResolveError::TaskFailed),
        };
        match resolution {
            Resolution::Ready(bytes) => Ok(bytes),
            Resolution::Failed(error) => Err(error),
            Resolution::Pending => Err(ResolveError::TaskFailed),
        }
    }
}

fn default_file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
