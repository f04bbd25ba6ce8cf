#![forbid(unsafe_code)]
//! skein-session library.
//!
//! Asynchronous ingestion for skein: a FIFO [`queue::SourceQueue`] of
//! independently resolving sources (files, URLs, buffers, deferred
//! producers) and the [`session::Session`] facade that presentation layers
//! drive — parse, preview, classify, import, analyze.
//!
//! # Conventions
//!
//! - **Errors**: per-source resolution failures are [`source::ResolveError`]
//!   values parked in the source's slot; protocol misuse (stale or
//!   out-of-range indices) panics.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).
//! - **Runtime**: enqueueing anything that resolves asynchronously spawns a
//!   detached tokio task; callers must be inside a runtime.

pub mod queue;
pub mod session;
pub mod source;

// Re-export primary types at crate level for convenience.
pub use queue::SourceQueue;
pub use session::{ParseReport, Session};
pub use source::{QueuedSource, Resolution, ResolveError};
