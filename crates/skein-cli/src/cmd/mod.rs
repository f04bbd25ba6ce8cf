//! Command handlers for the `sk` binary. Each submodule owns one
//! subcommand's arguments, report payload, and rendering; `ingest` holds the
//! input/column/orientation plumbing they share.

pub mod classify;
pub mod completions;
pub mod degrees;
pub mod import;
pub mod ingest;
pub mod inspect;
pub mod samples;
