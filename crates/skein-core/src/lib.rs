#![forbid(unsafe_code)]
//! skein-core library.
//!
//! Synchronous primitives for turning delimiter-separated edge lists into
//! analyzable graphs: DSV validation ([`table`]), orientation feasibility
//! ([`graph::classify`]), graph materialization ([`graph::build`]), degree
//! analysis ([`graph::degree`]), and the session-scoped graph collection
//! ([`store`]).
//!
//! # Conventions
//!
//! - **Errors**: recoverable input problems are typed enums
//!   ([`table::ParseError`]); caller contract violations (stale indices,
//!   out-of-range columns, mismatched degree kinds) panic with a
//!   descriptive message.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).

pub mod graph;
pub mod store;
pub mod table;

// Re-export primary types at crate level for convenience.
pub use graph::{
    DegreeKind, EdgeAttrs, Feasibility, ImportedGraph, classify, degree_distribution, node_degrees,
};
pub use store::{GraphStore, GraphSummary};
pub use table::{ParseError, Table, TableParser};
