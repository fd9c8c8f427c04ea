//! Read-only graph queries.
//!
//! Traversals answering the main-objective questions, and node/edge counts.

pub mod objectives;
pub mod stats;
