//! # Taxo Graph
//!
//! Neo4j-backed taxonomy graph.
//!
//! Loads the taxonomy feed into a property graph with idempotent merges,
//! builds the conditionally-annotated relationships between activities,
//! objectives and criteria, and answers the main-objective traversal queries.

pub mod client;
pub mod error;
pub mod ingest;
pub mod queries;
pub mod relationships;
pub mod repository;
pub mod resolver;
pub mod schema;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod testutil;

pub use client::{GraphClient, GraphConfig};
pub use error::{GraphError, GraphResult};
pub use ingest::{
    ingest_from_source, run_ingestion, FeedSource, IngestPhase, IngestReport, IntegrityFailure,
    DEFAULT_FEED_URL,
};
pub use queries::objectives::{
    ActivitySelector, DetailedObjectiveMatch, DnshLink, ObjectiveMatch, PRIMARY_OBJECTIVE_KEYS,
};
pub use queries::stats::GraphCounts;
pub use relationships::{ContributionShape, EdgeKind, EdgeRef, RecordOutcome};
pub use store::{GraphStore, ParamValue, Record, Statement, UnitOfWork, within};
