//! Error types for graph operations.

use thiserror::Error;

use crate::ingest::IngestPhase;

/// Main error type for graph store, repository and ingestion operations.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    #[error("Failed to decode field '{field}': {message}")]
    Decode { field: String, message: String },

    #[error(transparent)]
    Core(#[from] taxo_core::TaxoError),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Ingestion failed during {phase}: {source}")]
    Ingest {
        phase: IngestPhase,
        #[source]
        source: Box<GraphError>,
    },

    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    pub fn decode(field: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            field: field.into(),
            message: message.to_string(),
        }
    }

    pub fn feed(msg: impl Into<String>) -> Self {
        Self::Feed(msg.into())
    }

    /// Tag an error with the ingestion phase it occurred in.
    pub fn during(self, phase: IngestPhase) -> Self {
        match self {
            already @ Self::Ingest { .. } => already,
            other => Self::Ingest {
                phase,
                source: Box::new(other),
            },
        }
    }
}

impl From<reqwest::Error> for GraphError {
    fn from(e: reqwest::Error) -> Self {
        Self::Feed(e.to_string())
    }
}

impl From<std::io::Error> for GraphError {
    fn from(e: std::io::Error) -> Self {
        Self::Feed(e.to_string())
    }
}
