//! Application state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use taxo_graph::{FeedSource, IngestReport};

/// Progress of the most recent populate request.
#[derive(Clone, Serialize, Debug, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PopulateStatus {
    #[default]
    Idle,
    Running { since: DateTime<Utc> },
    Finished { report: IngestReport },
    Failed { error: String },
}

impl PopulateStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, PopulateStatus::Running { .. })
    }
}

/// Application state shared across handlers.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub source: FeedSource,
    pub populate: Arc<RwLock<PopulateStatus>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            source: self.source.clone(),
            populate: Arc::clone(&self.populate),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, source: FeedSource) -> Self {
        Self {
            store,
            source,
            populate: Arc::new(RwLock::new(PopulateStatus::Idle)),
        }
    }
}
