//! Status and populate endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use taxo_core::Envelope;
use taxo_graph::schema::initialize_schema;
use taxo_graph::{ingest_from_source, resolver, FeedSource, GraphCounts, GraphStore};

use super::respond;
use crate::state::{AppState, PopulateStatus};

#[derive(Serialize)]
pub struct StatusResponse {
    pub counts: GraphCounts,
    pub populate: PopulateStatus,
}

pub async fn status<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<Envelope<StatusResponse>>) {
    let counted = resolver::get_graph_counts(state.store.as_ref()).await;
    let populate = state.populate.read().await.clone();

    let envelope = match counted.data {
        Some(counts) => Envelope::ok(StatusResponse { counts, populate }),
        None => Envelope::failure(counted.errors),
    };
    respond(envelope)
}

/// Start ingesting the configured feed in the background.
pub async fn populate<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<Value>) {
    {
        let mut current = state.populate.write().await;
        if current.is_running() {
            warn!("Populate requested while a run is in progress");
            return (StatusCode::CONFLICT, Json(json!({"message": "already running"})));
        }
        *current = PopulateStatus::Running { since: Utc::now() };
    }

    info!(source = %state.source, "Populate started");
    let run = tokio::spawn(run_populate(state.store.clone(), state.source.clone()));
    let status = state.populate.clone();

    // A panicking run must not leave the status stuck at Running.
    tokio::spawn(async move {
        let next = match run.await {
            Ok(next) => next,
            Err(e) => {
                error!(error = %e, "Populate task aborted");
                PopulateStatus::Failed { error: format!("Populate task aborted: {}", e) }
            }
        };
        *status.write().await = next;
    });

    (StatusCode::OK, Json(json!({"message": "started"})))
}

async fn run_populate<S: GraphStore + 'static>(store: Arc<S>, source: FeedSource) -> PopulateStatus {
    let result = match initialize_schema(store.as_ref()).await {
        Ok(()) => ingest_from_source(store.as_ref(), &source).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            info!(run_id = %report.run_id, failures = report.failures.len(), "Populate finished");
            PopulateStatus::Finished { report }
        }
        Err(e) => {
            error!(error = %e, "Populate failed");
            PopulateStatus::Failed { error: e.to_string() }
        }
    }
}
