//! Main-objective route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use taxo_core::Envelope;
use taxo_graph::{resolver, ActivitySelector, DetailedObjectiveMatch, GraphStore, ObjectiveMatch};

use super::respond;
use crate::state::AppState;

pub async fn by_activity_name<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> (StatusCode, Json<Envelope<Vec<ObjectiveMatch>>>) {
    let selector = ActivitySelector::Name(name);
    respond(resolver::get_activity_main_objectives(state.store.as_ref(), &selector).await)
}

pub async fn all<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<Envelope<Vec<DetailedObjectiveMatch>>>) {
    respond(resolver::get_all_activities_main_objectives(state.store.as_ref()).await)
}
