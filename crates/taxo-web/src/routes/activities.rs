//! Activity route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use taxo_core::{Activity, Envelope};
use taxo_graph::{resolver, GraphStore, ObjectiveMatch};

use super::respond;
use crate::state::AppState;

pub async fn list_activities<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<Envelope<Vec<Activity>>>) {
    respond(resolver::list_activities(state.store.as_ref()).await)
}

pub async fn get_activity<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Envelope<Option<Activity>>>) {
    respond(resolver::get_activity_by_id(state.store.as_ref(), &id).await)
}

pub async fn get_main_objectives<S: GraphStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Envelope<Vec<ObjectiveMatch>>>) {
    respond(resolver::get_activity_main_objectives_by_id(state.store.as_ref(), &id).await)
}
