//! Taxo Web Server
//!
//! Axum-based JSON API over the taxonomy graph query layer.

pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use taxo_graph::{FeedSource, GraphClient, GraphStore};

use state::AppState;

/// Create the application router.
pub fn create_router<S: GraphStore + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Activities
        .route("/activities", get(routes::activities::list_activities::<S>))
        .route("/activities/{id}", get(routes::activities::get_activity::<S>))
        .route(
            "/activities/{id}/main-objectives",
            get(routes::activities::get_main_objectives::<S>),
        )
        // Main objectives
        .route("/main-objectives", get(routes::objectives::all::<S>))
        .route(
            "/main-objectives/by-name/{name}",
            get(routes::objectives::by_activity_name::<S>),
        )
        // Admin
        .route("/status", get(routes::admin::status::<S>))
        .route("/populate", post(routes::admin::populate::<S>));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(
    client: GraphClient,
    source: FeedSource,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(client), source);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
