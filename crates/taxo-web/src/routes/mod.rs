//! Route handlers.

pub mod activities;
pub mod admin;
pub mod objectives;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use taxo_core::Envelope;

/// Envelope as a response: 200 on success, 400 on failure.
pub(crate) fn respond<T: Serialize>(envelope: Envelope<T>) -> (StatusCode, Json<Envelope<T>>) {
    let status = if envelope.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(envelope))
}
