//! Web front end for the relay.
//!
//! This module provides a small web server that:
//! - Serves the send form and handles its submission
//! - Exposes a JSON send endpoint
//! - Answers health checks
//!
//! All delivery decisions happen in the dispatcher.

pub mod handlers;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, index, send_form, send_json, AppState, HealthResponse};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(send_form))
        .route("/api/send", post(send_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
