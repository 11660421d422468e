//! HTTP endpoint handlers.
//!
//! Handlers only extract the request, hand it to the dispatcher and render
//! whatever result comes back.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::dispatch::Dispatcher;
use crate::provider::{build_http_client, Mailgun, Mandrill};
use crate::request::SendRequest;
use crate::result::SendResult;
use crate::web::page;
use crate::Config;

/// Dispatcher wired with the production providers.
pub type RelayDispatcher = Dispatcher<Mandrill, Mailgun>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RelayDispatcher>,
}

impl AppState {
    /// Build both providers on one HTTP client and wire them into a dispatcher.
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(config)?;
        let dispatcher = Dispatcher::new(
            Mandrill::new(client.clone(), config),
            Mailgun::new(client, config),
        );

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
        })
    }
}

fn status_code(result: &SendResult) -> StatusCode {
    StatusCode::from_u16(result.code()).unwrap_or(StatusCode::BAD_REQUEST)
}

/// Render the form page with the given status, or a 500 if rendering fails.
fn page_response(status: StatusCode, message: Option<&str>) -> (StatusCode, Html<String>) {
    match page::render(message) {
        Ok(html) => (status, Html(html)),
        Err(e) => {
            error!(error = %e, "page_render_failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(String::new()))
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Send form
// =============================================================================

/// Form page.
pub async fn index() -> (StatusCode, Html<String>) {
    page_response(StatusCode::OK, None)
}

/// Form submission: send and show the result message on the same page.
pub async fn send_form(
    State(state): State<AppState>,
    Form(req): Form<SendRequest>,
) -> (StatusCode, Html<String>) {
    info!(to = %req.to_email, channel = "form", "send_request_received");

    let result = state.dispatcher.send_email(&req).await;

    info!(status = %result.status(), code = result.code(), "send_request_complete");

    page_response(status_code(&result), Some(result.message()))
}

// =============================================================================
// JSON API
// =============================================================================

/// JSON send endpoint.
pub async fn send_json(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> (StatusCode, Json<SendResult>) {
    info!(to = %req.to_email, channel = "api", "send_request_received");

    let result = state.dispatcher.send_email(&req).await;

    info!(status = %result.status(), code = result.code(), "send_request_complete");

    (status_code(&result), Json(result))
}
