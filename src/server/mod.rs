pub mod handlers;
pub mod pages;
pub mod upload;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::config::settings::ParleyConfig;
use crate::error::ParleyError;

/// Shared state for request handlers
pub struct AppState {
    pub config: ParleyConfig,
}

/// Build the service router: the HTML page at `/` and the JSON API at `/api`
pub fn router(config: ParleyConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route(
            "/",
            get(handlers::index_page).post(handlers::index_upload),
        )
        .route("/api", get(handlers::api_usage).post(handlers::api_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map pipeline errors onto response codes: bad requests get 400, backend
/// failures 502, everything else 500. Transcription and LLM failures fail
/// the request outright; nothing continues on a missing transcript.
pub(crate) fn error_status(error: &ParleyError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        match error {
            ParleyError::Transcription(_)
            | ParleyError::Llm(_)
            | ParleyError::Api(_)
            | ParleyError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ParleyError {
    fn into_response(self) -> Response {
        let status = error_status(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
