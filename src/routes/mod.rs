//! API Routes
//!
//! - `/chat` - document upload and meta-prompt assembly
//! - `/generate_response`, `/optimize_response`, `/Validate_key` - model calls
//! - `/`, `/api/models` - API description and model catalog
//! - `/api/health` - health check

pub mod chat;
pub mod form;
pub mod generate;
pub mod health;
pub mod home;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.server.max_upload_bytes;
    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(chat::router(state.clone()))
        .merge(generate::router(state))
        .merge(home::router())
        .merge(health::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}
