//! Generation endpoints
//!
//! - POST /generate_response - answer `prompt_result` in question mode
//! - POST /optimize_response - rewrite `response_result` with the editor persona
//! - POST /Validate_key      - probe the key/model pair
//!
//! Model failures are not HTTP errors here: they come back inside `response` as
//! `{"error", "kind"}` so the front-end can show them next to the result.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::llm::GenerationMode;
use crate::models::{AppState, GenerationResponse};
use crate::routes::form::FormFields;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate_response", post(generate_response))
        .route("/optimize_response", post(optimize_response))
        .route("/Validate_key", post(validate_key))
        .with_state(state)
}

async fn generate_response(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<GenerationResponse>> {
    let form = FormFields::from_multipart(multipart).await?;
    run(&state, &form, "prompt_result", GenerationMode::Question).await
}

async fn optimize_response(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<GenerationResponse>> {
    let form = FormFields::from_multipart(multipart).await?;
    run(&state, &form, "response_result", GenerationMode::Optimize).await
}

async fn run(
    state: &AppState,
    form: &FormFields,
    content_field: &str,
    mode: GenerationMode,
) -> AppResult<Json<GenerationResponse>> {
    form.api_key()?;
    let content = form.require_non_blank(content_field, || AppError::MissingPrompt)?;
    let request = form.generation_request(content)?;

    info!(mode = %mode, model = %request.model, "Generation request received");

    let response = state.llm.generate(mode, request).await;
    Ok(Json(GenerationResponse { response }))
}

async fn validate_key(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<GenerationResponse>> {
    let form = FormFields::from_multipart(multipart).await?;
    let api_key = form.api_key()?;
    let model = form.model()?;

    info!(model = %model, "Validating API key");

    let response = state.llm.validate_key(model, api_key).await;
    Ok(Json(GenerationResponse { response }))
}
