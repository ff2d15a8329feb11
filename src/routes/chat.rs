use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::llm::GenerationMode;
use crate::models::{AppState, ChatResponse};
use crate::prompts::{self, PromptParts};
use crate::routes::form::FormFields;
use crate::types::{AppError, AppResult, GenerationResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(upload_and_assemble))
        .with_state(state)
}

/// POST /chat - extract an uploaded document and build the meta-prompt around it.
///
/// The meta-prompt is returned as `prompt`. With `generate=true` it is sent to the model
/// first and `prompt` holds the drafted task prompt instead.
pub async fn upload_and_assemble(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ChatResponse>> {
    let mut form = FormFields::from_multipart(multipart).await?;

    let document = form
        .take_file()
        .ok_or_else(|| AppError::missing_field("file"))?;
    if !document.has_supported_extension() {
        return Err(AppError::UnsupportedFileType);
    }

    form.api_key()?;
    let system_prompt = form.require("system_prompt")?.to_string();
    let instructions = form.require("istructions")?.to_string();
    let example_output = form.require("example_output")?.to_string();
    form.model()?;
    form.generation_config()?;

    info!(
        filename = %document.filename,
        size = document.bytes.len(),
        "Chat upload received"
    );

    let filename = document.filename.clone();
    let document_text = tokio::task::spawn_blocking(move || document.extract()).await??;

    let prompt = prompts::assemble(&PromptParts {
        system_prompt,
        instructions,
        example_output,
        document_text,
    });

    let prompt = if form.flag("generate") {
        let request = form.generation_request(&prompt)?;
        match state.llm.generate(GenerationMode::Prompt, request).await {
            GenerationResult::Success(text) => text,
            GenerationResult::Failure { kind, message } => {
                return Err(AppError::Generation { kind, message })
            }
        }
    } else {
        prompt
    };

    info!(filename = %filename, prompt_len = prompt.len(), "Prompt ready");

    Ok(Json(ChatResponse {
        success: true,
        document_name: filename,
        prompt,
    }))
}
