//! Informational endpoints: `GET /` and `GET /api/models`

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::extraction::SUPPORTED_EXTENSIONS;
use crate::llm::google::models;
use crate::models::ModelInfo;

pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/models", get(list_models))
}

/// GET / - API description
async fn home() -> Json<Value> {
    let model_fields = json!({
        "models": "Gemini model id, see GET /api/models",
        "api_key": "Caller's Gemini API key (not stored)",
        "max_tokens": "Maximum output tokens, integer > 0",
        "ai_temperature": "Sampling temperature, 0.0 - 2.0"
    });

    Json(json!({
        "message": "Simple Document Chat API",
        "description": "Upload a document and turn it into a reusable task prompt",
        "endpoint": {
            "POST /chat": {
                "description": "Upload a document and build the prompt-generation request for it",
                "parameters": {
                    "file": "Document file (PDF, TXT, or DOCX)",
                    "system_prompt": "Role and expertise of the target model",
                    "istructions": "Strict instructions the prompt must carry",
                    "example_output": "Example of the expected output format",
                    "generate": "Optional; 'true' sends the request to the model and returns its draft",
                    "model_fields": model_fields.clone()
                }
            },
            "POST /generate_response": {
                "description": "Run a prompt as a question",
                "parameters": { "prompt_result": "Prompt text", "model_fields": model_fields.clone() }
            },
            "POST /optimize_response": {
                "description": "Polish a prompt without adding or dropping content",
                "parameters": { "response_result": "Prompt text", "model_fields": model_fields.clone() }
            },
            "POST /Validate_key": {
                "description": "Check that an API key may use a model",
                "parameters": { "models": "Gemini model id", "api_key": "Gemini API key" }
            }
        },
        "supported_formats": supported_formats()
    }))
}

/// `[".pdf", ..]` as the upper-case names shown to users
fn supported_formats() -> Vec<String> {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_uppercase())
        .collect()
}

/// GET /api/models - models the front-end offers
async fn list_models() -> Json<Vec<ModelInfo>> {
    let catalog = [
        (models::GEMINI_1_5_FLASH, "Gemini 1.5 Flash", "Fast and efficient for quick analysis", true),
        (models::GEMINI_1_5_PRO, "Gemini 1.5 Pro", "Advanced reasoning for complex documents", false),
        (models::GEMINI_2_0_FLASH, "Gemini 2.0 Flash", "Next-generation speed with enhanced capabilities", true),
        (models::GEMINI_2_5_FLASH_PREVIEW, "Gemini 2.5 Flash Preview 05-20", "Ultra-fast processing with cutting-edge AI", true),
        (models::GEMINI_2_5_PRO_PREVIEW, "Gemini 2.5 Pro Preview 05-06", "Most advanced model for complex reasoning", false),
    ];

    Json(
        catalog
            .iter()
            .map(|(id, name, description, free_tier)| ModelInfo {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                free_tier: *free_tier,
            })
            .collect(),
    )
}
