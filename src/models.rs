use serde::Serialize;

use crate::config::Config;
use crate::llm::LLM;
use crate::types::GenerationResult;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LLM,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let llm = LLM::google(&config.gemini);
        Self { config, llm }
    }

    /// State with a caller-provided generation backend
    pub fn with_llm(config: Config, llm: LLM) -> Self {
        Self { config, llm }
    }
}

// API response types

/// `POST /chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub document_name: String,
    pub prompt: String,
}

/// `POST /generate_response`, `/optimize_response`, `/Validate_key`
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub response: GenerationResult,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub free_tier: bool,
}
