use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::GeminiConfig;
use crate::prompts;
use crate::types::{AppError, AppResult, ErrorKind, GenerationRequest, GenerationResult};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    /// Issue one non-streaming generation call and return the model text verbatim.
    async fn generate_content(&self, request: &GenerationRequest) -> AppResult<String>;
}

/// How caller content is wrapped before it reaches the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Content is an already assembled meta-prompt and is sent as is
    Prompt,
    /// Direct Q&A
    Question,
    /// Conservative rewrite by the editor persona
    Optimize,
    /// Fixed one-word call that only checks the key/model pair
    Probe,
}

impl GenerationMode {
    pub fn wrap(&self, content: &str) -> String {
        match self {
            GenerationMode::Prompt => content.to_string(),
            GenerationMode::Question => prompts::question_prompt(content),
            GenerationMode::Optimize => prompts::optimize_prompt(content),
            GenerationMode::Probe => prompts::KEY_PROBE.to_string(),
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Prompt => write!(f, "prompt"),
            GenerationMode::Question => write!(f, "question"),
            GenerationMode::Optimize => write!(f, "optimize"),
            GenerationMode::Probe => write!(f, "probe"),
        }
    }
}

/// Map a provider error message onto the failure kinds clients act on.
pub fn classify_failure(message: &str) -> GenerationResult {
    let lowered = message.to_lowercase();

    if lowered.contains("api key not valid")
        || lowered.contains("invalid_argument")
        || lowered.contains("api_key_invalid")
    {
        return GenerationResult::failure(ErrorKind::InvalidApiKey, "Invalid API Key");
    }

    if lowered.contains("resource_exhausted") && lowered.contains("free_tier") {
        return GenerationResult::failure(
            ErrorKind::QuotaExceeded,
            "This API key is not valid for paid or pro models.",
        );
    }

    GenerationResult::failure(ErrorKind::Unknown, message)
}

/// Generation entry point shared by the handlers
#[derive(Clone)]
pub struct LLM {
    adapter: Arc<dyn LLMAdapter>,
}

impl LLM {
    pub fn new(adapter: Arc<dyn LLMAdapter>) -> Self {
        Self { adapter }
    }

    pub fn google(config: &GeminiConfig) -> Self {
        Self::new(Arc::new(crate::llm::google::GoogleAdapter::with_base_url(
            &config.api_base,
        )))
    }

    /// Wrap `request.prompt` for `mode`, call the model once and normalize the outcome.
    pub async fn generate(&self, mode: GenerationMode, mut request: GenerationRequest) -> GenerationResult {
        request.prompt = mode.wrap(&request.prompt);
        if mode == GenerationMode::Probe {
            request.config = None;
        }

        info!(
            mode = %mode,
            model = %request.model,
            prompt_len = request.prompt.len(),
            "Calling generative model"
        );

        match self.adapter.generate_content(&request).await {
            Ok(text) => {
                info!(mode = %mode, response_len = text.len(), "Generation succeeded");
                GenerationResult::Success(text)
            }
            Err(error) => {
                let message = match error {
                    AppError::LLMApi(message) => message,
                    other => other.to_string(),
                };
                let result = classify_failure(&message);
                if let GenerationResult::Failure { kind, .. } = &result {
                    warn!(mode = %mode, kind = ?kind, "Generation failed: {}", message);
                }
                result
            }
        }
    }

    /// Confirm the key/model pair is authorized.
    pub async fn validate_key(&self, model: &str, api_key: &str) -> GenerationResult {
        let request = GenerationRequest {
            model: model.to_string(),
            api_key: api_key.to_string(),
            prompt: String::new(),
            config: None,
        };
        self.generate(GenerationMode::Probe, request).await
    }
}
