// Google Gemini adapter
// API Reference: https://ai.google.dev/api/generate-content
//
// One POST to models/{model}:generateContent per call. The caller's key travels in the
// x-goog-api-key header; the shared reqwest client only pools connections.

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, GenerationRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleAdapter {
    client: Client,
    base_url: String,
}

// Request types for the Gemini API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

// Response types for the Gemini API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<GeminiErrorDetail>,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

impl GoogleAdapter {
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_BASE)
    }

    /// Point the adapter at another endpoint (proxies, tests)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn build_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: request.config.map(|config| GeminiGenerationConfig {
                max_output_tokens: config.max_tokens,
                temperature: config.temperature,
            }),
        }
    }

    /// Flatten the Google error envelope into one line, e.g.
    /// `INVALID_ARGUMENT: API key not valid. (API_KEY_INVALID)`
    fn describe_error(error: &GeminiError) -> String {
        let mut description = match &error.status {
            Some(status) => format!("{}: {}", status, error.message),
            None => error.message.clone(),
        };
        let reasons: Vec<&str> = error
            .details
            .iter()
            .filter_map(|detail| detail.reason.as_deref())
            .collect();
        if !reasons.is_empty() {
            description.push_str(&format!(" ({})", reasons.join(", ")));
        }
        description
    }
}

impl Default for GoogleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn generate_content(&self, request: &GenerationRequest) -> AppResult<String> {
        let url = self.endpoint(&request.model);
        let body = Self::build_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("Gemini request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                return Err(AppError::LLMApi(format!(
                    "Gemini API error ({}): {}",
                    status,
                    Self::describe_error(&error_response.error)
                )));
            }

            return Err(AppError::LLMApi(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to parse Gemini response: {}", e)))?;

        let candidate = match gemini_response.candidates.first() {
            Some(candidate) => candidate,
            None => {
                let reason = gemini_response
                    .prompt_feedback
                    .and_then(|feedback| feedback.block_reason)
                    .unwrap_or_else(|| "no candidates".to_string());
                return Err(AppError::LLMApi(format!(
                    "Gemini returned no content: {}",
                    reason
                )));
            }
        };

        // A candidate cut off by safety or token limits may carry no parts at all
        let parts = match candidate.content.as_ref() {
            Some(content) if !content.parts.is_empty() => &content.parts,
            _ => {
                let reason = candidate
                    .finish_reason
                    .clone()
                    .unwrap_or_else(|| "empty candidate".to_string());
                return Err(AppError::LLMApi(format!(
                    "Gemini returned no content: {}",
                    reason
                )));
            }
        };

        Ok(parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect())
    }
}

/// Models offered to the front-end
pub mod models {
    pub const GEMINI_1_5_FLASH: &str = "gemini-1.5-flash";
    pub const GEMINI_1_5_PRO: &str = "gemini-1.5-pro";
    pub const GEMINI_2_0_FLASH: &str = "gemini-2.0-flash";
    pub const GEMINI_2_5_FLASH_PREVIEW: &str = "gemini-2.5-flash-preview-05-20";
    pub const GEMINI_2_5_PRO_PREVIEW: &str = "gemini-2.5-pro-preview-05-06";
}
