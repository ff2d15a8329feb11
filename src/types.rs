// Type definitions, generation results and the application error

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::extraction::ExtractionError;

/// One call to the generative model. Built per request, never reused.
#[derive(Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub api_key: String,
    pub prompt: String,
    /// `None` leaves the model defaults in place (used by the key probe)
    pub config: Option<GenerationConfig>,
}

impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("prompt_len", &self.prompt.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Token limit and temperature passed to the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationConfig {
    pub const MAX_TEMPERATURE: f32 = 2.0;

    /// Parse the raw form strings the front-end sends.
    pub fn parse(max_tokens: &str, temperature: &str) -> AppResult<Self> {
        let max_tokens: u32 = max_tokens.trim().parse().map_err(|_| {
            AppError::Validation(format!(
                "max_tokens must be a positive integer, got '{}'",
                max_tokens
            ))
        })?;
        if max_tokens == 0 {
            return Err(AppError::Validation(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        let temperature: f32 = temperature.trim().parse().map_err(|_| {
            AppError::Validation(format!(
                "ai_temperature must be a number, got '{}'",
                temperature
            ))
        })?;
        if !(0.0..=Self::MAX_TEMPERATURE).contains(&temperature) {
            return Err(AppError::Validation(format!(
                "ai_temperature must be between 0 and {}",
                Self::MAX_TEMPERATURE
            )));
        }

        Ok(Self {
            max_tokens,
            temperature,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidApiKey,
    QuotaExceeded,
    Unknown,
}

/// Outcome of a generation call, normalized for the front-end.
///
/// Serializes untagged: a plain string on success, `{"error", "kind"}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Success(String),
    Failure {
        kind: ErrorKind,
        #[serde(rename = "error")]
        message: String,
    },
}

impl GenerationResult {
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        GenerationResult::Failure {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Unsupported file type. Please upload PDF, TXT, or DOCX files.")]
    UnsupportedFileType,

    // The leading spaces below are what existing clients match on.
    #[error(" Api key is missing")]
    MissingApiKey,

    #[error(" enter prompt")]
    MissingPrompt,

    #[error(" enter models name")]
    MissingModel,

    #[error("{0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("{message}")]
    Generation { kind: ErrorKind, message: String },

    #[error("An error occurred: {0}")]
    Internal(String),
}

impl AppError {
    pub fn missing_field(name: &str) -> Self {
        AppError::Validation(format!("Missing required field: {}", name))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Extraction(_)
            | AppError::UnsupportedFileType
            | AppError::MissingApiKey
            | AppError::MissingPrompt
            | AppError::MissingModel
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Generation { kind, .. } => match kind {
                ErrorKind::InvalidApiKey => StatusCode::UNAUTHORIZED,
                ErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
                ErrorKind::Unknown => StatusCode::BAD_GATEWAY,
            },
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::LLMApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, "Request failed: {}", self);
        } else {
            tracing::warn!(status = %status, "Request rejected: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::Validation(format!("Malformed form data: {}", err.body_text()))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_parse() {
        let config = GenerationConfig::parse("1024", "0.7").unwrap();
        assert_eq!(config.max_tokens, 1024);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);

        let config = GenerationConfig::parse(" 8 ", " 2 ").unwrap();
        assert_eq!(config.max_tokens, 8);
    }

    #[test]
    fn test_generation_config_rejects_bad_values() {
        assert!(matches!(GenerationConfig::parse("0", "0.5"), Err(AppError::Validation(_))));
        assert!(matches!(GenerationConfig::parse("-4", "0.5"), Err(AppError::Validation(_))));
        assert!(matches!(GenerationConfig::parse("many", "0.5"), Err(AppError::Validation(_))));
        assert!(matches!(GenerationConfig::parse("100", "hot"), Err(AppError::Validation(_))));
        assert!(matches!(GenerationConfig::parse("100", "2.5"), Err(AppError::Validation(_))));
        assert!(matches!(GenerationConfig::parse("100", "-0.1"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_request_debug_hides_api_key() {
        let request = GenerationRequest {
            model: "gemini-2.0-flash".to_string(),
            api_key: "AIza-secret-key".to_string(),
            prompt: "hello".to_string(),
            config: None,
        };
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("AIza-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_generation_result_serialization() {
        let ok = serde_json::to_value(GenerationResult::Success("hi".to_string())).unwrap();
        assert_eq!(ok, serde_json::json!("hi"));

        let failed = serde_json::to_value(GenerationResult::failure(
            ErrorKind::InvalidApiKey,
            "Invalid API Key",
        ))
        .unwrap();
        assert_eq!(failed["error"], "Invalid API Key");
        assert_eq!(failed["kind"], "invalid_api_key");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::MissingApiKey.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingApiKey.to_string(), " Api key is missing");
        assert_eq!(
            AppError::Extraction(ExtractionError::UnsupportedFormat(".rtf".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Internal("boom".into()).to_string(), "An error occurred: boom");
        assert_eq!(
            AppError::PayloadTooLarge("Request payload is too large".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
