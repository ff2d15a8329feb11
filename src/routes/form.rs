//! Multipart form collection shared by the POST handlers
//!
//! The browser front-end posts `FormData`, so every endpoint reads `multipart/form-data`.
//! Text parts are collected by name; the part named `file` is kept as the uploaded document.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::extraction::UploadedDocument;
use crate::types::{AppError, AppResult, GenerationConfig, GenerationRequest};

const FILE_FIELD: &str = "file";

#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
    file: Option<UploadedDocument>,
}

impl FormFields {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FormFields::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILE_FIELD {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.file = Some(UploadedDocument::new(filename, bytes));
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A field that must be present; empty strings are accepted.
    pub fn require(&self, name: &str) -> AppResult<&str> {
        self.get(name).ok_or_else(|| AppError::missing_field(name))
    }

    /// A field that must be present and non-blank, reported with `error`.
    pub fn require_non_blank(&self, name: &str, error: fn() -> AppError) -> AppResult<&str> {
        match self.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(error()),
        }
    }

    pub fn api_key(&self) -> AppResult<&str> {
        self.require_non_blank("api_key", || AppError::MissingApiKey)
    }

    pub fn model(&self) -> AppResult<&str> {
        self.require_non_blank("models", || AppError::MissingModel)
    }

    pub fn generation_config(&self) -> AppResult<GenerationConfig> {
        GenerationConfig::parse(self.require("max_tokens")?, self.require("ai_temperature")?)
    }

    /// True when `name` holds a truthy flag (`true`, `1`, `yes`, `on`)
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.get(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true" | "1" | "yes" | "on")
        )
    }

    /// Build a generation request for `prompt` from the shared model fields.
    pub fn generation_request(&self, prompt: &str) -> AppResult<GenerationRequest> {
        let api_key = self.api_key()?;
        let model = self.model()?;
        let config = self.generation_config()?;

        Ok(GenerationRequest {
            model: model.to_string(),
            api_key: api_key.to_string(),
            prompt: prompt.to_string(),
            config: Some(config),
        })
    }

    pub fn take_file(&mut self) -> Option<UploadedDocument> {
        self.file.take()
    }
}

#[cfg(test)]
impl FormFields {
    pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: None,
        }
    }
}
