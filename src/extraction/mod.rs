//! Document text extraction
//!
//! Turns the raw bytes of an uploaded document into plain text. The format is chosen
//! from the filename's extension alone (case-insensitive); the bytes are never sniffed.
//!
//! - `.txt`  - UTF-8 text, see [`text`]
//! - `.pdf`  - page text in page order, see [`pdf`]
//! - `.docx` - body paragraphs in document order, see [`docx`]

pub mod docx;
pub mod pdf;
pub mod text;

use std::path::Path;

use bytes::Bytes;
use tracing::debug;

/// Extensions accepted by [`extract`]
pub const SUPPORTED_EXTENSIONS: [&str; 3] = [".pdf", ".txt", ".docx"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Parse(String),
}

/// The closed set of formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Txt,
    Docx,
}

impl DocumentFormat {
    /// Resolve a format from a filename, or report the (lowercased, dotted)
    /// extension that was not recognized.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = file_extension(filename);
        match extension.as_str() {
            ".pdf" => Ok(DocumentFormat::Pdf),
            ".txt" => Ok(DocumentFormat::Txt),
            ".docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(extension)),
        }
    }

    /// Decode `bytes` as this format.
    pub fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        match self {
            DocumentFormat::Pdf => pdf::extract_text(bytes),
            DocumentFormat::Txt => text::extract_text(bytes),
            DocumentFormat::Docx => docx::extract_text(bytes),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Txt => write!(f, "txt"),
            DocumentFormat::Docx => write!(f, "docx"),
        }
    }
}

/// An uploaded file, held in memory for the duration of one request
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Cheap pre-check used before the body is decoded
    pub fn has_supported_extension(&self) -> bool {
        DocumentFormat::from_filename(&self.filename).is_ok()
    }

    pub fn extract(&self) -> Result<String, ExtractionError> {
        extract(&self.bytes, &self.filename)
    }
}

/// Extract plain text from `bytes`, dispatching on the extension of `filename`.
pub fn extract(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_filename(filename)?;
    debug!(filename, format = %format, size = bytes.len(), "Extracting document text");
    format.extract(bytes)
}

/// Lowercased extension including the leading dot, or an empty string
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
