use super::ExtractionError;

/// Decode the upload as UTF-8.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ExtractionError::Decode(format!("Error reading TXT: {}", e)))
}
