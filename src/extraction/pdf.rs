use lopdf::Document;

use super::ExtractionError;

/// Concatenate the text of every page in page order.
///
/// Every page, the last one included, is followed by a newline.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractionError::Parse(format!("Error reading PDF: {}", e)))?;

    let pages = doc.get_pages();
    let mut text = String::new();
    for page_num in pages.keys() {
        let content = doc.extract_text(&[*page_num]).map_err(|e| {
            ExtractionError::Parse(format!("Error reading PDF: page {}: {}", page_num, e))
        })?;
        // lopdf already ends a page with a newline; keep exactly one
        text.push_str(content.strip_suffix('\n').unwrap_or(&content));
        text.push('\n');
    }

    tracing::debug!(pages = pages.len(), chars = text.len(), "PDF text extracted");
    Ok(text)
}
