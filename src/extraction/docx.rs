use std::io::Cursor;

use docx_rust::document::BodyContent;
use docx_rust::DocxFile;

use super::ExtractionError;

/// Join the text of every body paragraph with newlines.
///
/// Unlike PDF pages, the last paragraph gets no trailing newline. Tables and other
/// non-paragraph body content are skipped.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let file = DocxFile::from_reader(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Parse(format!("Error reading DOCX: {}", e)))?;
    let docx = file
        .parse()
        .map_err(|e| ExtractionError::Parse(format!("Error reading DOCX: {}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .body
        .content
        .iter()
        .filter_map(|content| match content {
            BodyContent::Paragraph(paragraph) => Some(paragraph.text()),
            _ => None,
        })
        .collect();

    tracing::debug!(paragraphs = paragraphs.len(), "DOCX text extracted");
    Ok(paragraphs.join("\n"))
}
