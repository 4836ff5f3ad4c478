//! DOCX raw-text extraction.

use regdesk_core::result::AppResult;
use regdesk_core::traits::TextExtractor;

use super::ooxml::{self, TextTags};

const DOCUMENT_PART: &str = "word/document.xml";

const WORD_TAGS: TextTags = TextTags {
    paragraph: b"w:p",
    text: b"w:t",
    tab: b"w:tab",
    line_break: b"w:br",
};

/// Extracts the paragraph text of the main document part.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let mut archive = ooxml::open(bytes)?;
        let xml = ooxml::read_part(&mut archive, DOCUMENT_PART)?;
        Ok(ooxml::paragraphs(&xml, WORD_TAGS)?.join("\n\n"))
    }
}
