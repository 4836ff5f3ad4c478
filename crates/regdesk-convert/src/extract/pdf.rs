//! PDF text extraction.

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::TextExtractor;

use super::tidy;

/// Extracts the text of all pages, merged into one document.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        if !bytes.starts_with(b"%PDF") {
            return Err(AppError::unsupported("File is not a valid PDF"));
        }
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::unsupported(format!("Failed to read PDF: {e}")))?;
        Ok(merge_pages(&raw))
    }
}

/// Join page texts, treating form feeds as page breaks.
fn merge_pages(raw: &str) -> String {
    tidy(&raw.replace('\u{c}', "\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_pages() {
        assert_eq!(
            merge_pages("Page one\n\n\n\u{c}Page two   \n"),
            "Page one\n\nPage two"
        );
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfExtractor.extract(b"PK\x03\x04").unwrap_err();
        assert_eq!(err.message, "File is not a valid PDF");
    }
}
