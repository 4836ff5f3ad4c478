//! Pass-through for text formats.

use regdesk_core::result::AppResult;
use regdesk_core::traits::TextExtractor;

/// Decodes UTF-8 (lossily, without BOM) and returns the text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
