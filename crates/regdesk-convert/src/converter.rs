//! Markdown converter: format dispatch over the extractors.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::traits::{ContentFetcher, TextExtractor};

use crate::extract::{
    DocxExtractor, PdfExtractor, PlainTextExtractor, PptxExtractor, XlsxExtractor,
};
use crate::format::SourceFormat;

/// Converts documents to markdown.
///
/// Callers resolve the [`SourceFormat`] first so that unsupported files are
/// rejected before any URL is signed or any byte is fetched.
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    fetcher: Arc<dyn ContentFetcher>,
    extractors: HashMap<SourceFormat, Arc<dyn TextExtractor>>,
}

impl MarkdownConverter {
    /// Create a converter with the built-in extractors.
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        let mut extractors: HashMap<SourceFormat, Arc<dyn TextExtractor>> = HashMap::new();
        extractors.insert(SourceFormat::Pdf, Arc::new(PdfExtractor));
        extractors.insert(SourceFormat::Docx, Arc::new(DocxExtractor));
        extractors.insert(SourceFormat::Pptx, Arc::new(PptxExtractor));
        extractors.insert(SourceFormat::Xlsx, Arc::new(XlsxExtractor));
        extractors.insert(SourceFormat::Text, Arc::new(PlainTextExtractor));
        Self {
            fetcher,
            extractors,
        }
    }

    /// Replace the extractor used for `format`.
    pub fn with_extractor(mut self, format: SourceFormat, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractors.insert(format, extractor);
        self
    }

    /// Resolve the source format of `file_name`.
    pub fn resolve(&self, file_name: &str) -> AppResult<SourceFormat> {
        SourceFormat::from_file_name(file_name)
    }

    /// Extract markdown from bytes already in memory.
    pub async fn convert_bytes(&self, format: SourceFormat, bytes: Bytes) -> AppResult<String> {
        let extractor = self
            .extractors
            .get(&format)
            .cloned()
            .ok_or_else(|| AppError::unsupported(format!("No extractor for {format}")))?;

        let name = extractor.name();
        let markdown = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Extraction task panicked", e))??;

        debug!(extractor = name, chars = markdown.len(), "Extracted text");
        Ok(markdown)
    }

    /// Fetch `url` and extract it as `format`.
    pub async fn fetch_and_convert(&self, format: SourceFormat, url: &str) -> AppResult<String> {
        let bytes = self.fetcher.fetch(url).await?;
        info!(format = %format, bytes = bytes.len(), "Converting document to markdown");
        self.convert_bytes(format, bytes).await
    }

    /// Convert the document at `url`, typed by `file_name`'s extension.
    ///
    /// A `file_name` without an extension is converted as PDF.
    pub async fn convert_url(&self, url: &str, file_name: &str) -> AppResult<String> {
        let format = SourceFormat::from_file_name_or_pdf(file_name)?;
        self.fetch_and_convert(format, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    #[derive(Debug, Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentFetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> AppResult<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"# Heading\n\nBody"))
        }
    }

    #[derive(Debug)]
    struct FixedExtractor;

    impl TextExtractor for FixedExtractor {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extract(&self, _bytes: &[u8]) -> AppResult<String> {
            Ok("from pdf".to_string())
        }
    }

    #[tokio::test]
    async fn test_convert_url_text_passthrough() {
        let fetcher = Arc::new(CountingFetcher::default());
        let converter = MarkdownConverter::new(fetcher.clone());

        let md = converter
            .convert_url("https://example.test/notes.md", "notes.md")
            .await
            .unwrap();
        assert_eq!(md, "# Heading\n\nBody");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_type_never_fetches() {
        let fetcher = Arc::new(CountingFetcher::default());
        let converter = MarkdownConverter::new(fetcher.clone());

        let err = converter
            .convert_url("https://example.test/a.xyz", "a.xyz")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Unsupported file type: .xyz");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extractor_override() {
        let converter = MarkdownConverter::new(Arc::new(CountingFetcher::default()))
            .with_extractor(SourceFormat::Pdf, Arc::new(FixedExtractor));
        let md = converter
            .convert_url("https://example.test/a.pdf", "a.pdf")
            .await
            .unwrap();
        assert_eq!(md, "from pdf");
    }

    #[tokio::test]
    async fn test_convert_url_bare_name_as_pdf() {
        let fetcher = Arc::new(CountingFetcher::default());
        let converter = MarkdownConverter::new(fetcher.clone())
            .with_extractor(SourceFormat::Pdf, Arc::new(FixedExtractor));

        let md = converter
            .convert_url("https://example.test/download?id=7", "circular")
            .await
            .unwrap();
        assert_eq!(md, "from pdf");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resolve_stays_strict_for_bare_names() {
        let converter = MarkdownConverter::new(Arc::new(CountingFetcher::default()));
        assert!(converter.resolve("circular").is_err());
    }
}
