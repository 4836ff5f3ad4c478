//! Text extractors, one per [`SourceFormat`](crate::SourceFormat).

pub mod docx;
pub mod ooxml;
pub mod pdf;
pub mod pptx;
pub mod text;
pub mod xlsx;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use pptx::PptxExtractor;
pub use text::PlainTextExtractor;
pub use xlsx::XlsxExtractor;

/// Collapse runs of blank lines and trim trailing whitespace per line.
pub(crate) fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
