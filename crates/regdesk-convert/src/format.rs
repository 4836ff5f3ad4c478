//! Source formats recognised by the converter.

use std::fmt;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;

/// Extensions decoded as UTF-8 and passed through unchanged.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv", "json", "xml", "html", "htm"];

/// A document format the converter can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Portable Document Format.
    Pdf,
    /// Word (Office Open XML).
    Docx,
    /// PowerPoint (Office Open XML).
    Pptx,
    /// Excel workbook (Office Open XML).
    Xlsx,
    /// Any UTF-8 text format.
    Text,
}

impl SourceFormat {
    /// Resolve the format from a file name's extension.
    ///
    /// Fails with an `Unsupported` error naming the extension.
    pub fn from_file_name(file_name: &str) -> AppResult<Self> {
        let ext = extension(file_name);
        match ext.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("docx") => Ok(Self::Docx),
            Some("pptx") => Ok(Self::Pptx),
            Some("xlsx") => Ok(Self::Xlsx),
            Some(e) if TEXT_EXTENSIONS.contains(&e) => Ok(Self::Text),
            Some(e) => Err(AppError::unsupported(format!("Unsupported file type: .{e}"))),
            None => Err(AppError::unsupported(format!(
                "Unsupported file type: {file_name} has no extension"
            ))),
        }
    }

    /// Like [`from_file_name`](Self::from_file_name), but a name without
    /// an extension is read as PDF. Used for ad-hoc conversions where the
    /// caller only knows a bare name.
    pub fn from_file_name_or_pdf(file_name: &str) -> AppResult<Self> {
        match extension(file_name) {
            Some(_) => Self::from_file_name(file_name),
            None => Ok(Self::Pdf),
        }
    }

    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Xlsx => "xlsx",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension after the last dot of the final path segment.
fn extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next()?;
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
