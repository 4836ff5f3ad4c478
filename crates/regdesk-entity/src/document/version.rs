//! Document version entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::VersionStatus;

/// One version of a document, with an optional PDF attachment.
///
/// Versions are never deleted. The attachment can be replaced or removed;
/// removal clears all three `pdf_*` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The document this version belongs to.
    pub document_id: Uuid,
    /// Version label (e.g. `"1.0"`, `"2024-Q3"`).
    pub version: String,
    /// Approval status.
    pub status: VersionStatus,
    /// Textual content of the version.
    pub content: String,
    /// Lowercase hex SHA-256 of `content` at creation time.
    pub content_hash: String,
    /// Object key of the attached PDF.
    pub pdf_s3_key: Option<String>,
    /// Original file name of the attached PDF.
    pub pdf_file_name: Option<String>,
    /// Size of the attached PDF in bytes.
    pub pdf_file_size: Option<i64>,
    /// Date from which the version is in force.
    pub effective_date: Option<NaiveDate>,
    /// Who created the version.
    pub created_by: String,
    /// Why the version was created.
    pub change_reason: Option<String>,
    /// When the version was created.
    pub created_at: DateTime<Utc>,
    /// When the version was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The attachment fields of a version, present together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfAttachment {
    /// Object key.
    pub key: String,
    /// Original file name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
}

impl DocumentVersion {
    /// Return the attachment if one is recorded.
    pub fn pdf_attachment(&self) -> Option<PdfAttachment> {
        let key = self.pdf_s3_key.as_ref().filter(|k| !k.is_empty())?;
        Some(PdfAttachment {
            key: key.clone(),
            file_name: self.pdf_file_name.clone().unwrap_or_default(),
            file_size: self.pdf_file_size.unwrap_or(0),
        })
    }

    /// Whether a PDF is attached.
    pub fn has_pdf(&self) -> bool {
        self.pdf_attachment().is_some()
    }

    /// Record `attachment` on the version, or clear it with `None`.
    pub fn set_pdf(&mut self, attachment: Option<PdfAttachment>) {
        match attachment {
            Some(a) => {
                self.pdf_s3_key = Some(a.key);
                self.pdf_file_name = Some(a.file_name);
                self.pdf_file_size = Some(a.file_size);
            }
            None => {
                self.pdf_s3_key = None;
                self.pdf_file_name = None;
                self.pdf_file_size = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version() -> DocumentVersion {
        DocumentVersion {
            id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            version: "1.0".to_string(),
            status: VersionStatus::Draft,
            content: String::new(),
            content_hash: String::new(),
            pdf_s3_key: None,
            pdf_file_name: None,
            pdf_file_size: None,
            effective_date: None,
            created_by: "tester".to_string(),
            change_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_key_is_not_an_attachment() {
        let mut v = version();
        v.pdf_s3_key = Some(String::new());
        assert!(!v.has_pdf());
    }

    #[test]
    fn test_set_and_clear_pdf() {
        let mut v = version();
        v.set_pdf(Some(PdfAttachment {
            key: "bu/doc/ver/a.pdf".to_string(),
            file_name: "a.pdf".to_string(),
            file_size: 42,
        }));
        assert_eq!(v.pdf_attachment().map(|a| a.file_size), Some(42));

        v.set_pdf(None);
        assert!(v.pdf_s3_key.is_none());
        assert!(v.pdf_file_name.is_none());
        assert!(v.pdf_file_size.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(version()).expect("serialize");
        assert!(json.get("pdfS3Key").is_some());
        assert!(json.get("contentHash").is_some());
        assert_eq!(json["status"], "draft");
    }
}
