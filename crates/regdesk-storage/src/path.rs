//! Storage path layout for version attachments.
//!
//! Objects live under `{business_unit_id}/{document_id}/{version_id}/` and
//! are named `{unix_millis}-{upload_id}-{sanitized_file_name}`, where the
//! upload id is a fresh UUIDv7 in simple form.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Longest file name kept after sanitizing.
const MAX_FILE_NAME_LEN: usize = 200;

/// The storage prefix owned by one document version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoragePath {
    business_unit_id: Uuid,
    document_id: Uuid,
    version_id: Uuid,
}

impl StoragePath {
    /// Prefix for a version of a document in a business unit.
    pub fn for_version(business_unit_id: Uuid, document_id: Uuid, version_id: Uuid) -> Self {
        Self {
            business_unit_id,
            document_id,
            version_id,
        }
    }

    /// The prefix, including the trailing slash.
    pub fn prefix(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.business_unit_id, self.document_id, self.version_id
        )
    }

    /// A fresh object key for `file_name` uploaded at `now`.
    ///
    /// Every call yields a distinct key, even for the same name and instant.
    pub fn object_key(&self, file_name: &str, now: DateTime<Utc>) -> String {
        format!(
            "{}{}-{}-{}",
            self.prefix(),
            now.timestamp_millis(),
            Uuid::now_v7().simple(),
            sanitize_file_name(file_name)
        )
    }

    /// Whether `key` names an object directly under this prefix.
    pub fn contains(&self, key: &str) -> bool {
        key.strip_prefix(&self.prefix())
            .is_some_and(|name| !name.is_empty() && !name.contains('/') && name != "..")
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// Reduce a client-supplied file name to a safe object name segment.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_NAME_LEN)
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("AML Policy v2.pdf"), "AML_Policy_v2.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\risk.pdf"), "risk.pdf");
        assert_eq!(sanitize_file_name("..."), "file");
        assert_eq!(sanitize_file_name("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn test_object_key_layout() {
        let (bu, doc, ver) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let path = StoragePath::for_version(bu, doc, ver);
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        let key = path.object_key("policy.pdf", now);
        let name = key
            .strip_prefix(&format!("{bu}/{doc}/{ver}/1700000000123-"))
            .unwrap();
        let (upload_id, file_name) = name.split_once('-').unwrap();
        assert_eq!(upload_id.len(), 32);
        assert!(upload_id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(file_name, "policy.pdf");
        assert!(path.contains(&key));
    }

    #[test]
    fn test_object_keys_unique_within_one_millisecond() {
        let path = StoragePath::for_version(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let now = Utc.timestamp_millis_opt(1_792_438_244_871).unwrap();

        let first = path.object_key("policy.pdf", now);
        let second = path.object_key("policy.pdf", now);
        assert_ne!(first, second);
        assert!(path.contains(&first));
        assert!(path.contains(&second));
    }

    #[test]
    fn test_contains_rejects_foreign_keys() {
        let path = StoragePath::for_version(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let other = StoragePath::for_version(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert!(!path.contains(&other.object_key("a.pdf", Utc::now())));
        assert!(!path.contains(&path.prefix()));
        assert!(!path.contains(&format!("{}nested/a.pdf", path.prefix())));
        assert!(!path.contains("a.pdf"));
    }
}
