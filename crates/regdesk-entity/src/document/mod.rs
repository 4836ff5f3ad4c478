//! Documents and their versions.

pub mod model;
pub mod status;
pub mod version;

pub use model::Document;
pub use status::VersionStatus;
pub use version::{DocumentVersion, PdfAttachment};
