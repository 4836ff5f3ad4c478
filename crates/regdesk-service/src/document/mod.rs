//! Documents and the document-version workflow.

pub mod service;
pub mod version;

pub use service::{DocumentPatch, DocumentService, NewDocument};
pub use version::{
    ConfirmUpload, DownloadMode, NewVersion, SignedDownload, UploadRequest, UploadTicket,
    VersionPatch, VersionService,
};
