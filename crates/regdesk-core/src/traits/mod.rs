//! Adapter traits defined in `regdesk-core` and implemented by other crates.

pub mod extractor;
pub mod fetcher;
pub mod object_storage;

pub use extractor::TextExtractor;
pub use fetcher::ContentFetcher;
pub use object_storage::{ObjectStorage, SignedUpload};
