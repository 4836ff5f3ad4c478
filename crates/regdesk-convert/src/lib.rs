//! # regdesk-convert
//!
//! Converts stored attachments to markdown. The source format is resolved
//! from the file extension before anything is fetched; the bytes are then
//! downloaded through a [`ContentFetcher`](regdesk_core::traits::ContentFetcher)
//! and handed to the matching [`TextExtractor`](regdesk_core::traits::TextExtractor).

pub mod converter;
pub mod extract;
pub mod fetcher;
pub mod format;

pub use converter::MarkdownConverter;
pub use fetcher::HttpFetcher;
pub use format::SourceFormat;
