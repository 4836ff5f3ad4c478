//! # regdesk-service
//!
//! Business logic service layer for RegDesk. Services orchestrate the
//! stores, object storage and markdown converter, and append an audit entry
//! for every mutation of a document or document version.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod context;
pub mod document;
pub mod hash;
pub mod job;
pub mod register;

pub use audit::AuditService;
pub use context::RequestContext;
pub use document::{DocumentService, DownloadMode, VersionService};
pub use job::AiJobService;
pub use register::{RegisterEntity, RegisterService};

#[cfg(test)]
pub(crate) mod fixtures;
