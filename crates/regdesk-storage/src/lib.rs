//! # regdesk-storage
//!
//! Object storage for RegDesk attachments. Binary payloads go straight
//! between the client and the bucket over signed URLs; this crate signs
//! those URLs, deletes objects, checks uploads against the
//! [`UploadPolicy`], and lays out storage paths.

pub mod factory;
pub mod path;
pub mod policy;
pub mod providers;

pub use factory::build_object_storage;
pub use path::StoragePath;
pub use policy::UploadPolicy;
pub use providers::MemoryObjectStorage;
