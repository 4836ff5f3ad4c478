//! # regdesk-client
//!
//! Typed client for the RegDesk HTTP API.
//!
//! Reads go through an explicit [`QueryCache`]; every mutation names the
//! [`Mutation`] it performed and the cache drops exactly the keys that
//! mutation invalidates. [`JobPoller`] follows an AI job at a fixed
//! interval until it reaches a terminal status.

pub mod cache;
pub mod client;
pub mod poller;
pub mod types;

pub use cache::{Mutation, QueryCache, QueryKey};
pub use client::{RegDeskClient, Register};
pub use poller::{JobPoller, JobSource};
pub use types::{
    CreateVersion, DownloadMode, Markdown, SignedDownload, UploadTicket, VersionMetadata,
};
