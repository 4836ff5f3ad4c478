//! # regdesk-core
//!
//! Core crate for RegDesk. Contains the adapter traits for object storage
//! and text extraction, configuration schemas, pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other RegDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
