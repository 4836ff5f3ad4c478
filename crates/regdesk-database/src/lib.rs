//! # regdesk-database
//!
//! Data-access layer for RegDesk. [`store`] defines one narrow trait per
//! entity; [`repositories`] implements them against PostgreSQL with `sqlx`
//! and [`memory`] implements them in process for tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{AiJobStore, AuditLogStore, DocumentStore, DocumentVersionStore, Repository};
