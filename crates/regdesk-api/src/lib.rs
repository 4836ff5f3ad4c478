//! # regdesk-api
//!
//! HTTP API layer for RegDesk. Every resource is mounted under `/api` with
//! one handler per method; the `action` query parameter is parsed into a
//! typed command enum before anything touches a service.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::{AppState, Stores};
