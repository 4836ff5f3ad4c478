//! AI job tracking.

pub mod service;

pub use service::AiJobService;
