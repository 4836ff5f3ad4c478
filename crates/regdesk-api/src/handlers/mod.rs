//! HTTP request handlers, one module per resource.

pub mod audit;
pub mod convert;
pub mod documents;
pub mod health;
pub mod jobs;
pub mod register;
pub mod versions;
