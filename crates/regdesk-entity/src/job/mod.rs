//! AI jobs run by the external job runner.

pub mod model;
pub mod status;

pub use model::AiJob;
pub use status::AiJobStatus;
