//! Custom Axum extractors.

pub mod actor;
pub mod json;
pub mod pagination;
pub mod query;

pub use actor::{ACTOR_HEADER, Actor};
pub use json::ValidatedJson;
pub use pagination::PaginationParams;
pub use query::{ApiQuery, optional_uuid, parse_uuid, require_uuid};
