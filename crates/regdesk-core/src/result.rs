//! Convenience result type alias for RegDesk.

use crate::error::AppError;

/// A specialized `Result` type for RegDesk operations.
pub type AppResult<T> = Result<T, AppError>;
