//! Text extraction trait used by the markdown converter.

use crate::result::AppResult;

/// Turns the raw bytes of one document format into markdown text.
///
/// Implementations are synchronous; callers run them on the blocking pool
/// when the payload is large.
pub trait TextExtractor: Send + Sync + std::fmt::Debug + 'static {
    /// Short name used in logs (e.g., `"pdf"`).
    fn name(&self) -> &'static str;

    /// Extract markdown from `bytes`.
    fn extract(&self, bytes: &[u8]) -> AppResult<String>;
}
