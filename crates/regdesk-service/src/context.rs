//! Request context carrying the acting identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actor recorded when the caller is unknown.
pub const SYSTEM_ACTOR: &str = "system";

/// Context for the current request.
///
/// Authentication happens upstream; the identity provider forwards the
/// caller's email, which becomes the audit actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Who is acting (an email address or [`SYSTEM_ACTOR`]).
    pub actor: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for a named actor. Blank names fall back to [`SYSTEM_ACTOR`].
    pub fn new(actor: impl Into<String>) -> Self {
        let actor = actor.into();
        let actor = if actor.trim().is_empty() {
            SYSTEM_ACTOR.to_string()
        } else {
            actor.trim().to_string()
        };
        Self {
            actor,
            request_time: Utc::now(),
        }
    }

    /// Context for internal callers.
    pub fn system() -> Self {
        Self::new(SYSTEM_ACTOR)
    }
}
