//! `Actor` extractor: the caller identity forwarded by the identity provider.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use regdesk_service::RequestContext;

/// Header carrying the authenticated caller's e-mail.
pub const ACTOR_HEADER: &str = "x-user-email";

/// Request context of the caller. Missing identity falls back to `system`.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

impl std::ops::Deref for Actor {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        Ok(Actor(RequestContext::new(actor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use regdesk_service::context::SYSTEM_ACTOR;

    async fn extract(req: Request<()>) -> Actor {
        let (mut parts, _) = req.into_parts();
        let Ok(actor) = Actor::from_request_parts(&mut parts, &()).await;
        actor
    }

    #[tokio::test]
    async fn test_reads_forwarded_identity() {
        let req = Request::builder()
            .header(ACTOR_HEADER, "officer@bank.test")
            .body(())
            .unwrap();
        assert_eq!(extract(req).await.actor, "officer@bank.test");
    }

    #[tokio::test]
    async fn test_missing_header_is_system() {
        let req = Request::builder().body(()).unwrap();
        assert_eq!(extract(req).await.actor, SYSTEM_ACTOR);
    }
}
