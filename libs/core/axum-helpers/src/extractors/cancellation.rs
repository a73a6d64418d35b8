//! Per-request cancellation.
//!
//! The server installs a root [`CancellationToken`] as a request extension; it is
//! cancelled on shutdown. Each request gets a child token that is also cancelled
//! when the handler future is dropped, e.g. because the client disconnected.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tokio_util::sync::{CancellationToken, DropGuard};

pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    fn child_of(root: &CancellationToken) -> Self {
        let token = root.child_token();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl<S> FromRequestParts<S> for RequestCancellation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let root = parts
            .extensions
            .get::<CancellationToken>()
            .cloned()
            .unwrap_or_default();

        Ok(Self::child_of(&root))
    }
}
