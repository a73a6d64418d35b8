//! Permission gate
//!
//! Authorization is opaque to the services: a [`PermissionGate`] looks at the request
//! headers and answers whether the caller holds a named permission. The
//! [`require_permission`] middleware rejects before the handler runs.
//!
//! ```ignore
//! let manage = middleware::from_fn_with_state(
//!     (gate.clone(), "platform.tenants.manage"),
//!     require_permission,
//! );
//! let router = Router::new().route("/", post(create)).route_layer(manage);
//! ```

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No usable credentials (401)
    Unauthenticated,
    /// Authenticated without the permission (403)
    Forbidden,
}

#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Access;
}

/// Grants every permission. Used by endpoints marked allow-all and in local runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl PermissionGate for AllowAll {
    async fn authorize(&self, _headers: &HeaderMap, _permission: &str) -> Access {
        Access::Granted
    }
}

/// Middleware state: the gate and the permission a route requires.
pub type PermissionState = (Arc<dyn PermissionGate>, &'static str);

pub async fn require_permission(
    State((gate, permission)): State<PermissionState>,
    request: Request,
    next: Next,
) -> Response {
    match gate.authorize(request.headers(), permission).await {
        Access::Granted => next.run(request).await,
        Access::Unauthenticated => {
            tracing::debug!(permission, "Rejecting unauthenticated request");
            AppError::Unauthorized("Authentication required".to_string()).into_response()
        }
        Access::Forbidden => {
            tracing::debug!(permission, "Rejecting request lacking permission");
            AppError::Forbidden(format!("Missing permission {permission}")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    /// Grants only when `x-permissions` lists the permission; 401 without the header.
    struct HeaderGate;

    #[async_trait]
    impl PermissionGate for HeaderGate {
        async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Access {
            match headers.get("x-permissions").and_then(|v| v.to_str().ok()) {
                None => Access::Unauthenticated,
                Some(list) if list.split(',').any(|p| p.trim() == permission) => Access::Granted,
                Some(_) => Access::Forbidden,
            }
        }
    }

    fn app() -> Router {
        let gate: Arc<dyn PermissionGate> = Arc::new(HeaderGate);
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(
                (gate, "reports.read"),
                require_permission,
            ))
    }

    async fn status_for(header: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("x-permissions", value);
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_gate_outcomes_map_to_status() {
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(Some("other")).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some("other, reports.read")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_allow_all_grants() {
        let access = AllowAll.authorize(&HeaderMap::new(), "anything").await;
        assert_eq!(access, Access::Granted);
    }
}
