//! Integer id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Parses a single `{id}` path segment as `i64`, answering 400 otherwise.
///
/// Range checks (e.g. strictly positive) belong to the command constructors.
///
/// ```ignore
/// async fn get_tenant(IdPath(id): IdPath) -> String {
///     format!("tenant {id}")
/// }
///
/// let app = Router::new().route("/tenants/{id}", get(get_tenant));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        raw.trim()
            .parse::<i64>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw).into_response())
    }
}
