use axum::response::{IntoResponse, Response};
use axum_helpers::errors::AppError;
use database::DatabaseError;
use outcome::GuardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantError {
    #[error(transparent)]
    InvalidArgument(#[from] GuardError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Request was cancelled")]
    Cancelled,
}

pub type TenantResult<T> = Result<T, TenantError>;

impl From<TenantError> for AppError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::InvalidArgument(e) => AppError::InvalidArgument(e.to_string()),
            TenantError::Database(e) => AppError::InternalServerError(e.to_string()),
            TenantError::Cancelled => {
                AppError::ServiceUnavailable("Request was cancelled".to_string())
            }
        }
    }
}

impl IntoResponse for TenantError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let invalid = TenantError::from(GuardError::NullOrWhiteSpace("name"));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let db = TenantError::from(DatabaseError::Generic("pool closed".into()));
        assert_eq!(db.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            TenantError::Cancelled.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
