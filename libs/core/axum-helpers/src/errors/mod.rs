pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": [{ "identifier": "name", "errorMessage": "..." }]
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details such as field validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }
}

/// Application error type that renders as an [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::SerdeJson(e) => {
                tracing::error!(error_code = ErrorCode::SerdeJsonError.code(), "JSON parsing error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::from_code(ErrorCode::SerdeJsonError))
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::Io(e) => {
                tracing::error!(error_code = ErrorCode::IoError.code(), "I/O error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::from_code(ErrorCode::IoError))
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::JsonExtraction.code(), "JSON extraction error: {:?}", e);
                (e.status(), ErrorResponse::new(ErrorCode::JsonExtraction, e.body_text()))
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Validation error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::from_code(ErrorCode::ValidationError)
                        .with_details(field_errors(&e)),
                )
            }
            AppError::InvalidId(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), id = %raw, "Invalid id in path");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::InvalidId, format!("Invalid id: {raw}")),
                )
            }
            AppError::InvalidArgument(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidArgument.code(), "Invalid argument: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(ErrorCode::InvalidArgument, msg))
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(ErrorCode::RequestFailed, msg))
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(ErrorCode::Unauthorized, msg))
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ErrorResponse::new(ErrorCode::Forbidden, msg))
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(ErrorCode::NotFound, msg))
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(ErrorCode::Conflict, msg))
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                // the detailed message stays in the log
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::from_code(ErrorCode::InternalError))
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(ErrorCode::ServiceUnavailable, msg))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

fn map_db_error(error: &DbErr) -> (StatusCode, ErrorResponse) {
    match error {
        DbErr::RecordNotFound(what) => {
            tracing::info!(error_code = ErrorCode::DatabaseRecordNotFound.code(), "Record not found: {}", what);
            (StatusCode::NOT_FOUND, ErrorResponse::from_code(ErrorCode::DatabaseRecordNotFound))
        }
        DbErr::ConnectionAcquire(e) => {
            tracing::warn!(error_code = ErrorCode::DatabasePoolTimeout.code(), "Connection acquire failed: {:?}", e);
            (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::from_code(ErrorCode::DatabasePoolTimeout))
        }
        other => {
            tracing::error!(error_code = ErrorCode::DatabaseError.code(), "Database error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::from_code(ErrorCode::DatabaseError))
        }
    }
}

/// Flatten validator errors into the same `ValidationError` list use cases report.
fn field_errors(errors: &ValidationErrors) -> Vec<outcome::ValidationError> {
    let mut flattened: Vec<_> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                outcome::ValidationError::new(field.to_string(), message)
                    .with_code(err.code.to_string())
            })
        })
        .collect();
    flattened.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    flattened
}

pub fn error_response(status: StatusCode, error_code: ErrorCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let err = Payload { name: String::new() }.validate().unwrap_err();
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["details"][0]["identifier"], "name");
        assert_eq!(json["details"][0]["errorMessage"], "Name is required");
        assert_eq!(json["details"][0]["errorCode"], "length");
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response = AppError::InternalServerError("connection reset by peer".into()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], 1005);
        assert_eq!(json["message"], "An internal server error occurred");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_db_errors_map_to_status() {
        let not_found = AppError::Database(DbErr::RecordNotFound("tenant".into())).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let custom = AppError::Database(DbErr::Custom("boom".into())).into_response();
        assert_eq!(custom.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unavailable_keeps_message() {
        let response = AppError::ServiceUnavailable("request cancelled".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["message"], "request cancelled");
    }
}
