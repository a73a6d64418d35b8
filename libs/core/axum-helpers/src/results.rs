//! Outcome to HTTP mapping
//!
//! ```text
//!   Outcome<T> ──map_result(f)──► MappedResult<B> ──restrict(&[..])──► TypedResult<B> ──► Response
//!
//!   Success(v)   → Ok(f(v))        200 JSON
//!   Created(v)   → Created(f(v))   201 JSON
//!   NotFound     → NotFound        404 empty body
//!   Invalid(es)  → BadRequest      400 ErrorResponse, details = validation errors
//!   Error(ms)    → BadRequest      400 ErrorResponse, details = messages
//! ```
//!
//! Each endpoint declares the result kinds it can produce. Reaching an undeclared
//! kind is a programming error and panics.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use outcome::Outcome;
use serde::Serialize;

use crate::errors::{ErrorCode, ErrorResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Ok,
    Created,
    NotFound,
    BadRequest,
}

#[derive(Debug)]
pub enum MappedResult<B> {
    Ok(B),
    Created(B),
    NotFound,
    BadRequest(ErrorResponse),
}

/// Translate an outcome, transforming the carried value with `f`.
pub fn map_result<T, B, F>(outcome: Outcome<T>, f: F) -> MappedResult<B>
where
    F: FnOnce(T) -> B,
{
    match outcome {
        Outcome::Success(value) => MappedResult::Ok(f(value)),
        Outcome::Created(value) => MappedResult::Created(f(value)),
        Outcome::NotFound => MappedResult::NotFound,
        Outcome::Invalid(errors) => MappedResult::BadRequest(
            ErrorResponse::from_code(ErrorCode::ValidationError).with_details(errors),
        ),
        Outcome::Error(messages) => {
            let message = messages
                .first()
                .cloned()
                .unwrap_or_else(|| ErrorCode::RequestFailed.default_message().to_string());
            MappedResult::BadRequest(
                ErrorResponse::new(ErrorCode::RequestFailed, message).with_details(messages),
            )
        }
    }
}

impl<B> MappedResult<B> {
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Ok(_) => ResultKind::Ok,
            Self::Created(_) => ResultKind::Created,
            Self::NotFound => ResultKind::NotFound,
            Self::BadRequest(_) => ResultKind::BadRequest,
        }
    }

    /// Narrow to the result kinds an endpoint declares.
    ///
    /// # Panics
    ///
    /// When the mapped kind is not in `declared`.
    pub fn restrict(self, declared: &[ResultKind]) -> TypedResult<B> {
        let kind = self.kind();
        if !declared.contains(&kind) {
            panic!("endpoint produced result {kind:?}, declared results are {declared:?}");
        }
        TypedResult(self)
    }
}

/// A [`MappedResult`] checked against its endpoint's declared kinds.
#[derive(Debug)]
pub struct TypedResult<B>(MappedResult<B>);

impl<B> TypedResult<B> {
    pub fn kind(&self) -> ResultKind {
        self.0.kind()
    }
}

impl<B: Serialize> IntoResponse for TypedResult<B> {
    fn into_response(self) -> Response {
        match self.0 {
            MappedResult::Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            MappedResult::Created(body) => (StatusCode::CREATED, Json(body)).into_response(),
            MappedResult::NotFound => StatusCode::NOT_FOUND.into_response(),
            MappedResult::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use outcome::ValidationError;

    async fn body_bytes(response: Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_success_is_200_with_transformed_body() {
        let response = map_result(Outcome::success(7), |v| v * 6)
            .restrict(&[ResultKind::Ok])
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"42");
    }

    #[tokio::test]
    async fn test_created_is_201() {
        let response = map_result(Outcome::created("acme"), str::to_uppercase)
            .restrict(&[ResultKind::Created, ResultKind::BadRequest])
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_bytes(response).await, b"\"ACME\"");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = map_result(Outcome::<i32>::not_found(), |v| v)
            .restrict(&[ResultKind::Ok, ResultKind::NotFound])
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_is_400_with_error_list() {
        let outcome = Outcome::<i32>::invalid(vec![
            ValidationError::new("name", "Name is required"),
            ValidationError::new("description", "Too long"),
        ]);
        let response = map_result(outcome, |v| v)
            .restrict(&[ResultKind::Ok, ResultKind::BadRequest])
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["details"].as_array().unwrap().len(), 2);
        assert_eq!(json["details"][1]["identifier"], "description");
    }

    #[tokio::test]
    async fn test_error_is_400_with_messages() {
        let response = map_result(Outcome::<i32>::error("upstream rejected"), |v| v)
            .restrict(&[ResultKind::Ok, ResultKind::BadRequest])
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["error"], "REQUEST_FAILED");
        assert_eq!(json["message"], "upstream rejected");
        assert_eq!(json["details"][0], "upstream rejected");
    }

    #[test]
    #[should_panic(expected = "endpoint produced result NotFound")]
    fn test_undeclared_kind_panics() {
        let _ = map_result(Outcome::<i32>::not_found(), |v| v)
            .restrict(&[ResultKind::Created, ResultKind::BadRequest]);
    }
}
