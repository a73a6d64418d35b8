//! JSON extractor with validation via the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body and runs `Validate`, rejecting with a 400 [`ErrorResponse`]
/// whose `details` lists the failing fields.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateTenantRequest {
///     #[validate(length(max = 100))]
///     name: Option<String>,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateTenantRequest>) { /* ... */ }
/// ```
///
/// [`ErrorResponse`]: crate::errors::ErrorResponse
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}
