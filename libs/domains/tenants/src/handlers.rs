//! HTTP endpoints for tenants.
//!
//! | Method | Path   | Permission              | Results         |
//! |--------|--------|-------------------------|-----------------|
//! | POST   | `/`    | platform.tenants.manage | 201, 400        |
//! | GET    | `/`    | platform.tenants.manage | 200, 400        |
//! | GET    | `/{id}`| allow all               | 200, 400, 404   |
//! | PUT    | `/{id}`| platform.tenants.manage | 200, 400, 404   |
//! | DELETE | `/{id}`| allow all               | 200, 400, 404   |

use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    middleware,
    routing::{get, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, PermissionGate, RequestCancellation, ResultKind,
    TypedResult, ValidatedJson,
    errors::{
        ErrorResponse,
        responses::{
            BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
            ServiceUnavailableResponse, UnauthorizedResponse,
        },
    },
    map_result, require_permission,
};
use chrono::{DateTime, Utc};
use database::RepositoryFactory;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

use crate::commands::{
    CreateTenantCommand, DeleteTenantCommand, GetTenantQuery, ListTenantsQuery,
    UpdateTenantCommand,
};
use crate::dispatcher::{Dispatch, TenantDispatcher};
use crate::error::TenantResult;
use crate::models::Tenant;

pub const MANAGE_TENANTS: &str = "platform.tenants.manage";

const TAG: &str = "Tenants";

/// Tenant as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantModel {
    /// Identifier, rendered as a string
    #[schema(example = "42")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Tenant> for TenantModel {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id().to_string(),
            name: tenant.name().to_string(),
            description: tenant.description().map(str::to_string),
            created_at: tenant.created_at(),
            modified_at: tenant.modified_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListTenantsResponse {
    pub tenants: Vec<TenantModel>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTenantRequest {
    #[validate(length(max = 100))]
    #[schema(example = "Acme")]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Partial update. A blank `name` is ignored; an empty `description` clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTenantRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(create_tenant, list_tenants, get_tenant, update_tenant, delete_tenant),
    components(
        schemas(
            TenantModel,
            ListTenantsResponse,
            CreateTenantRequest,
            UpdateTenantRequest,
            ErrorResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "Tenant management endpoints")
    )
)]
pub struct ApiDoc;

/// Tenant routes, to be nested under `/tenants`.
pub fn router<F: RepositoryFactory<Tenant>>(
    dispatcher: TenantDispatcher<F>,
    gate: Arc<dyn PermissionGate>,
) -> Router {
    let manage = middleware::from_fn_with_state((gate, MANAGE_TENANTS), require_permission);

    let managed = Router::new()
        .route("/", get(list_tenants::<F>).post(create_tenant::<F>))
        .route("/{id}", put(update_tenant::<F>))
        .route_layer(manage);

    let open = Router::new().route("/{id}", get(get_tenant::<F>).delete(delete_tenant::<F>));

    managed.merge(open).with_state(dispatcher)
}

/// Create a tenant
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created successfully", body = TenantModel),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_tenant<F: RepositoryFactory<Tenant>>(
    State(dispatcher): State<TenantDispatcher<F>>,
    cancellation: RequestCancellation,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<CreateTenantRequest>,
) -> TenantResult<TypedResult<TenantModel>> {
    let command = CreateTenantCommand::new(request.name.unwrap_or_default(), request.description)?;
    let outcome = dispatcher.send(command, cancellation.token()).await?;

    if let Some(tenant) = outcome.value() {
        AuditEvent::new(
            None,
            "tenant.create",
            Some(format!("tenant:{}", tenant.id())),
            AuditOutcome::Success,
        )
        .with_request(&headers)
        .with_details(json!({ "tenant_name": tenant.name() }))
        .log();
    }

    Ok(map_result(outcome, TenantModel::from)
        .restrict(&[ResultKind::Created, ResultKind::BadRequest]))
}

/// List tenants
///
/// Soft-deleted tenants are never listed.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of tenants", body = ListTenantsResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tenants<F: RepositoryFactory<Tenant>>(
    State(dispatcher): State<TenantDispatcher<F>>,
    cancellation: RequestCancellation,
) -> TenantResult<TypedResult<ListTenantsResponse>> {
    let outcome = dispatcher.send(ListTenantsQuery, cancellation.token()).await?;

    Ok(map_result(outcome, |tenants| ListTenantsResponse {
        tenants: tenants.into_iter().map(TenantModel::from).collect(),
    })
    .restrict(&[ResultKind::Ok, ResultKind::BadRequest]))
}

/// Get a tenant by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Tenant ID")
    ),
    responses(
        (status = 200, description = "Tenant found", body = TenantModel),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, description = "Tenant not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_tenant<F: RepositoryFactory<Tenant>>(
    State(dispatcher): State<TenantDispatcher<F>>,
    cancellation: RequestCancellation,
    IdPath(id): IdPath,
) -> TenantResult<TypedResult<TenantModel>> {
    let outcome = dispatcher
        .send(GetTenantQuery::new(id)?, cancellation.token())
        .await?;

    Ok(map_result(outcome, TenantModel::from).restrict(&[
        ResultKind::Ok,
        ResultKind::BadRequest,
        ResultKind::NotFound,
    ]))
}

/// Update a tenant
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Tenant ID")
    ),
    request_body = UpdateTenantRequest,
    responses(
        (status = 200, description = "Tenant updated successfully", body = TenantModel),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, description = "Tenant not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_tenant<F: RepositoryFactory<Tenant>>(
    State(dispatcher): State<TenantDispatcher<F>>,
    cancellation: RequestCancellation,
    IdPath(id): IdPath,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<UpdateTenantRequest>,
) -> TenantResult<TypedResult<TenantModel>> {
    let command = UpdateTenantCommand::new(id, request.name, request.description)?;
    let outcome = dispatcher.send(command, cancellation.token()).await?;

    if let Some(tenant) = outcome.value() {
        AuditEvent::new(
            None,
            "tenant.update",
            Some(format!("tenant:{}", tenant.id())),
            AuditOutcome::Success,
        )
        .with_request(&headers)
        .log();
    }

    Ok(map_result(outcome, TenantModel::from).restrict(&[
        ResultKind::Ok,
        ResultKind::BadRequest,
        ResultKind::NotFound,
    ]))
}

/// Soft-delete a tenant
///
/// Answers with the id of the deleted tenant.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Tenant ID")
    ),
    responses(
        (status = 200, description = "Tenant deleted", body = String, example = json!("42")),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, description = "Tenant not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_tenant<F: RepositoryFactory<Tenant>>(
    State(dispatcher): State<TenantDispatcher<F>>,
    cancellation: RequestCancellation,
    IdPath(id): IdPath,
    headers: HeaderMap,
) -> TenantResult<TypedResult<String>> {
    let outcome = dispatcher
        .send(DeleteTenantCommand::new(id)?, cancellation.token())
        .await?;

    if outcome.is_success() {
        AuditEvent::new(None, "tenant.delete", Some(format!("tenant:{id}")), AuditOutcome::Success)
            .with_request(&headers)
            .log();
    }

    Ok(map_result(outcome, |tenant| tenant.id().to_string()).restrict(&[
        ResultKind::Ok,
        ResultKind::BadRequest,
        ResultKind::NotFound,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_model_renders_id_as_string() {
        let tenant = Tenant::new("Acme", None).unwrap();
        let mut model = TenantModel::from(tenant);
        model.id = "42".into();

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["id"], "42");
        assert!(json.get("createdAt").is_some());
        assert!(json["modifiedAt"].is_null());
    }

    #[test]
    fn test_openapi_lists_tenant_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/{id}"));
        assert!(doc.paths.paths.contains_key(""));
    }
}
