//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tenants API",
        version = "0.1.0",
        description = "Tenant management API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/tenants", api = domain_tenants::handlers::ApiDoc)
    ),
    tags(
        (name = "Tenants", description = "Tenant management endpoints")
    )
)]
pub struct ApiDoc;
