//! # Axum Helpers
//!
//! Shared HTTP plumbing for the tenants platform services.
//!
//! ## Modules
//!
//! - **[`results`]**: maps use-case `Outcome`s onto a declared set of HTTP results
//! - **[`permissions`]**: opaque permission gate and the route middleware enforcing it
//! - **[`extractors`]**: validated JSON, integer id paths, per-request cancellation
//! - **[`errors`]**: structured error responses with error codes
//! - **[`server`]**: router setup, health checks, graceful shutdown
//! - **[`http`]**: security headers and CORS
//! - **[`audit`]**: audit logging for data modifications
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let api_routes = Router::new(); // domain routers
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod permissions;
pub mod results;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, RequestCancellation, ValidatedJson};

pub use permissions::{Access, AllowAll, PermissionGate, require_permission};

pub use results::{MappedResult, ResultKind, TypedResult, map_result};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
