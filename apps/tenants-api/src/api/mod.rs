//! API routes module

pub mod health;

use axum::Router;
use axum_helpers::AllowAll;
use domain_tenants::{PgTenantRepositoryFactory, TenantDispatcher};
use std::sync::Arc;

use crate::state::AppState;

/// Routes nested under `/api`.
pub fn routes(state: &AppState) -> Router {
    let dispatcher = TenantDispatcher::new(PgTenantRepositoryFactory::new(state.db.clone()));

    Router::new().nest(
        "/tenants",
        domain_tenants::handlers::router(dispatcher, Arc::new(AllowAll)),
    )
}
