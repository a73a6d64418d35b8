//! Tenants Domain
//!
//! Tenant CRUD with soft delete, structured as commands and queries that are
//! dispatched to one handler each.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  HTTP Handlers (handlers.rs)                │
//! │  - build commands (argument guards)         │
//! │  - map Outcome to declared results          │
//! └──────────────────┬──────────────────────────┘
//!                    │ Dispatch<C>
//!                    ▼
//! ┌─────────────────────────────────────────────┐
//! │  TenantDispatcher (dispatcher.rs)           │
//! │  - one repository (unit of work) per call   │
//! └──────────────────┬──────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────────┐
//! │  Use cases (use_cases/*.rs)                 │
//! │  - one read, at most one commit             │
//! │  - every await raced against cancellation   │
//! └──────────────────┬──────────────────────────┘
//!                    │ Repository<Tenant>
//!                    ▼
//! ┌─────────────────────────────────────────────┐
//! │  PgTenantRepository (postgres.rs)           │
//! │  or database::InMemoryStore                 │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use axum_helpers::AllowAll;
//! use domain_tenants::{handlers, PgTenantRepositoryFactory, TenantDispatcher};
//! use std::sync::Arc;
//!
//! let dispatcher = TenantDispatcher::new(PgTenantRepositoryFactory::new(db));
//! let router = handlers::router(dispatcher, Arc::new(AllowAll));
//! ```

pub mod commands;
pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod use_cases;

pub use commands::{
    CreateTenantCommand, DeleteTenantCommand, GetTenantQuery, ListTenantsQuery,
    UpdateTenantCommand,
};
pub use dispatcher::{Dispatch, TenantDispatcher};
pub use error::{TenantError, TenantResult};
pub use handlers::{
    CreateTenantRequest, ListTenantsResponse, MANAGE_TENANTS, TenantModel, UpdateTenantRequest,
};
pub use models::Tenant;
pub use postgres::{PgTenantRepository, PgTenantRepositoryFactory};
