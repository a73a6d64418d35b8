//! Routes each command or query to its handler.
//!
//! The dispatcher opens a fresh repository for every request, so each request
//! is its own unit of work.

use async_trait::async_trait;
use database::RepositoryFactory;
use outcome::Outcome;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::commands::{
    CreateTenantCommand, DeleteTenantCommand, GetTenantQuery, ListTenantsQuery,
    UpdateTenantCommand,
};
use crate::error::TenantResult;
use crate::models::Tenant;
use crate::use_cases::{
    CreateTenantHandler, DeleteTenantHandler, GetTenantHandler, ListTenantsHandler,
    UpdateTenantHandler,
};

#[async_trait]
pub trait Dispatch<C>: Send + Sync {
    type Output;

    async fn send(&self, request: C, cancel: &CancellationToken) -> TenantResult<Self::Output>;
}

pub struct TenantDispatcher<F> {
    factory: Arc<F>,
}

impl<F> Clone for TenantDispatcher<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<F: RepositoryFactory<Tenant>> TenantDispatcher<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }
}

#[async_trait]
impl<F: RepositoryFactory<Tenant>> Dispatch<CreateTenantCommand> for TenantDispatcher<F> {
    type Output = Outcome<Tenant>;

    async fn send(
        &self,
        request: CreateTenantCommand,
        cancel: &CancellationToken,
    ) -> TenantResult<Self::Output> {
        CreateTenantHandler::new(self.factory.create())
            .handle(request, cancel)
            .await
    }
}

#[async_trait]
impl<F: RepositoryFactory<Tenant>> Dispatch<GetTenantQuery> for TenantDispatcher<F> {
    type Output = Outcome<Tenant>;

    async fn send(
        &self,
        request: GetTenantQuery,
        cancel: &CancellationToken,
    ) -> TenantResult<Self::Output> {
        GetTenantHandler::new(self.factory.create())
            .handle(request, cancel)
            .await
    }
}

#[async_trait]
impl<F: RepositoryFactory<Tenant>> Dispatch<ListTenantsQuery> for TenantDispatcher<F> {
    type Output = Outcome<Vec<Tenant>>;

    async fn send(
        &self,
        request: ListTenantsQuery,
        cancel: &CancellationToken,
    ) -> TenantResult<Self::Output> {
        ListTenantsHandler::new(self.factory.create())
            .handle(request, cancel)
            .await
    }
}

#[async_trait]
impl<F: RepositoryFactory<Tenant>> Dispatch<UpdateTenantCommand> for TenantDispatcher<F> {
    type Output = Outcome<Tenant>;

    async fn send(
        &self,
        request: UpdateTenantCommand,
        cancel: &CancellationToken,
    ) -> TenantResult<Self::Output> {
        UpdateTenantHandler::new(self.factory.create())
            .handle(request, cancel)
            .await
    }
}

#[async_trait]
impl<F: RepositoryFactory<Tenant>> Dispatch<DeleteTenantCommand> for TenantDispatcher<F> {
    type Output = Outcome<Tenant>;

    async fn send(
        &self,
        request: DeleteTenantCommand,
        cancel: &CancellationToken,
    ) -> TenantResult<Self::Output> {
        DeleteTenantHandler::new(self.factory.create())
            .handle(request, cancel)
            .await
    }
}
