//! One handler per command or query.
//!
//! Handlers own the repository they were given for the duration of one request.
//! Every repository call is raced against the request's cancellation token; a
//! cancelled request returns [`TenantError::Cancelled`] and leaves uncommitted
//! changes to be discarded with the repository.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::CreateTenantHandler;
pub use delete::DeleteTenantHandler;
pub use get::GetTenantHandler;
pub use list::ListTenantsHandler;
pub use update::UpdateTenantHandler;

use database::DatabaseResult;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::{TenantError, TenantResult};

async fn cancellable<T>(
    cancel: &CancellationToken,
    operation: impl Future<Output = DatabaseResult<T>>,
) -> TenantResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TenantError::Cancelled),
        result = operation => Ok(result?),
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use async_trait::async_trait;
    use database::{DatabaseResult, Entity, Repository};
    use mockall::mock;

    use crate::models::Tenant;

    mock! {
        pub TenantRepository {}

        #[async_trait]
        impl Repository<Tenant> for TenantRepository {
            async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<Tenant>>;
            async fn list(&self) -> DatabaseResult<Vec<Tenant>>;
            async fn add(&self, entity: Tenant) -> DatabaseResult<Tenant>;
            async fn update(&self, entity: Tenant) -> DatabaseResult<()>;
            async fn save_changes(&self) -> DatabaseResult<usize>;
        }
    }

    pub(crate) fn stored_tenant(id: i64, name: &str, description: Option<&str>) -> Tenant {
        let mut tenant = Tenant::new(name, description.map(str::to_string)).unwrap();
        tenant.assign_id(id);
        tenant
    }
}
