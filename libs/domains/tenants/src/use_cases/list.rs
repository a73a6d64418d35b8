use database::Repository;
use outcome::Outcome;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::cancellable;
use crate::commands::ListTenantsQuery;
use crate::error::TenantResult;
use crate::models::Tenant;

pub struct ListTenantsHandler<R> {
    repository: R,
}

impl<R: Repository<Tenant>> ListTenantsHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The repository decides which tenants are visible; soft-deleted ones never are.
    #[instrument(skip(self, cancel))]
    pub async fn handle(
        &self,
        _query: ListTenantsQuery,
        cancel: &CancellationToken,
    ) -> TenantResult<Outcome<Vec<Tenant>>> {
        let tenants = cancellable(cancel, self.repository.list()).await?;
        debug!(count = tenants.len(), "Listed tenants");
        Ok(Outcome::success(tenants))
    }
}
