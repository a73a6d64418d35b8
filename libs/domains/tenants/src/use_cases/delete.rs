use database::Repository;
use outcome::Outcome;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::cancellable;
use crate::commands::DeleteTenantCommand;
use crate::error::TenantResult;
use crate::models::Tenant;

pub struct DeleteTenantHandler<R> {
    repository: R,
}

impl<R: Repository<Tenant>> DeleteTenantHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Soft-deletes and returns the deleted tenant.
    #[instrument(skip(self, cancel), fields(tenant_id = command.tenant_id))]
    pub async fn handle(
        &self,
        command: DeleteTenantCommand,
        cancel: &CancellationToken,
    ) -> TenantResult<Outcome<Tenant>> {
        let Some(mut tenant) =
            cancellable(cancel, self.repository.get_by_id(command.tenant_id)).await?
        else {
            return Ok(Outcome::not_found());
        };

        tenant.delete();
        cancellable(cancel, self.repository.update(tenant.clone())).await?;
        cancellable(cancel, self.repository.save_changes()).await?;

        info!("Tenant deleted");
        Ok(Outcome::success(tenant))
    }
}
