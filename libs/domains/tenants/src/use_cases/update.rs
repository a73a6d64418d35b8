use database::Repository;
use outcome::Outcome;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::cancellable;
use crate::commands::UpdateTenantCommand;
use crate::error::TenantResult;
use crate::models::Tenant;

pub struct UpdateTenantHandler<R> {
    repository: R,
}

impl<R: Repository<Tenant>> UpdateTenantHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, cancel), fields(tenant_id = command.tenant_id))]
    pub async fn handle(
        &self,
        command: UpdateTenantCommand,
        cancel: &CancellationToken,
    ) -> TenantResult<Outcome<Tenant>> {
        let Some(mut tenant) =
            cancellable(cancel, self.repository.get_by_id(command.tenant_id)).await?
        else {
            return Ok(Outcome::not_found());
        };

        if let Some(name) = command.name.filter(|n| !n.trim().is_empty()) {
            tenant.update_name(name)?;
        }
        if let Some(description) = command.description {
            tenant.update_description(Some(description));
        }

        cancellable(cancel, self.repository.update(tenant.clone())).await?;
        cancellable(cancel, self.repository.save_changes()).await?;

        info!("Tenant updated");
        Ok(Outcome::success(tenant))
    }
}
