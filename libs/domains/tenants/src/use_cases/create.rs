use database::Repository;
use outcome::Outcome;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::cancellable;
use crate::commands::CreateTenantCommand;
use crate::error::TenantResult;
use crate::models::Tenant;

pub struct CreateTenantHandler<R> {
    repository: R,
}

impl<R: Repository<Tenant>> CreateTenantHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, cancel))]
    pub async fn handle(
        &self,
        command: CreateTenantCommand,
        cancel: &CancellationToken,
    ) -> TenantResult<Outcome<Tenant>> {
        let tenant = Tenant::new(command.name, command.description)?;
        let tenant = cancellable(cancel, self.repository.add(tenant)).await?;
        cancellable(cancel, self.repository.save_changes()).await?;

        info!(tenant_id = tenant.id(), "Tenant created");
        Ok(Outcome::created(tenant))
    }
}
