use database::Repository;
use outcome::Outcome;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::cancellable;
use crate::commands::GetTenantQuery;
use crate::error::TenantResult;
use crate::models::Tenant;

pub struct GetTenantHandler<R> {
    repository: R,
}

impl<R: Repository<Tenant>> GetTenantHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, cancel))]
    pub async fn handle(
        &self,
        query: GetTenantQuery,
        cancel: &CancellationToken,
    ) -> TenantResult<Outcome<Tenant>> {
        match cancellable(cancel, self.repository.get_by_id(query.tenant_id)).await? {
            Some(tenant) => Ok(Outcome::success(tenant)),
            None => {
                debug!(tenant_id = query.tenant_id, "Tenant not found");
                Ok(Outcome::not_found())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::mock::{MockTenantRepository, stored_tenant};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_get_existing_tenant() {
        let mut repository = MockTenantRepository::new();
        repository
            .expect_get_by_id()
            .with(eq(4))
            .times(1)
            .returning(|id| Ok(Some(stored_tenant(id, "Acme", None))));

        let outcome = GetTenantHandler::new(repository)
            .handle(GetTenantQuery::new(4).unwrap(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.value().map(Tenant::name), Some("Acme"));
    }

    #[tokio::test]
    async fn test_get_missing_tenant_is_not_found() {
        let mut repository = MockTenantRepository::new();
        repository.expect_get_by_id().returning(|_| Ok(None));

        let outcome = GetTenantHandler::new(repository)
            .handle(GetTenantQuery::new(99).unwrap(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NotFound);
    }
}
