//! PostgreSQL adapter for `Repository<Tenant>`.

use async_trait::async_trait;
use database::{DatabaseError, DatabaseResult, Repository, RepositoryFactory};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Statement, TransactionTrait,
};
use tokio::sync::Mutex;

use crate::{entity, models::Tenant};

const NEXT_ID_SQL: &str = "SELECT nextval('tenants_id_seq') AS id";

#[derive(Debug)]
enum Change {
    Insert(Tenant),
    Update(Tenant),
}

/// One unit of work over the `tenants` table.
pub struct PgTenantRepository {
    db: DatabaseConnection,
    pending: Mutex<Vec<Change>>,
}

impl PgTenantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Mutex::new(Vec::new()),
        }
    }

    async fn next_id(&self) -> DatabaseResult<i64> {
        let stmt = Statement::from_string(DatabaseBackend::Postgres, NEXT_ID_SQL.to_owned());
        let row = self
            .db
            .query_one_raw(stmt)
            .await?
            .ok_or_else(|| DatabaseError::Generic("tenants_id_seq returned no row".into()))?;

        Ok(row.try_get::<i64>("", "id")?)
    }
}

#[async_trait]
impl Repository<Tenant> for PgTenantRepository {
    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<Tenant>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> DatabaseResult<Vec<Tenant>> {
        let models = entity::Entity::find()
            .filter(entity::Column::IsDeleted.eq(false))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add(&self, mut tenant: Tenant) -> DatabaseResult<Tenant> {
        use database::Entity as _;

        tenant.assign_id(self.next_id().await?);
        self.pending.lock().await.push(Change::Insert(tenant.clone()));
        Ok(tenant)
    }

    async fn update(&self, tenant: Tenant) -> DatabaseResult<()> {
        self.pending.lock().await.push(Change::Update(tenant));
        Ok(())
    }

    async fn save_changes(&self) -> DatabaseResult<usize> {
        let mut pending = self.pending.lock().await;
        if pending.is_empty() {
            return Ok(0);
        }

        // Dropping the transaction on an early return rolls it back.
        let txn = self.db.begin().await?;
        for change in pending.iter() {
            match change {
                Change::Insert(tenant) => {
                    entity::Entity::insert(entity::ActiveModel::from(tenant))
                        .exec_without_returning(&txn)
                        .await?;
                }
                Change::Update(tenant) => {
                    entity::ActiveModel::from(tenant)
                        .update(&txn)
                        .await
                        .map_err(|e| match e {
                            DbErr::RecordNotUpdated => DatabaseError::MissingEntity(tenant.id()),
                            other => other.into(),
                        })?;
                }
            }
        }
        txn.commit().await?;

        let applied = pending.len();
        pending.clear();
        tracing::debug!(applied, "Committed tenant changes");
        Ok(applied)
    }
}

/// Opens a [`PgTenantRepository`] per request over a shared pool.
#[derive(Clone)]
pub struct PgTenantRepositoryFactory {
    db: DatabaseConnection,
}

impl PgTenantRepositoryFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RepositoryFactory<Tenant> for PgTenantRepositoryFactory {
    type Repository = PgTenantRepository;

    fn create(&self) -> Self::Repository {
        PgTenantRepository::new(self.db.clone())
    }
}
