use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Tenant;

/// Sea-ORM entity for the `tenants` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    // Ids come from `tenants_id_seq` when the insert is staged.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: Option<DateTimeWithTimeZone>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Tenant {
    fn from(model: Model) -> Self {
        Tenant::restore(
            model.id,
            model.name,
            model.description,
            model.created_at.into(),
            model.modified_at.map(Into::into),
            model.is_deleted,
        )
    }
}

impl From<&Tenant> for ActiveModel {
    fn from(tenant: &Tenant) -> Self {
        ActiveModel {
            id: Set(tenant.id()),
            name: Set(tenant.name().to_string()),
            description: Set(tenant.description().map(str::to_string)),
            created_at: Set(tenant.created_at().into()),
            modified_at: Set(tenant.modified_at().map(Into::into)),
            is_deleted: Set(tenant.is_deleted()),
        }
    }
}
