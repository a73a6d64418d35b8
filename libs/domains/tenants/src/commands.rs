//! Commands and queries.
//!
//! Arguments are checked when a request is built, so an invalid request never
//! reaches a handler.

use outcome::{GuardError, guard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTenantCommand {
    pub name: String,
    pub description: Option<String>,
}

impl CreateTenantCommand {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, GuardError> {
        Ok(Self {
            name: guard::not_null_or_whitespace(name, "name")?,
            description,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTenantQuery {
    pub tenant_id: i64,
}

impl GetTenantQuery {
    pub fn new(tenant_id: i64) -> Result<Self, GuardError> {
        Ok(Self {
            tenant_id: guard::not_negative_or_zero(tenant_id, "tenant_id")?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTenantsQuery;

/// Patch of an existing tenant.
///
/// A blank or missing `name` leaves the name unchanged. A missing `description`
/// leaves it unchanged, while an empty one clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTenantCommand {
    pub tenant_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateTenantCommand {
    pub fn new(
        tenant_id: i64,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Self, GuardError> {
        Ok(Self {
            tenant_id: guard::not_negative_or_zero(tenant_id, "tenant_id")?,
            name,
            description,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTenantCommand {
    pub tenant_id: i64,
}

impl DeleteTenantCommand {
    pub fn new(tenant_id: i64) -> Result<Self, GuardError> {
        Ok(Self {
            tenant_id: guard::not_negative_or_zero(tenant_id, "tenant_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        assert!(CreateTenantCommand::new("", None).is_err());
        assert!(CreateTenantCommand::new("\t ", Some("d".into())).is_err());

        let command = CreateTenantCommand::new("Acme", None).unwrap();
        assert_eq!(command.name, "Acme");
    }

    #[test]
    fn test_ids_must_be_positive() {
        for id in [0, -1, i64::MIN] {
            assert!(GetTenantQuery::new(id).is_err());
            assert!(UpdateTenantCommand::new(id, None, None).is_err());
            assert!(DeleteTenantCommand::new(id).is_err());
        }

        assert_eq!(GetTenantQuery::new(1).unwrap().tenant_id, 1);
    }

    #[test]
    fn test_update_accepts_blank_name() {
        let command = UpdateTenantCommand::new(5, Some(String::new()), None).unwrap();
        assert_eq!(command.name.as_deref(), Some(""));
    }

    #[test]
    fn test_guard_error_names_parameter() {
        let err = DeleteTenantCommand::new(0).unwrap_err();
        assert_eq!(err.param(), "tenant_id");
    }
}
