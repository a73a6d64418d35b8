use chrono::{DateTime, Utc};
use database::Entity;
use outcome::{GuardError, guard};

/// Tenant aggregate.
///
/// The name is never blank. Deletion is soft: [`Tenant::delete`] only flips the
/// flag, the row stays in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Tenant {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Tenant {
    /// New, not yet persisted tenant. The id is assigned when it is added to a repository.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, GuardError> {
        Ok(Self {
            id: 0,
            name: guard::not_null_or_whitespace(name, "name")?,
            description,
            created_at: Utc::now(),
            modified_at: None,
            is_deleted: false,
        })
    }

    /// Rebuild a tenant from stored state.
    pub(crate) fn restore(
        id: i64,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        modified_at: Option<DateTime<Utc>>,
        is_deleted: bool,
    ) -> Self {
        Self {
            id,
            name,
            description,
            created_at,
            modified_at,
            is_deleted,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn update_name(&mut self, name: impl Into<String>) -> Result<(), GuardError> {
        self.name = guard::not_null_or_whitespace(name, "name")?;
        self.touch();
        Ok(())
    }

    /// Overwrite the description; `Some("")` is a valid value.
    pub fn update_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn delete(&mut self) {
        self.is_deleted = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}

impl Entity for Tenant {
    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tenant_defaults() {
        let tenant = Tenant::new("Acme", Some("Widgets".into())).unwrap();

        assert_eq!(tenant.name(), "Acme");
        assert_eq!(tenant.description(), Some("Widgets"));
        assert!(tenant.modified_at().is_none());
        assert!(!tenant.is_deleted());
        assert!(tenant.created_at() <= Utc::now());
    }

    #[test]
    fn test_new_rejects_blank_name() {
        assert_eq!(
            Tenant::new("   ", None).unwrap_err(),
            GuardError::NullOrWhiteSpace("name")
        );
    }

    #[test]
    fn test_update_name_keeps_old_name_on_blank() {
        let mut tenant = Tenant::new("Acme", None).unwrap();

        assert!(tenant.update_name("").is_err());
        assert_eq!(tenant.name(), "Acme");
        assert!(tenant.modified_at().is_none());

        tenant.update_name("Acme Corp").unwrap();
        assert_eq!(tenant.name(), "Acme Corp");
        assert!(tenant.modified_at().is_some());
    }

    #[test]
    fn test_update_description_accepts_empty() {
        let mut tenant = Tenant::new("Acme", Some("Widgets".into())).unwrap();
        tenant.update_description(Some(String::new()));

        assert_eq!(tenant.description(), Some(""));
        assert!(tenant.modified_at().is_some());
    }

    #[test]
    fn test_delete_is_soft() {
        let mut tenant = Tenant::new("Acme", None).unwrap();
        tenant.assign_id(3);
        tenant.delete();

        assert!(Entity::is_deleted(&tenant));
        assert_eq!(tenant.id(), 3);
        assert!(tenant.modified_at().is_some());
    }
}
