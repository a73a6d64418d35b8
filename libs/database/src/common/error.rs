/// Error raised by connectors and repository adapters
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// SeaORM / driver failure
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    /// A staged entity refers to a row that no longer exists
    #[error("Entity {0} does not exist")]
    MissingEntity(i64),

    #[error("Database error: {0}")]
    Generic(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
