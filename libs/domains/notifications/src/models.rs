//! Domain models for notifications.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user a registration event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub email: String,
}

/// Raised once a user account has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user: RegisteredUser,
}

impl UserRegisteredEvent {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            user: RegisteredUser {
                id,
                email: email.into(),
            },
        }
    }
}

/// Email verification token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationToken {
    pub id: Uuid,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn new(user_id: i64, token: String, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            expires_at: now + lifetime,
            used_at: None,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    /// Not expired and not used.
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_used()
    }
}
