//! Email verification tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use outcome::Outcome;
use rand::RngExt;
use rand::distr::Alphanumeric;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{NotificationError, NotificationResult};
use crate::models::VerificationToken;
use crate::templates::TemplateConfig;

const TOKEN_LENGTH: usize = 64;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailVerificationService: Send + Sync {
    /// Issue a verification token for the user, superseding any earlier one.
    async fn create_verification_token(
        &self,
        user_id: i64,
        cancel: &CancellationToken,
    ) -> NotificationResult<Outcome<VerificationToken>>;
}

/// Random alphanumeric token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[derive(Debug, Default)]
struct TokenState {
    tokens: HashMap<String, VerificationToken>,
    verified_users: HashSet<i64>,
}

/// Token store kept in process memory.
#[derive(Debug)]
pub struct InMemoryEmailVerificationService {
    lifetime: Duration,
    state: RwLock<TokenState>,
}

impl InMemoryEmailVerificationService {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            state: RwLock::new(TokenState::default()),
        }
    }

    pub fn from_config(config: &TemplateConfig) -> Self {
        Self::new(Duration::hours(config.verification_expiry_hours))
    }

    /// Redeem a token, marking its user verified.
    pub async fn verify_email(&self, token: &str) -> Outcome<i64> {
        let mut state = self.state.write().await;

        let Some(stored) = state.tokens.get_mut(token) else {
            return Outcome::not_found();
        };
        if stored.is_used() {
            return Outcome::invalid_field("token", "Verification token has already been used");
        }
        if stored.is_expired() {
            return Outcome::invalid_field("token", "Verification token has expired");
        }

        stored.used_at = Some(Utc::now());
        let user_id = stored.user_id;
        state.verified_users.insert(user_id);

        info!(user_id, "Email verified");
        Outcome::success(user_id)
    }

    pub async fn is_verified(&self, user_id: i64) -> bool {
        self.state.read().await.verified_users.contains(&user_id)
    }
}

#[async_trait]
impl EmailVerificationService for InMemoryEmailVerificationService {
    async fn create_verification_token(
        &self,
        user_id: i64,
        cancel: &CancellationToken,
    ) -> NotificationResult<Outcome<VerificationToken>> {
        if user_id <= 0 {
            return Ok(Outcome::invalid_field("userId", "User id must be positive"));
        }

        let mut state = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(NotificationError::Cancelled),
            state = self.state.write() => state,
        };

        if state.verified_users.contains(&user_id) {
            return Ok(Outcome::invalid_field("userId", "User is already verified"));
        }

        // earlier unused tokens stop working once a new one is issued
        let superseded = state.tokens.len();
        state
            .tokens
            .retain(|_, t| t.user_id != user_id || t.is_used());
        let superseded = superseded - state.tokens.len();

        let token = VerificationToken::new(user_id, generate_token(), self.lifetime);
        state.tokens.insert(token.token.clone(), token.clone());

        debug!(user_id, superseded, "Issued verification token");
        Ok(Outcome::created(token))
    }
}
