//! Email providers.

mod smtp;

pub use smtp::{SmtpConfig, SmtpProvider};

use crate::error::NotificationResult;
use async_trait::async_trait;

/// Delivery receipt from a provider.
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// Provider-specific message ID for tracking.
    pub message_id: Option<String>,
    pub accepted: bool,
}

/// A rendered email ready for sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailContent {
    pub to_email: String,
    /// Display name of the recipient, may be empty
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub reply_to: Option<String>,
}

/// Sends rendered emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
