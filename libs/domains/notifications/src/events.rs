//! Domain event handling.
//!
//! Event handlers are side channels: whatever goes wrong inside one is logged
//! and contained, so the operation that raised the event is never affected.

use async_trait::async_trait;
use outcome::Outcome;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, trace};

use crate::error::{NotificationError, NotificationResult};
use crate::models::UserRegisteredEvent;
use crate::providers::EmailProvider;
use crate::templates::EmailTemplateService;
use crate::verification::EmailVerificationService;

#[async_trait]
pub trait EventHandler<E>: Send + Sync {
    async fn handle(&self, event: &E, cancel: &CancellationToken);
}

/// Fans an event out to every subscribed handler, in subscription order.
pub struct EventPublisher<E> {
    handlers: Vec<Arc<dyn EventHandler<E>>>,
}

impl<E> Default for EventPublisher<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E: Sync> EventPublisher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Arc<dyn EventHandler<E>>) {
        self.handlers.push(handler);
    }

    pub async fn publish(&self, event: &E, cancel: &CancellationToken) {
        for handler in &self.handlers {
            handler.handle(event, cancel).await;
        }
    }
}

/// Sends the verification email for a newly registered user.
pub struct UserRegisteredEventHandler {
    verification: Arc<dyn EmailVerificationService>,
    templates: Arc<dyn EmailTemplateService>,
    provider: Arc<dyn EmailProvider>,
}

impl UserRegisteredEventHandler {
    pub fn new(
        verification: Arc<dyn EmailVerificationService>,
        templates: Arc<dyn EmailTemplateService>,
        provider: Arc<dyn EmailProvider>,
    ) -> Self {
        Self {
            verification,
            templates,
            provider,
        }
    }

    async fn send_verification_email(
        &self,
        email: &str,
        token: &str,
        cancel: &CancellationToken,
    ) -> NotificationResult<()> {
        let content = self.templates.create_verification_email(email, token)?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(NotificationError::Cancelled),
            sent = self.provider.send(&content) => sent.map(|_| ()),
        }
    }
}

#[async_trait]
impl EventHandler<UserRegisteredEvent> for UserRegisteredEventHandler {
    #[instrument(skip_all, fields(user_id = event.user.id))]
    async fn handle(&self, event: &UserRegisteredEvent, cancel: &CancellationToken) {
        let user = &event.user;
        trace!(email = %user.email, "Handling user registered event");

        let token = match self
            .verification
            .create_verification_token(user.id, cancel)
            .await
        {
            Ok(Outcome::Success(token) | Outcome::Created(token)) => token,
            Ok(other) => {
                let reasons: Vec<&str> = other
                    .validation_errors()
                    .iter()
                    .map(|e| e.error_message.as_str())
                    .chain(other.errors().iter().map(String::as_str))
                    .collect();
                error!(
                    status = %other.status(),
                    errors = %reasons.join(", "),
                    "Failed to create verification token"
                );
                return;
            }
            Err(e) => {
                error!(email = %user.email, error = %e, "Failed to send verification email");
                return;
            }
        };

        match self.send_verification_email(&user.email, &token.token, cancel).await {
            Ok(()) => info!(
                email = %user.email,
                provider = self.provider.name(),
                "Verification email sent successfully"
            ),
            Err(e) => error!(email = %user.email, error = %e, "Failed to send verification email"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{EmailContent, MockEmailProvider, SentEmail};
    use crate::templates::MockEmailTemplateService;
    use crate::verification::MockEmailVerificationService;
    use crate::models::VerificationToken;
    use crate::{InMemoryEmailVerificationService, TemplateConfig, TemplateEngine};
    use chrono::Duration;
    use mockall::predicate::eq;
    use tracing_test::traced_test;

    fn event() -> UserRegisteredEvent {
        UserRegisteredEvent::new(42, "ada@example.com")
    }

    fn issued_token() -> VerificationToken {
        VerificationToken::new(42, "tok".into(), Duration::hours(24))
    }

    fn accepting_provider(times: usize) -> MockEmailProvider {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(times).returning(|_| {
            Ok(SentEmail {
                message_id: Some("<1@test>".into()),
                accepted: true,
            })
        });
        provider.expect_name().return_const("mock");
        provider
    }

    #[tokio::test]
    #[traced_test]
    async fn test_sends_verification_email() {
        let mut verification = MockEmailVerificationService::new();
        verification
            .expect_create_verification_token()
            .with(eq(42), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(Outcome::created(issued_token())));

        let mut templates = MockEmailTemplateService::new();
        templates
            .expect_create_verification_email()
            .times(1)
            .returning(|address: &str, token: &str| {
                assert_eq!(address, "ada@example.com");
                assert_eq!(token, "tok");
                Ok(EmailContent {
                    to_email: address.to_string(),
                    ..Default::default()
                })
            });

        let handler = UserRegisteredEventHandler::new(
            Arc::new(verification),
            Arc::new(templates),
            Arc::new(accepting_provider(1)),
        );
        handler.handle(&event(), &CancellationToken::new()).await;

        assert!(logs_contain("Verification email sent successfully"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_token_creation_sends_nothing() {
        let mut verification = MockEmailVerificationService::new();
        verification
            .expect_create_verification_token()
            .returning(|_, _| Ok(Outcome::invalid_field("userId", "User is already verified")));

        let mut templates = MockEmailTemplateService::new();
        templates.expect_create_verification_email().never();

        let handler = UserRegisteredEventHandler::new(
            Arc::new(verification),
            Arc::new(templates),
            Arc::new(accepting_provider(0)),
        );
        handler.handle(&event(), &CancellationToken::new()).await;

        assert!(logs_contain("Failed to create verification token"));
        assert!(logs_contain("User is already verified"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_provider_failure_is_contained() {
        let mut verification = MockEmailVerificationService::new();
        verification
            .expect_create_verification_token()
            .returning(|_, _| Ok(Outcome::created(issued_token())));

        let mut templates = MockEmailTemplateService::new();
        templates
            .expect_create_verification_email()
            .returning(|_: &str, _: &str| Ok(EmailContent::default()));

        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .times(1)
            .returning(|_| Err(NotificationError::ProviderError("connection refused".into())));

        let handler = UserRegisteredEventHandler::new(
            Arc::new(verification),
            Arc::new(templates),
            Arc::new(provider),
        );
        handler.handle(&event(), &CancellationToken::new()).await;

        assert!(logs_contain("Failed to send verification email"));
        assert!(logs_contain("connection refused"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_service_error_is_contained() {
        let mut verification = MockEmailVerificationService::new();
        verification
            .expect_create_verification_token()
            .returning(|_, _| Err(NotificationError::Cancelled));

        let handler = UserRegisteredEventHandler::new(
            Arc::new(verification),
            Arc::new(MockEmailTemplateService::new()),
            Arc::new(accepting_provider(0)),
        );
        handler.handle(&event(), &CancellationToken::new()).await;

        assert!(logs_contain("Failed to send verification email"));
    }

    #[tokio::test]
    async fn test_publisher_runs_real_pipeline() {
        let config = TemplateConfig::default();
        let verification = Arc::new(InMemoryEmailVerificationService::from_config(&config));

        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .withf(|email: &EmailContent| {
                email.to_email == "ada@example.com"
                    && email.text_body.contains("/verify-email?token=")
            })
            .times(1)
            .returning(|_| {
                Ok(SentEmail {
                    message_id: None,
                    accepted: true,
                })
            });
        provider.expect_name().return_const("mock");

        let handler = UserRegisteredEventHandler::new(
            verification.clone(),
            Arc::new(TemplateEngine::new(config).unwrap()),
            Arc::new(provider),
        );
        let mut publisher = EventPublisher::<UserRegisteredEvent>::new();
        publisher.subscribe(Arc::new(handler));

        publisher.publish(&event(), &CancellationToken::new()).await;

        assert!(!verification.is_verified(42).await);
    }
}
