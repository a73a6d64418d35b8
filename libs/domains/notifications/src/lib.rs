//! Notifications Domain
//!
//! Sends the email verification message when a user registers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   EventPublisher    │  ← UserRegisteredEvent
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐
//! │ UserRegistered      │  ← best effort, never fails the caller
//! │ EventHandler        │
//! └──┬───────┬───────┬──┘
//!    │       │       │
//!    ▼       ▼       ▼
//!  token   template  EmailProvider
//!  service service   (SMTP)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifications::{
//!     EventPublisher, InMemoryEmailVerificationService, SmtpProvider, TemplateEngine,
//!     UserRegisteredEventHandler,
//! };
//!
//! let handler = UserRegisteredEventHandler::new(verification, templates, provider);
//! let mut publisher = EventPublisher::new();
//! publisher.subscribe(Arc::new(handler));
//!
//! publisher.publish(&event, &cancel).await;
//! ```

pub mod error;
pub mod events;
pub mod models;
pub mod providers;
pub mod templates;
pub mod verification;

pub use error::{NotificationError, NotificationResult};
pub use events::{EventHandler, EventPublisher, UserRegisteredEventHandler};
pub use models::{RegisteredUser, UserRegisteredEvent, VerificationToken};
pub use providers::{EmailContent, EmailProvider, SentEmail, SmtpConfig, SmtpProvider};
pub use templates::{EmailTemplateService, TemplateConfig, TemplateEngine};
pub use verification::{EmailVerificationService, InMemoryEmailVerificationService};
