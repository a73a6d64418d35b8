//! Verification email templates, rendered with handlebars.

use core_config::{FromEnv, env_or_default, env_parse_or};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::error::{NotificationError, NotificationResult};
use crate::providers::EmailContent;

const VERIFICATION_HTML: &str = "verification_html";
const VERIFICATION_TEXT: &str = "verification_text";

/// Builds the verification email for a freshly issued token.
#[cfg_attr(test, mockall::automock)]
pub trait EmailTemplateService: Send + Sync {
    fn create_verification_email(
        &self,
        address: &str,
        token: &str,
    ) -> NotificationResult<EmailContent>;
}

/// Settings shared by the templates and the token service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Base URL of the frontend serving `/verify-email`
    pub frontend_url: String,
    pub verification_expiry_hours: i64,
    pub company_name: String,
    pub logo_url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            verification_expiry_hours: 24,
            company_name: "Endatix".to_string(),
            logo_url: String::new(),
        }
    }
}

impl FromEnv for TemplateConfig {
    fn from_env() -> Result<Self, core_config::ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            frontend_url: env_or_default("FRONTEND_URL", &defaults.frontend_url),
            verification_expiry_hours: env_parse_or(
                "EMAIL_VERIFICATION_EXPIRY_HOURS",
                defaults.verification_expiry_hours,
            )?,
            company_name: env_or_default("COMPANY_NAME", &defaults.company_name),
            logo_url: env_or_default("LOGO_URL", &defaults.logo_url),
        })
    }
}

impl TemplateConfig {
    pub fn verification_url(&self, token: &str) -> String {
        format!(
            "{}/verify-email?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }
}

#[derive(Debug, Serialize)]
struct VerificationEmailData<'a> {
    email: &'a str,
    verification_url: String,
    expiry_hours: i64,
    company_name: &'a str,
    logo_url: &'a str,
}

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    config: TemplateConfig,
}

impl TemplateEngine {
    pub fn new(config: TemplateConfig) -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(VERIFICATION_HTML, VERIFICATION_HTML_TEMPLATE)?;
        handlebars.register_template_string(VERIFICATION_TEXT, VERIFICATION_TEXT_TEMPLATE)?;

        Ok(Self { handlebars, config })
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }
}

impl EmailTemplateService for TemplateEngine {
    fn create_verification_email(
        &self,
        address: &str,
        token: &str,
    ) -> NotificationResult<EmailContent> {
        if address.trim().is_empty() {
            return Err(NotificationError::InvalidEmail(address.to_string()));
        }
        debug!(email = %address, "Rendering verification email");

        let data = VerificationEmailData {
            email: address,
            verification_url: self.config.verification_url(token),
            expiry_hours: self.config.verification_expiry_hours,
            company_name: &self.config.company_name,
            logo_url: &self.config.logo_url,
        };

        Ok(EmailContent {
            to_email: address.to_string(),
            subject: format!("Verify your {} account", self.config.company_name),
            html_body: self.handlebars.render(VERIFICATION_HTML, &data)?,
            text_body: self.handlebars.render(VERIFICATION_TEXT, &data)?,
            ..Default::default()
        })
    }
}

const VERIFICATION_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Verify your email</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px;">
        {{#if logo_url}}
        <p style="text-align: center;"><img src="{{logo_url}}" alt="{{company_name}}" height="40"></p>
        {{/if}}
        <h1 style="color: #18181b; font-size: 22px; text-align: center;">Confirm your email address</h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; text-align: center;">
          Please confirm that {{email}} belongs to you to finish setting up your {{company_name}} account.
        </p>
        <p style="text-align: center;">
          <a href="{{{verification_url}}}" style="display: inline-block; background-color: #2563eb; color: #ffffff; padding: 12px 32px; text-decoration: none; border-radius: 6px;">Verify email</a>
        </p>
        <p style="color: #71717a; font-size: 12px; text-align: center;">
          The link is valid for {{expiry_hours}} hours. If you did not sign up, ignore this message.
        </p>
      </td>
    </tr>
  </table>
</body>
</html>"#;

const VERIFICATION_TEXT_TEMPLATE: &str = r#"Confirm your email address

Please confirm that {{{email}}} belongs to you to finish setting up your {{{company_name}}} account:

{{{verification_url}}}

The link is valid for {{expiry_hours}} hours. If you did not sign up, ignore this message.

-- {{{company_name}}}"#;
