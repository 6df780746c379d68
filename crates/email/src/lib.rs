//! Warden Email Service
//!
//! Delivers account links out-of-band:
//! - AWS SES integration for production email delivery
//! - Mock email service for testing and development
//! - LocalStack support for local end-to-end runs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aws_ses;
pub mod content;
pub mod mock;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email configuration error: {0}")]
    Configuration(String),

    #[error("Email validation error: {0}")]
    Validation(String),

    #[error("AWS SES error: {0}")]
    AwsSes(String),
}

/// Kind of account email, recorded in message metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    AccountActivation,
    PasswordReset,
    Invitation,
}

impl EmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailKind::AccountActivation => "account_activation",
            EmailKind::PasswordReset => "password_reset",
            EmailKind::Invitation => "invitation",
        }
    }
}

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl EmailMessage {
    /// Create a new email message
    pub fn new(to: String, from: String, subject: String, body_text: String) -> Self {
        Self {
            to,
            from,
            reply_to: None,
            subject,
            body_text,
            body_html: None,
            metadata: HashMap::new(),
        }
    }

    /// Add HTML body content
    pub fn with_html(mut self, body_html: String) -> Self {
        self.body_html = Some(body_html);
        self
    }

    /// Add reply-to address
    pub fn with_reply_to(mut self, reply_to: String) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Add metadata for tracking
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }

    pub fn with_kind(self, kind: EmailKind) -> Self {
        self.with_metadata("email_type".to_string(), kind.as_str().to_string())
    }

    pub fn kind(&self) -> Option<&str> {
        self.metadata.get("email_type").map(String::as_str)
    }
}

/// Email delivery receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
    pub provider: String,
    pub metadata: HashMap<String, String>,
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email service provider (ses, mock)
    pub provider: String,
    /// AWS region for SES
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// Default from address
    pub default_from: String,
    /// Enable email sending (can disable for testing)
    pub enabled: bool,
    /// Base URL for the application (used in account links)
    pub app_base_url: String,
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Result<Self, EmailError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let aws_region = std::env::var("AWS_REGION").ok();
        let aws_endpoint_url = std::env::var("AWS_ENDPOINT_URL").ok();

        let default_from =
            std::env::var("FROM_EMAIL").unwrap_or_else(|_| "accounts@warden.dev".to_string());

        let enabled = std::env::var("EMAIL_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let app_base_url = std::env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            provider,
            aws_region,
            aws_endpoint_url,
            default_from,
            enabled,
            app_base_url,
        })
    }
}

/// Email service trait for different implementations
#[async_trait::async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email message
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError>;

    /// Return the default "from" address for outgoing emails
    fn default_from(&self) -> String;

    /// Return the application base URL for building links
    fn app_base_url(&self) -> &str;

    fn service_name(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), EmailError>;

    /// Send the welcome email carrying the account activation link
    async fn send_activation_email(
        &self,
        recipient_email: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let url = content::activation_url(self.app_base_url(), token);

        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            "Activate your account".to_string(),
            content::activation_text(recipient_name, &url),
        )
        .with_html(content::activation_html(recipient_name, &url))
        .with_kind(EmailKind::AccountActivation);

        self.send_email(message).await
    }

    /// Send the password reset link
    async fn send_password_reset_email(
        &self,
        recipient_email: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let url = content::password_reset_url(self.app_base_url(), token);

        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            "Reset your password".to_string(),
            content::password_reset_text(recipient_name, &url),
        )
        .with_html(content::password_reset_html(recipient_name, &url))
        .with_kind(EmailKind::PasswordReset);

        self.send_email(message).await
    }

    /// Send an invitation link on behalf of an existing account
    async fn send_invitation_email(
        &self,
        recipient_email: &str,
        inviter_name: &str,
        invite_url: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            content::invitation_subject(inviter_name),
            content::invitation_text(inviter_name, invite_url),
        )
        .with_html(content::invitation_html(inviter_name, invite_url))
        .with_kind(EmailKind::Invitation);

        self.send_email(message).await
    }
}

/// Email service factory
pub struct EmailServiceFactory;

impl EmailServiceFactory {
    /// Create email service based on configuration
    pub async fn create(config: EmailConfig) -> Result<Box<dyn EmailService>, EmailError> {
        if !config.enabled {
            tracing::info!("Email service disabled, using mock implementation");
            return Ok(Box::new(
                mock::MockEmailService::new_disabled().with_app_base_url(config.app_base_url),
            ));
        }

        match config.provider.as_str() {
            "ses" | "aws-ses" => {
                tracing::info!("Creating AWS SES email service");
                let ses_service = aws_ses::SesEmailService::new(config).await?;
                Ok(Box::new(ses_service))
            }
            "mock" => {
                tracing::info!("Creating mock email service");
                Ok(Box::new(
                    mock::MockEmailService::new().with_app_base_url(config.app_base_url),
                ))
            }
            provider => Err(EmailError::Configuration(format!(
                "Unknown email provider: {}. Supported providers: ses, mock",
                provider
            ))),
        }
    }
}
