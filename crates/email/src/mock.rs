//! Mock Email Service Implementation
//!
//! Captures outgoing emails in memory so tests and local runs can pick
//! account links out of them without an external mail provider.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::{EmailError, EmailKind, EmailMessage, EmailReceipt, EmailService};

const ACTIVATION_LINK: &str = r"/v1/user/activate/([A-Za-z0-9_\-\.]+)";
const RESET_LINK: &str = r"/v1/user/password/reset/([A-Za-z0-9_\-\.]+)";
const INVITE_LINK: &str = r"(https?://\S*/v1/user/invite/[A-Za-z0-9_\-\.]+)";

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

impl CapturedEmail {
    /// First capture group of `pattern` found in the text body
    fn capture(&self, pattern: &str) -> Option<String> {
        let re = Regex::new(pattern).ok()?;
        re.captures(&self.message.body_text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn is_kind(&self, kind: EmailKind) -> bool {
        self.message.kind() == Some(kind.as_str())
    }

    /// Token carried by an activation link
    pub fn extract_activation_token(&self) -> Option<String> {
        self.capture(ACTIVATION_LINK)
    }

    /// Token carried by a password reset link
    pub fn extract_reset_token(&self) -> Option<String> {
        self.capture(RESET_LINK)
    }

    /// Full invite link
    pub fn extract_invite_link(&self) -> Option<String> {
        self.capture(INVITE_LINK)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    email_by_recipient: Arc<Mutex<HashMap<String, Vec<CapturedEmail>>>>,
    enabled: bool,
    app_base_url: String,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            enabled: true,
            app_base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a disabled mock email service (for testing)
    pub fn new_disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn with_app_base_url(mut self, app_base_url: impl Into<String>) -> Self {
        self.app_base_url = app_base_url.into();
        self
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        lock(&self.emails).clone()
    }

    /// Get emails sent to a specific recipient
    pub fn get_emails_for_recipient(&self, email: &str) -> Vec<CapturedEmail> {
        lock(&self.email_by_recipient)
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Most recent email of the given kind sent to a recipient
    pub fn get_latest_email_of_kind(&self, email: &str, kind: EmailKind) -> Option<CapturedEmail> {
        self.get_emails_for_recipient(email)
            .into_iter()
            .filter(|e| e.is_kind(kind))
            .max_by_key(|e| e.captured_at)
    }

    pub fn get_activation_token_for(&self, email: &str) -> Option<String> {
        self.get_latest_email_of_kind(email, EmailKind::AccountActivation)
            .and_then(|e| e.extract_activation_token())
    }

    pub fn get_reset_token_for(&self, email: &str) -> Option<String> {
        self.get_latest_email_of_kind(email, EmailKind::PasswordReset)
            .and_then(|e| e.extract_reset_token())
    }

    pub fn get_invite_link_for(&self, email: &str) -> Option<String> {
        self.get_latest_email_of_kind(email, EmailKind::Invitation)
            .and_then(|e| e.extract_invite_link())
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        lock(&self.emails).len()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        lock(&self.emails).clear();
        lock(&self.email_by_recipient).clear();
    }

    /// Check if email sending is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if !self.enabled {
            tracing::warn!("Mock email service disabled, skipping send");
            return Ok(EmailReceipt {
                message_id: format!("disabled-{}", Uuid::new_v4()),
                sent_at: Utc::now(),
                provider: "mock-disabled".to_string(),
                metadata: message.metadata.clone(),
            });
        }

        if !message.to.contains('@') {
            return Err(EmailError::Validation(format!(
                "Invalid recipient address: {}",
                message.to
            )));
        }

        tracing::info!(kind = ?message.kind(), "Mock email service capturing email");

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message: message.clone(),
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        lock(&self.emails).push(captured.clone());
        lock(&self.email_by_recipient)
            .entry(message.to)
            .or_default()
            .push(captured);

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        "accounts@warden.dev".to_string()
    }

    fn app_base_url(&self) -> &str {
        &self.app_base_url
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }

    async fn health_check(&self) -> Result<(), EmailError> {
        Ok(())
    }
}
