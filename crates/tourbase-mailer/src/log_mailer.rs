//! Tracing-backed mailer for development and tests

use async_trait::async_trait;
use tracing::info;

use tourbase_core::{email::EmailMessage, mailer::Mailer, Result};

/// Mailer that records deliveries through `tracing` instead of sending.
///
/// The production delivery collaborator (SMTP relay or provider API) lives
/// outside this repository; deployments plug it in behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, recipient: &str, message: &EmailMessage) -> Result<()> {
        info!(
            recipient = %recipient,
            subject = %message.subject,
            bytes = message.html_body.len(),
            "Email handed to delivery"
        );
        Ok(())
    }
}
