//! Email job types
//!
//! Outbound notifications are rendered up front and queued as [`EmailJob`]s.
//! A scheduled drain picks up pending jobs and hands them to the delivery
//! collaborator (see [`crate::mailer::Mailer`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::tenant::TenantId;
use crate::{Error, Result};

/// A rendered email document, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub html_body: String,
}

/// Lifecycle state of a queued email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailJobStatus {
    Pending,
    Sent,
    Failed,
}

impl EmailJobStatus {
    /// Stable string form used by storage backends
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailJobStatus::Pending => "pending",
            EmailJobStatus::Sent => "sent",
            EmailJobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for EmailJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailJobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(EmailJobStatus::Pending),
            "sent" => Ok(EmailJobStatus::Sent),
            "failed" => Ok(EmailJobStatus::Failed),
            other => Err(Error::Internal(format!("Unknown email status: {}", other))),
        }
    }
}

/// A queued outbound email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub recipient: String,
    pub message: EmailMessage,
    pub status: EmailJobStatus,
    /// Delivery error from the last attempt, if any
    pub error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub processed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            EmailJobStatus::Pending,
            EmailJobStatus::Sent,
            EmailJobStatus::Failed,
        ] {
            let parsed: EmailJobStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("bounced".parse::<EmailJobStatus>().is_err());
    }
}
