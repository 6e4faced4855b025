//! Mailer trait, the external delivery seam
//!
//! Actual delivery (SMTP, provider API) is an external collaborator; this
//! core only defines the boundary. Implementations must be safe to call
//! repeatedly for the same job: the queue processor may be re-invoked by the
//! scheduler, and at-most-once delivery is the collaborator's responsibility.

use async_trait::async_trait;

use crate::email::EmailMessage;
use crate::Result;

/// Email delivery collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message to one recipient.
    ///
    /// # Errors
    /// - `Error::Mailer` on delivery failure; the queue processor records the
    ///   failure on the job and continues with the rest of the batch.
    async fn send(&self, recipient: &str, message: &EmailMessage) -> Result<()>;
}
