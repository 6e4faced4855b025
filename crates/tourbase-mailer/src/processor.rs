//! Email queue processor
//!
//! Drains pending jobs through the delivery collaborator. The drain is
//! idempotent from the scheduler's point of view: an empty queue is a no-op
//! returning zero, and repeated or concurrent invocations only ever touch
//! jobs still marked pending.

use std::sync::Arc;
use tracing::{info, warn};

use tourbase_core::{mailer::Mailer, store::EmailStore, Result};

const DEFAULT_BATCH_SIZE: u32 = 50;

/// Drains the outbound email queue.
pub struct EmailProcessor {
    store: Arc<dyn EmailStore>,
    mailer: Arc<dyn Mailer>,
    batch_size: u32,
}

impl EmailProcessor {
    pub fn new(store: Arc<dyn EmailStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            mailer,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Cap the number of jobs handled per drain so a large backlog cannot
    /// pin a single cron invocation; the next tick continues the drain.
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Process all currently pending jobs (up to the batch cap) and return
    /// the number handled.
    ///
    /// A delivery failure marks that job failed and moves on; the job is not
    /// retried within this invocation. Store failures propagate.
    pub async fn drain(&self) -> Result<u64> {
        let jobs = self.store.fetch_pending(self.batch_size).await?;
        if jobs.is_empty() {
            return Ok(0);
        }

        let mut processed = 0u64;
        for job in jobs {
            match self.mailer.send(&job.recipient, &job.message).await {
                Ok(()) => {
                    self.store.mark_sent(job.id).await?;
                    info!(job_id = %job.id, recipient = %job.recipient, "Email delivered");
                }
                Err(e) => {
                    let reason = e.to_string();
                    self.store.mark_failed(job.id, &reason).await?;
                    warn!(job_id = %job.id, error = %reason, "Email delivery failed");
                }
            }
            processed += 1;
        }

        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tourbase_core::{email::EmailMessage, store::EmailStore, Error};
    use tourbase_store_memory::MemoryStore;

    /// Mailer that records deliveries and can be told to fail for a recipient
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, recipient: &str, _message: &EmailMessage) -> Result<()> {
            if self.fail_for.as_deref() == Some(recipient) {
                return Err(Error::Mailer("mailbox unavailable".to_string()));
            }
            self.sent.lock().unwrap().push(recipient.to_string());
            Ok(())
        }
    }

    fn message(subject: &str) -> EmailMessage {
        EmailMessage {
            subject: subject.to_string(),
            html_body: "<p>body</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_queue_drain_returns_zero() {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::default());
        let processor = EmailProcessor::new(store, mailer);

        assert_eq!(processor.drain().await.unwrap(), 0);
        // Draining again is still a no-op
        assert_eq!(processor.drain().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_drain_sends_and_counts_pending_jobs() {
        let store = Arc::new(MemoryStore::new());
        let tenant = store.add_tenant("A", "tenant-a", None);
        for i in 0..3 {
            store
                .enqueue(
                    tenant.id,
                    &format!("guest{}@example.com", i),
                    message("Welcome"),
                )
                .await
                .unwrap();
        }

        let mailer = Arc::new(RecordingMailer::default());
        let processor = EmailProcessor::new(store.clone(), mailer.clone());

        assert_eq!(processor.drain().await.unwrap(), 3);
        assert_eq!(mailer.sent.lock().unwrap().len(), 3);

        // Everything is processed; a second drain finds nothing
        assert_eq!(processor.drain().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_delivery_marks_job_and_continues() {
        let store = Arc::new(MemoryStore::new());
        let tenant = store.add_tenant("A", "tenant-a", None);
        store
            .enqueue(tenant.id, "bad@example.com", message("One"))
            .await
            .unwrap();
        store
            .enqueue(tenant.id, "good@example.com", message("Two"))
            .await
            .unwrap();

        let mailer = Arc::new(RecordingMailer {
            fail_for: Some("bad@example.com".to_string()),
            ..Default::default()
        });
        let processor = EmailProcessor::new(store.clone(), mailer.clone());

        // Both jobs are handled even though one delivery fails
        assert_eq!(processor.drain().await.unwrap(), 2);
        assert_eq!(mailer.sent.lock().unwrap().as_slice(), ["good@example.com"]);

        // The failed job left the pending state and is not retried
        assert_eq!(processor.drain().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_batch_size_limits_one_drain() {
        let store = Arc::new(MemoryStore::new());
        let tenant = store.add_tenant("A", "tenant-a", None);
        for i in 0..5 {
            store
                .enqueue(tenant.id, "guest@example.com", message(&format!("{}", i)))
                .await
                .unwrap();
        }

        let mailer = Arc::new(RecordingMailer::default());
        let processor = EmailProcessor::new(store.clone(), mailer).with_batch_size(2);

        assert_eq!(processor.drain().await.unwrap(), 2);
        assert_eq!(processor.drain().await.unwrap(), 2);
        assert_eq!(processor.drain().await.unwrap(), 1);
        assert_eq!(processor.drain().await.unwrap(), 0);
    }
}
