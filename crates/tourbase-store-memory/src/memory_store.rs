//! MemoryStore - in-memory implementation of the store traits

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use tourbase_core::{
    audit::{AuditEntry, NewAuditEntry},
    email::{EmailJob, EmailJobStatus, EmailMessage},
    store::{AuditStore, EmailStore, TenantStore},
    tenant::{Tenant, TenantId},
    tour::{NewTour, Tour, TourId, TourPatch},
    Error, Result,
};

#[derive(Default)]
struct Inner {
    tenants: Vec<Tenant>,
    tours: Vec<Tour>,
    audit: Vec<AuditEntry>,
    emails: Vec<EmailJob>,
}

/// In-memory store for tests and local development.
///
/// Cloning is cheap and clones share state, mirroring how a connection pool
/// is shared across handlers in the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant. Tenants are provisioned out of band in production, so
    /// the trait has no create operation; tests use this instead.
    pub fn add_tenant(
        &self,
        name: impl Into<String>,
        slug: impl Into<String>,
        custom_domain: Option<String>,
    ) -> Tenant {
        let tenant = Tenant {
            id: TenantId::new(),
            name: name.into(),
            slug: slug.into(),
            custom_domain,
            created_at: chrono::Utc::now(),
        };
        self.inner.lock().unwrap().tenants.push(tenant.clone());
        tenant
    }
}

#[async_trait]
impl TenantStore for MemoryStore {
    async fn get_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tenants.iter().find(|t| t.slug == slug).cloned())
    }

    async fn get_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tenants
            .iter()
            .find(|t| t.custom_domain.as_deref() == Some(domain))
            .cloned())
    }

    async fn get_tours(&self, tenant_id: TenantId) -> Result<Vec<Tour>> {
        let inner = self.inner.lock().unwrap();
        let mut tours: Vec<(usize, Tour)> = inner
            .tours
            .iter()
            .enumerate()
            .filter(|(_, t)| t.tenant_id == tenant_id)
            .map(|(i, t)| (i, t.clone()))
            .collect();
        // Newest first; insertion order breaks created_at ties deterministically
        tours.sort_by(|(ia, a), (ib, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| ib.cmp(ia))
        });
        Ok(tours.into_iter().map(|(_, t)| t).collect())
    }

    async fn get_tour_by_slug(&self, tenant_id: TenantId, slug: &str) -> Result<Option<Tour>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tours
            .iter()
            .find(|t| t.tenant_id == tenant_id && t.slug == slug)
            .cloned())
    }

    async fn get_tour(&self, tenant_id: TenantId, tour_id: TourId) -> Result<Option<Tour>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tours
            .iter()
            .find(|t| t.tenant_id == tenant_id && t.id == tour_id)
            .cloned())
    }

    async fn create_tour(&self, input: NewTour) -> Result<Tour> {
        let mut inner = self.inner.lock().unwrap();
        let duplicate = inner
            .tours
            .iter()
            .any(|t| t.tenant_id == input.tenant_id && t.slug == input.slug);
        if duplicate {
            return Err(Error::Database(format!(
                "Duplicate tour slug '{}' for tenant {}",
                input.slug, input.tenant_id
            )));
        }

        let now = chrono::Utc::now();
        let tour = Tour {
            id: TourId::new(),
            tenant_id: input.tenant_id,
            slug: input.slug,
            title: input.title,
            description: input.description,
            price_cents: input.price_cents,
            currency: input.currency,
            duration_days: input.duration_days,
            created_at: now,
            updated_at: now,
        };
        inner.tours.push(tour.clone());
        Ok(tour)
    }

    async fn update_tour(
        &self,
        tenant_id: TenantId,
        tour_id: TourId,
        patch: TourPatch,
    ) -> Result<Option<Tour>> {
        let mut inner = self.inner.lock().unwrap();
        // The match condition carries both keys; another tenant's tour is
        // simply not found.
        let tour = inner
            .tours
            .iter_mut()
            .find(|t| t.id == tour_id && t.tenant_id == tenant_id);

        let Some(tour) = tour else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            tour.title = title;
        }
        if let Some(description) = patch.description {
            tour.description = Some(description);
        }
        if let Some(price_cents) = patch.price_cents {
            tour.price_cents = price_cents;
        }
        if let Some(currency) = patch.currency {
            tour.currency = currency;
        }
        if let Some(duration_days) = patch.duration_days {
            tour.duration_days = duration_days;
        }
        tour.updated_at = chrono::Utc::now();

        Ok(Some(tour.clone()))
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn log_action(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        let persisted = AuditEntry {
            id: Uuid::new_v4(),
            tenant_id: entry.tenant_id,
            user_id: entry.user_id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            before: entry.before,
            after: entry.after,
            ip_address: entry.ip_address,
            created_at: chrono::Utc::now(),
        };
        self.inner.lock().unwrap().audit.push(persisted.clone());
        Ok(persisted)
    }

    async fn get_entries(&self, tenant_id: TenantId, limit: u32) -> Result<Vec<AuditEntry>> {
        let inner = self.inner.lock().unwrap();
        let mut entries: Vec<AuditEntry> = inner
            .audit
            .iter()
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .collect();
        entries.reverse();
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[async_trait]
impl EmailStore for MemoryStore {
    async fn enqueue(
        &self,
        tenant_id: TenantId,
        recipient: &str,
        message: EmailMessage,
    ) -> Result<EmailJob> {
        let job = EmailJob {
            id: Uuid::new_v4(),
            tenant_id,
            recipient: recipient.to_string(),
            message,
            status: EmailJobStatus::Pending,
            error: None,
            created_at: chrono::Utc::now(),
            processed_at: None,
        };
        self.inner.lock().unwrap().emails.push(job.clone());
        Ok(job)
    }

    async fn fetch_pending(&self, limit: u32) -> Result<Vec<EmailJob>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .emails
            .iter()
            .filter(|j| j.status == EmailJobStatus::Pending)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_sent(&self, job_id: Uuid) -> Result<()> {
        self.transition(job_id, EmailJobStatus::Sent, None)
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str) -> Result<()> {
        self.transition(job_id, EmailJobStatus::Failed, Some(error.to_string()))
    }
}

impl MemoryStore {
    fn transition(
        &self,
        job_id: Uuid,
        status: EmailJobStatus,
        error: Option<String>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let job = inner
            .emails
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| Error::Internal(format!("Unknown email job: {}", job_id)))?;
        job.status = status;
        job.error = error;
        job.processed_at = Some(chrono::Utc::now());
        Ok(())
    }
}
