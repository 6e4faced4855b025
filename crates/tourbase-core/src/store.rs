//! Store traits for tenant-scoped persistence
//!
//! These traits abstract over the storage engine, allowing different
//! implementations for production (PostgreSQL) and tests/local development
//! (in-memory). Implementations must uphold the isolation contract: every
//! tenant-scoped operation includes the tenant ID in its match condition, so
//! no cross-tenant read or write is possible through this interface.
//!
//! Not-found is not an error anywhere in these traits: lookups return
//! `Ok(None)` and leave the 404-versus-fallback decision to the caller.

use async_trait::async_trait;
use uuid::Uuid;

use crate::audit::{AuditEntry, NewAuditEntry};
use crate::email::{EmailJob, EmailMessage};
use crate::tenant::{Tenant, TenantId};
use crate::tour::{NewTour, Tour, TourId, TourPatch};
use crate::Result;

/// Tenant and tour persistence.
///
/// # Example
/// ```no_run
/// # use tourbase_core::store::TenantStore;
/// # use tourbase_core::tenant::TenantId;
/// # async fn example(store: &dyn TenantStore) -> tourbase_core::Result<()> {
/// let tenant = store.get_tenant_by_slug("alpine-adventures").await?;
/// if let Some(tenant) = tenant {
///     let tours = store.get_tours(tenant.id).await?;
///     println!("{} tours", tours.len());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Look up a tenant by slug.
    ///
    /// Pure lookup, no side effects. Returns `Ok(None)` when no tenant
    /// matches.
    async fn get_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>>;

    /// Look up a tenant by custom domain.
    ///
    /// Returns `Ok(None)` when no tenant has claimed the domain.
    async fn get_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>>;

    /// List a tenant's tours, newest first by creation time.
    async fn get_tours(&self, tenant_id: TenantId) -> Result<Vec<Tour>>;

    /// Look up a tour by its compound key `(tenant_id, slug)`.
    ///
    /// Must never match a tour belonging to another tenant, even when the
    /// slug string collides globally.
    async fn get_tour_by_slug(&self, tenant_id: TenantId, slug: &str) -> Result<Option<Tour>>;

    /// Look up a tour by `(tenant_id, tour_id)`.
    ///
    /// Same isolation rule as the slug lookup: another tenant's tour ID is
    /// `Ok(None)`.
    async fn get_tour(&self, tenant_id: TenantId, tour_id: TourId) -> Result<Option<Tour>>;

    /// Create a tour, associating it with `input.tenant_id` atomically.
    ///
    /// # Errors
    /// - `Error::Database` on persistence failure (including a duplicate
    ///   `(tenant_id, slug)` pair)
    async fn create_tour(&self, input: NewTour) -> Result<Tour>;

    /// Apply a partial update to a tour.
    ///
    /// The match condition includes BOTH `tour_id` and `tenant_id`: an
    /// attempt to update another tenant's tour returns `Ok(None)` and leaves
    /// that tour unmodified. This is the anti-leakage guarantee and must be
    /// preserved regardless of storage engine.
    async fn update_tour(
        &self,
        tenant_id: TenantId,
        tour_id: TourId,
        patch: TourPatch,
    ) -> Result<Option<Tour>>;
}

/// Append-only audit log persistence.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one audit entry.
    ///
    /// # Errors
    /// - `Error::Database` on persistence failure. Callers must not swallow
    ///   this: a silently dropped audit record breaks the compliance trail.
    async fn log_action(&self, entry: NewAuditEntry) -> Result<AuditEntry>;

    /// List a tenant's audit entries, newest first, up to `limit`.
    async fn get_entries(&self, tenant_id: TenantId, limit: u32) -> Result<Vec<AuditEntry>>;
}

/// Outbound email queue state.
///
/// The drain path (`fetch_pending` → deliver → `mark_sent`/`mark_failed`) is
/// driven by the email processor; see `tourbase-mailer`.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// Queue a rendered email for delivery.
    async fn enqueue(
        &self,
        tenant_id: TenantId,
        recipient: &str,
        message: EmailMessage,
    ) -> Result<EmailJob>;

    /// Fetch up to `limit` pending jobs, oldest first.
    ///
    /// An empty queue returns an empty vec; draining it is a no-op.
    async fn fetch_pending(&self, limit: u32) -> Result<Vec<EmailJob>>;

    /// Mark a job as delivered.
    async fn mark_sent(&self, job_id: Uuid) -> Result<()>;

    /// Mark a job as failed, recording the delivery error.
    async fn mark_failed(&self, job_id: Uuid, error: &str) -> Result<()>;
}
