//! PostgresStore - store trait implementations backed by PostgreSQL
//!
//! Every tenant-scoped statement carries `tenant_id` in its match condition.
//! That single rule is what enforces the isolation contract at this layer;
//! the compound indexes below exist to keep those scoped queries cheap.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::PostgresStoreConfig;
use tourbase_core::{
    audit::{AuditEntry, NewAuditEntry},
    email::{EmailJob, EmailJobStatus, EmailMessage},
    store::{AuditStore, EmailStore, TenantStore},
    tenant::{Tenant, TenantId},
    tour::{NewTour, Tour, TourId, TourPatch},
    Error, Result,
};

/// PostgreSQL-backed store for tenants, tours, audit entries, and email jobs.
#[derive(Clone)]
pub struct PostgresStore {
    /// PostgreSQL connection pool
    pool: Arc<PgPool>,
}

impl PostgresStore {
    /// Create a new store with default pool configuration.
    ///
    /// # Errors
    /// - `Error::Database` if connection or schema migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_config(database_url, PostgresStoreConfig::default()).await
    }

    /// Create a new store with custom pool configuration.
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    /// * `config` - Connection pool configuration
    ///
    /// # Errors
    /// - `Error::Database` if connection or schema migration fails
    pub async fn with_config(database_url: &str, config: PostgresStoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(Some(config.max_lifetime))
            .connect(database_url)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

        let store = Self {
            pool: Arc::new(pool),
        };

        store.run_migrations().await?;

        Ok(store)
    }

    /// Create from an existing pool (useful for testing)
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Run database schema migrations
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tenants (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                custom_domain TEXT UNIQUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create tenants table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tours (
                id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL REFERENCES tenants(id),
                slug TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                price_cents BIGINT NOT NULL,
                currency TEXT NOT NULL,
                duration_days INTEGER NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                UNIQUE (tenant_id, slug)
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create tours table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_tours_tenant_time
            ON tours(tenant_id, created_at DESC)
            "#,
        )
        .execute(&*self.pool)
        .await
        .ok();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS audit_log (
                id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL,
                user_id UUID,
                action TEXT NOT NULL,
                entity_type TEXT NOT NULL,
                entity_id TEXT NOT NULL,
                before_state JSONB,
                after_state JSONB,
                ip_address TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create audit_log table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_audit_tenant_time
            ON audit_log(tenant_id, created_at DESC)
            "#,
        )
        .execute(&*self.pool)
        .await
        .ok();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS email_jobs (
                id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL,
                recipient TEXT NOT NULL,
                subject TEXT NOT NULL,
                html_body TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                error TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                processed_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create email_jobs table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_email_jobs_pending
            ON email_jobs(status, created_at)
            "#,
        )
        .execute(&*self.pool)
        .await
        .ok();

        Ok(())
    }
}

fn tenant_from_row(row: &PgRow) -> Result<Tenant> {
    Ok(Tenant {
        id: TenantId::from_uuid(get(row, "id")?),
        name: get(row, "name")?,
        slug: get(row, "slug")?,
        custom_domain: get(row, "custom_domain")?,
        created_at: get(row, "created_at")?,
    })
}

fn tour_from_row(row: &PgRow) -> Result<Tour> {
    Ok(Tour {
        id: TourId::from_uuid(get(row, "id")?),
        tenant_id: TenantId::from_uuid(get(row, "tenant_id")?),
        slug: get(row, "slug")?,
        title: get(row, "title")?,
        description: get(row, "description")?,
        price_cents: get(row, "price_cents")?,
        currency: get(row, "currency")?,
        duration_days: get(row, "duration_days")?,
        created_at: get(row, "created_at")?,
        updated_at: get(row, "updated_at")?,
    })
}

fn audit_from_row(row: &PgRow) -> Result<AuditEntry> {
    Ok(AuditEntry {
        id: get(row, "id")?,
        tenant_id: TenantId::from_uuid(get(row, "tenant_id")?),
        user_id: get(row, "user_id")?,
        action: get(row, "action")?,
        entity_type: get(row, "entity_type")?,
        entity_id: get(row, "entity_id")?,
        before: get(row, "before_state")?,
        after: get(row, "after_state")?,
        ip_address: get(row, "ip_address")?,
        created_at: get(row, "created_at")?,
    })
}

fn email_job_from_row(row: &PgRow) -> Result<EmailJob> {
    let status: String = get(row, "status")?;
    Ok(EmailJob {
        id: get(row, "id")?,
        tenant_id: TenantId::from_uuid(get(row, "tenant_id")?),
        recipient: get(row, "recipient")?,
        message: EmailMessage {
            subject: get(row, "subject")?,
            html_body: get(row, "html_body")?,
        },
        status: status.parse()?,
        error: get(row, "error")?,
        created_at: get(row, "created_at")?,
        processed_at: get(row, "processed_at")?,
    })
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| Error::Database(format!("Failed to read column '{}': {}", column, e)))
}

#[async_trait]
impl TenantStore for PostgresStore {
    async fn get_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, slug, custom_domain, created_at
            FROM tenants
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to fetch tenant by slug: {}", e)))?;

        row.as_ref().map(tenant_from_row).transpose()
    }

    async fn get_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, slug, custom_domain, created_at
            FROM tenants
            WHERE custom_domain = $1
            "#,
        )
        .bind(domain)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to fetch tenant by domain: {}", e)))?;

        row.as_ref().map(tenant_from_row).transpose()
    }

    async fn get_tours(&self, tenant_id: TenantId) -> Result<Vec<Tour>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, slug, title, description, price_cents,
                   currency, duration_days, created_at, updated_at
            FROM tours
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to list tours: {}", e)))?;

        rows.iter().map(tour_from_row).collect()
    }

    async fn get_tour_by_slug(&self, tenant_id: TenantId, slug: &str) -> Result<Option<Tour>> {
        let row = sqlx::query(
            r#"
            SELECT id, tenant_id, slug, title, description, price_cents,
                   currency, duration_days, created_at, updated_at
            FROM tours
            WHERE tenant_id = $1 AND slug = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(slug)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to fetch tour by slug: {}", e)))?;

        row.as_ref().map(tour_from_row).transpose()
    }

    async fn get_tour(&self, tenant_id: TenantId, tour_id: TourId) -> Result<Option<Tour>> {
        let row = sqlx::query(
            r#"
            SELECT id, tenant_id, slug, title, description, price_cents,
                   currency, duration_days, created_at, updated_at
            FROM tours
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(tour_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to fetch tour: {}", e)))?;

        row.as_ref().map(tour_from_row).transpose()
    }

    async fn create_tour(&self, input: NewTour) -> Result<Tour> {
        let id = TourId::new();
        let row = sqlx::query(
            r#"
            INSERT INTO tours (
                id, tenant_id, slug, title, description,
                price_cents, currency, duration_days
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, tenant_id, slug, title, description, price_cents,
                      currency, duration_days, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(input.tenant_id.as_uuid())
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price_cents)
        .bind(&input.currency)
        .bind(input.duration_days)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create tour: {}", e)))?;

        tour_from_row(&row)
    }

    async fn update_tour(
        &self,
        tenant_id: TenantId,
        tour_id: TourId,
        patch: TourPatch,
    ) -> Result<Option<Tour>> {
        // Both keys in the WHERE clause: a cross-tenant id is "not found",
        // never an update of the wrong row.
        let row = sqlx::query(
            r#"
            UPDATE tours SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price_cents = COALESCE($5, price_cents),
                currency = COALESCE($6, currency),
                duration_days = COALESCE($7, duration_days),
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING id, tenant_id, slug, title, description, price_cents,
                      currency, duration_days, created_at, updated_at
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(tour_id.as_uuid())
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.price_cents)
        .bind(&patch.currency)
        .bind(patch.duration_days)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to update tour: {}", e)))?;

        row.as_ref().map(tour_from_row).transpose()
    }
}

#[async_trait]
impl AuditStore for PostgresStore {
    async fn log_action(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
            INSERT INTO audit_log (
                id, tenant_id, user_id, action, entity_type, entity_id,
                before_state, after_state, ip_address
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, tenant_id, user_id, action, entity_type, entity_id,
                      before_state, after_state, ip_address, created_at
            "#,
        )
        .bind(id)
        .bind(entry.tenant_id.as_uuid())
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.before)
        .bind(&entry.after)
        .bind(&entry.ip_address)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to append audit entry: {}", e)))?;

        audit_from_row(&row)
    }

    async fn get_entries(&self, tenant_id: TenantId, limit: u32) -> Result<Vec<AuditEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, user_id, action, entity_type, entity_id,
                   before_state, after_state, ip_address, created_at
            FROM audit_log
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(i64::from(limit))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to list audit entries: {}", e)))?;

        rows.iter().map(audit_from_row).collect()
    }
}

#[async_trait]
impl EmailStore for PostgresStore {
    async fn enqueue(
        &self,
        tenant_id: TenantId,
        recipient: &str,
        message: EmailMessage,
    ) -> Result<EmailJob> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
            INSERT INTO email_jobs (id, tenant_id, recipient, subject, html_body, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING id, tenant_id, recipient, subject, html_body, status,
                      error, created_at, processed_at
            "#,
        )
        .bind(id)
        .bind(tenant_id.as_uuid())
        .bind(recipient)
        .bind(&message.subject)
        .bind(&message.html_body)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to enqueue email: {}", e)))?;

        email_job_from_row(&row)
    }

    async fn fetch_pending(&self, limit: u32) -> Result<Vec<EmailJob>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, recipient, subject, html_body, status,
                   error, created_at, processed_at
            FROM email_jobs
            WHERE status = 'pending'
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to fetch pending emails: {}", e)))?;

        rows.iter().map(email_job_from_row).collect()
    }

    async fn mark_sent(&self, job_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE email_jobs
            SET status = 'sent', error = NULL, processed_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to mark email sent: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(Error::Internal(format!("Unknown email job: {}", job_id)));
        }
        Ok(())
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE email_jobs
            SET status = 'failed', error = $2, processed_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(error)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to mark email failed: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(Error::Internal(format!("Unknown email job: {}", job_id)));
        }
        Ok(())
    }
}
