//! Tourbase Server
//!
//! Multi-tenant tour operator platform backend:
//! - Tenant-scoped tour data API under /api/tenants/{slug}
//! - Scheduler-triggered email queue drain on /api/cron/emails
//! - Locale-prefix routing for public pages
//! - robots.txt / sitemap.xml discovery documents
//!
//! Usage:
//! ```bash
//! # With config file
//! tourbase-server --config config.yaml
//!
//! # Or with environment variables
//! DATABASE_URL=postgres://localhost/tourbase CRON_SECRET=... tourbase-server
//!
//! # With both (env vars override config)
//! CRON_SECRET=... tourbase-server --config config.yaml
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tourbase_core::store::{AuditStore, EmailStore, TenantStore};
use tourbase_mailer::{EmailProcessor, LogMailer};
use tourbase_server::{router, AppState, ServerConfig};
use tourbase_store_memory::MemoryStore;
use tourbase_store_postgres::PostgresStore;

/// Tourbase Server - multi-tenant tour operator platform
#[derive(Parser)]
#[command(name = "tourbase-server")]
#[command(about = "Tourbase backend server", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "TOURBASE_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?,
        None => ServerConfig::default(),
    };
    config.merge_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // One store per process lifetime, injected everywhere; no ambient
    // global client.
    let (tenant_store, audit_store, email_store): (
        Arc<dyn TenantStore>,
        Arc<dyn AuditStore>,
        Arc<dyn EmailStore>,
    ) = if config.database_url.is_empty() {
        warn!("DATABASE_URL is not set; using in-memory stores (data is not persisted)");
        let store = Arc::new(MemoryStore::new());
        (store.clone(), store.clone(), store)
    } else {
        let store = Arc::new(PostgresStore::new(&config.database_url).await?);
        info!("Connected to PostgreSQL");
        (store.clone(), store.clone(), store)
    };

    if config.cron_secret.is_empty() {
        warn!("CRON_SECRET is not set; /api/cron/emails will reject all requests");
    }

    let mailer = Arc::new(LogMailer::new());
    let email_processor = Arc::new(EmailProcessor::new(email_store, mailer));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(tenant_store, audit_store, email_processor, config);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Tourbase server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
