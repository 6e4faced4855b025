//! PostgreSQL store implementations
//!
//! Production persistence for tenants, tours, the audit log, and the email
//! queue. One [`PostgresStore`] (one `PgPool`) is constructed per process by
//! the composition root and injected wherever a store trait is needed; there
//! is no ambient global client.
//!
//! # Example
//! ```no_run
//! # use tourbase_store_postgres::{PostgresStore, PostgresStoreConfig};
//! # async fn example() -> tourbase_core::Result<()> {
//! let config = PostgresStoreConfig::default().with_max_connections(32);
//! let store = PostgresStore::with_config("postgres://localhost/tourbase", config).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod postgres_store;

pub use config::PostgresStoreConfig;
pub use postgres_store::PostgresStore;
