//! Application state with dependency-injected stores
//!
//! The composition root (`main`) constructs the stores once per process and
//! hands them to `AppState`; handlers reach them through Axum's state
//! extractor. There is no ambient global client anywhere in the tree.

use std::sync::Arc;

use tourbase_core::store::{AuditStore, TenantStore};
use tourbase_mailer::EmailProcessor;

use crate::config::ServerConfig;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    tenant_store: Arc<dyn TenantStore>,
    audit_store: Arc<dyn AuditStore>,
    email_processor: Arc<EmailProcessor>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        tenant_store: Arc<dyn TenantStore>,
        audit_store: Arc<dyn AuditStore>,
        email_processor: Arc<EmailProcessor>,
        config: ServerConfig,
    ) -> Self {
        Self {
            tenant_store,
            audit_store,
            email_processor,
            config: Arc::new(config),
        }
    }

    pub fn tenant_store(&self) -> &Arc<dyn TenantStore> {
        &self.tenant_store
    }

    pub fn audit_store(&self) -> &Arc<dyn AuditStore> {
        &self.audit_store
    }

    pub fn email_processor(&self) -> &Arc<EmailProcessor> {
        &self.email_processor
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
