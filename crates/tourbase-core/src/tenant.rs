//! Tenant types for multi-tenant isolation
//!
//! Every domain entity in Tourbase is partitioned by a [`TenantId`]. Tenants
//! themselves are created out of band (provisioning is not part of this core)
//! and are read-only here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Unique identifier for a tenant.
///
/// Every tenant-scoped store operation takes a `TenantId` and includes it in
/// its match condition, which is what makes cross-tenant reads and writes
/// impossible through the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Create a new random tenant ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a tenant ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a tenant ID from a string
    pub fn from_string(s: &str) -> Result<Self> {
        let uuid = Uuid::parse_str(s)
            .map_err(|e| Error::InvalidTenant(format!("Invalid tenant ID format: {}", e)))?;
        Ok(Self(uuid))
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

/// A tour operator account.
///
/// Resolved by slug (path-based routing) or by custom domain (white-label
/// deployments). The root of isolation for all other entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    /// URL-safe identifier, globally unique
    pub slug: String,
    /// Optional white-label domain, globally unique when set
    pub custom_domain: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_creation() {
        let id1 = TenantId::new();
        let id2 = TenantId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_tenant_id_from_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let tenant_id = TenantId::from_string(uuid_str).unwrap();
        assert_eq!(tenant_id.to_string(), uuid_str);
    }

    #[test]
    fn test_tenant_id_invalid_string() {
        let result = TenantId::from_string("not-a-uuid");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::InvalidTenant(_)));
    }

    #[test]
    fn test_tenant_serde_round_trip() {
        let tenant = Tenant {
            id: TenantId::new(),
            name: "Alpine Adventures".to_string(),
            slug: "alpine-adventures".to_string(),
            custom_domain: Some("tours.alpine.example".to_string()),
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&tenant).unwrap();
        let back: Tenant = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, tenant.id);
        assert_eq!(back.slug, "alpine-adventures");
    }
}
