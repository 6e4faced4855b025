//! Audit log types
//!
//! Audit entries record who changed what, when, with optional before/after
//! snapshots. Entries are append-only: there is no update or delete API, and
//! stores must never expose one. Completeness is a compliance property, so
//! write failures propagate to the caller instead of being swallowed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tenant::TenantId;

/// Input for appending an audit entry.
///
/// `before`/`after` accept arbitrary nested JSON-compatible snapshots and are
/// stored verbatim, without schema validation or truncation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditEntry {
    pub tenant_id: TenantId,
    /// Acting user, when the change was user-initiated
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Action name, e.g. "tour.update"
    pub action: String,
    /// Entity type, e.g. "tour"
    pub entity_type: String,
    pub entity_id: String,
    #[serde(default)]
    pub before: Option<serde_json::Value>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
    /// Client IP as reported by the request infrastructure
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl NewAuditEntry {
    /// Create an entry with the required fields; optional fields via builders
    pub fn new(
        tenant_id: TenantId,
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            user_id: None,
            action: action.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            before: None,
            after: None,
            ip_address: None,
        }
    }

    /// Set the acting user
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Attach a before-state snapshot
    pub fn with_before(mut self, before: serde_json::Value) -> Self {
        self.before = Some(before);
        self
    }

    /// Attach an after-state snapshot
    pub fn with_after(mut self, after: serde_json::Value) -> Self {
        self.after = Some(after);
        self
    }

    /// Set the client IP
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}

/// A persisted, immutable audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_optional_fields() {
        let tenant_id = TenantId::new();
        let user = Uuid::new_v4();

        let entry = NewAuditEntry::new(tenant_id, "tour.update", "tour", "t-1")
            .with_user(user)
            .with_before(serde_json::json!({"title": "Old"}))
            .with_after(serde_json::json!({"title": "New"}))
            .with_ip("203.0.113.9");

        assert_eq!(entry.user_id, Some(user));
        assert_eq!(entry.before.unwrap()["title"], "Old");
        assert_eq!(entry.after.unwrap()["title"], "New");
        assert_eq!(entry.ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_nested_snapshots_survive_serde() {
        let entry = NewAuditEntry::new(TenantId::new(), "tour.create", "tour", "t-2")
            .with_after(serde_json::json!({"pricing": {"tiers": [1, 2, 3]}}));

        let json = serde_json::to_string(&entry).unwrap();
        let back: NewAuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.after.unwrap()["pricing"]["tiers"][2], 3);
    }
}
