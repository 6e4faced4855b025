//! Tour domain types
//!
//! A tour belongs to exactly one tenant and is uniquely identified within
//! that tenant by `(tenant_id, slug)`. Slugs may collide across tenants.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::tenant::TenantId;

/// Unique identifier for a tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TourId(Uuid);

impl TourId {
    /// Create a new random tour ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a tour ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TourId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable tour offered by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub tenant_id: TenantId,
    /// URL-safe identifier, unique within the tenant
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Price in minor units of `currency`
    pub price_cents: i64,
    /// ISO 4217 alpha code, e.g. "EUR"
    pub currency: String,
    pub duration_days: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Input for creating a tour.
///
/// Carries the owning tenant; the store associates the new row with that
/// tenant atomically with creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTour {
    pub tenant_id: TenantId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
}

/// Partial update for a tour. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub duration_days: Option<i32>,
}

impl TourPatch {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.currency.is_none()
            && self.duration_days.is_none()
    }
}
