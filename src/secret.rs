//! Wire models returned by the OneTimeSecret API.
//!
//! Every `SecretRecord` field is optional: different endpoints populate
//! different subsets, and a field the server omits must stay distinguishable
//! from a real zero TTL or an empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A secret (or its metadata) as returned by share, generate, retrieve,
/// metadata and burn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// The account the secret belongs to.
    #[serde(rename = "custid", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Private key for metadata lookups and burning. Do not share it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_key: Option<String>,

    /// Shareable key that allows a single retrieval of the secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// The secret itself. Only present on retrieve and generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Lifecycle state, e.g. "new", "viewed" or "burned".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Obfuscated addresses the secret was sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Vec<String>>,

    /// TTL requested at creation, in seconds. Not the remaining time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    /// Seconds left before the metadata is destroyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_ttl: Option<i64>,

    /// Seconds left before the secret is destroyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ttl: Option<i64>,

    /// Creation time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Last update time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase_required: Option<bool>,
}

/// Records returned by the recent-metadata listing, in server order.
pub type SecretRecordList = Vec<SecretRecord>;

impl SecretRecord {
    /// Creation time as a UTC timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Last update time as a UTC timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Render the record as indented JSON, omitting absent fields.
    pub fn pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Body of the `status` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Availability classification, "nominal" when all is well.
    /// `None` when the server omits it or sends `null`.
    #[serde(default)]
    pub status: Option<String>,
}

impl Health {
    const OFFLINE: &'static str = "offline";

    /// True only for the exact "offline" classification.
    pub fn is_offline(&self) -> bool {
        self.status.as_deref() == Some(Self::OFFLINE)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
