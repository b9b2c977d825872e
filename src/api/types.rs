//! Wire types for the license and config endpoints.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Generate a fresh machine identifier.
///
/// A random UUIDv4 in hyphenated form (36 characters). A new one is made for
/// every run and never written anywhere.
pub fn new_machine_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Body of `POST /api/license/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCheckRequest {
    pub api_key: String,
    pub machine_id: String,
}

/// Response of `POST /api/license/validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCheckResult {
    pub ok: bool,
    /// Why the key was rejected; present only when `ok` is false.
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl LicenseCheckResult {
    /// Rejection reason, or `"unknown"` when the service gave none.
    pub fn reason_or_unknown(&self) -> &str {
        self.reason.as_deref().unwrap_or("unknown")
    }
}

/// Body of `POST /api/config/by-key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFetchRequest {
    pub api_key: String,
}

/// Response of `POST /api/config/by-key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFetchResult {
    /// Opaque payload destined for `.env`; null or empty means none stored.
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ConfigFetchResult {
    /// The payload, if one is stored and non-empty.
    pub fn into_payload(self) -> Option<String> {
        self.config.filter(|c| !c.is_empty())
    }
}
