//! Client for the hosted license and configuration service.
//!
//! - [`types`] - Request and response bodies for both endpoints
//! - [`client`] - Blocking HTTP client: license validation and config fetch

pub mod client;
pub mod types;

pub use client::{ApiClient, CONFIG_PATH, LICENSE_PATH};
pub use types::{
    new_machine_id, ConfigFetchRequest, ConfigFetchResult, LicenseCheckRequest,
    LicenseCheckResult,
};
