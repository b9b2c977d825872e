//! Blocking HTTP client for the license and config endpoints.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{InstallerError, Result};

use super::types::{ConfigFetchRequest, ConfigFetchResult, LicenseCheckRequest, LicenseCheckResult};

/// License validation endpoint, relative to the API base.
pub const LICENSE_PATH: &str = "/api/license/validate";

/// Config lookup endpoint, relative to the API base.
pub const CONFIG_PATH: &str = "/api/config/by-key";

/// Talks to the hosted service at one API base URL.
///
/// # Example
///
/// ```no_run
/// use knowwhere_installer::api::{new_machine_id, ApiClient};
///
/// let client = ApiClient::new("https://knowwhere-web.vercel.app").unwrap();
/// client.validate_license("my-key", &new_machine_id()).unwrap();
/// let payload = client.fetch_config("my-key").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_base: String,
    attempts: u32,
    client: Client,
}

impl ApiClient {
    /// Create a client for `api_base` that tries each request once.
    pub fn new(api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(InstallerError::RequestFailed)?;
        Ok(Self {
            api_base: api_base.to_string(),
            attempts: 1,
            client,
        })
    }

    /// Retry transport failures up to `attempts` tries in total.
    ///
    /// Decoded responses are never retried, whatever they say.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Total tries per request.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Ask the service whether `api_key` is a valid license.
    ///
    /// The body is decoded whatever the HTTP status, since the service
    /// reports rejections as `{ok: false, reason}` on 4xx/5xx as well.
    pub fn validate_license(&self, api_key: &str, machine_id: &str) -> Result<LicenseCheckResult> {
        let request = LicenseCheckRequest {
            api_key: api_key.to_string(),
            machine_id: machine_id.to_string(),
        };
        let response = self.post_json(LICENSE_PATH, &request)?;
        let result: LicenseCheckResult = decode(response)?;

        if !result.ok {
            return Err(InstallerError::LicenseNotValid {
                reason: result.reason_or_unknown().to_string(),
            });
        }

        tracing::debug!(
            "License accepted (status: {:?}, expires: {:?})",
            result.status,
            result.expires_at
        );
        Ok(result)
    }

    /// Fetch the configuration payload stored for `api_key`.
    ///
    /// Returns `Ok(None)` on HTTP 404 or when the stored payload is empty.
    pub fn fetch_config(&self, api_key: &str) -> Result<Option<String>> {
        let request = ConfigFetchRequest {
            api_key: api_key.to_string(),
        };
        let response = self.post_json(CONFIG_PATH, &request)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("No config stored for this key (HTTP 404)");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(InstallerError::BadResponse {
                message: format!("unexpected HTTP {}", status),
            });
        }

        let result: ConfigFetchResult = decode(response)?;
        tracing::debug!("Config fetched (updated: {:?})", result.updated_at);
        Ok(result.into_payload())
    }

    fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = self.endpoint(path);
        let mut attempt = 1;
        loop {
            tracing::debug!("POST {} (attempt {}/{})", url, attempt, self.attempts);
            match self.client.post(&url).json(body).send() {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.attempts => {
                    tracing::warn!("POST {} failed, retrying: {}", url, e);
                    attempt += 1;
                }
                Err(e) => return Err(InstallerError::RequestFailed(e)),
            }
        }
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().map_err(InstallerError::RequestFailed)?;
    serde_json::from_str(&body).map_err(|e| InstallerError::BadResponse {
        message: format!("{} (HTTP {})", e, status.as_u16()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url()).unwrap()
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(
            client.endpoint(LICENSE_PATH),
            "http://localhost:3000/api/license/validate"
        );
    }

    #[test]
    fn attempts_default_to_one_and_never_zero() {
        let client = ApiClient::new("http://localhost").unwrap();
        assert_eq!(client.attempts(), 1);
        assert_eq!(client.with_attempts(0).attempts(), 1);
    }

    #[test]
    fn validate_posts_key_and_machine_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(LICENSE_PATH)
                .header("content-type", "application/json")
                .body_includes(r#""apiKey":"abc""#)
                .body_includes(r#""machineId":"m-123""#);
            then.status(200)
                .body(r#"{"ok":true,"expiresAt":null,"status":"active"}"#);
        });

        let result = client_for(&server).validate_license("abc", "m-123").unwrap();

        mock.assert();
        assert!(result.ok);
        assert_eq!(result.status.as_deref(), Some("active"));
    }

    #[test]
    fn validate_rejection_carries_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(LICENSE_PATH);
            then.status(200).body(r#"{"ok":false,"reason":"expired"}"#);
        });

        let err = client_for(&server).validate_license("abc", "m").unwrap_err();

        assert_eq!(err.to_string(), "license not valid: expired");
    }

    #[test]
    fn validate_decodes_error_status_bodies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(LICENSE_PATH);
            then.status(400).body(r#"{"ok":false,"reason":"missing_api_key"}"#);
        });

        let err = client_for(&server).validate_license("abc", "m").unwrap_err();

        assert!(matches!(
            err,
            InstallerError::LicenseNotValid { ref reason } if reason == "missing_api_key"
        ));
    }

    #[test]
    fn validate_malformed_body_is_bad_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(LICENSE_PATH);
            then.status(500).body("Internal Server Error");
        });

        let err = client_for(&server).validate_license("abc", "m").unwrap_err();

        assert!(matches!(err, InstallerError::BadResponse { .. }));
        assert!(err.to_string().starts_with("bad response: "));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn unreachable_service_is_request_failed() {
        // Port 9 (discard) on localhost is assumed closed.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.validate_license("abc", "m").unwrap_err();
        assert!(matches!(err, InstallerError::RequestFailed(_)));
        assert!(err.to_string().starts_with("request failed: "));
    }

    #[test]
    fn fetch_returns_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(CONFIG_PATH)
                .body_includes(r#""apiKey":"abc""#);
            then.status(200)
                .body(r#"{"config":"DB_URL=postgres://x\n","updatedAt":"2025-05-01T00:00:00Z"}"#);
        });

        let payload = client_for(&server).fetch_config("abc").unwrap();

        mock.assert();
        assert_eq!(payload.as_deref(), Some("DB_URL=postgres://x\n"));
    }

    #[test]
    fn fetch_404_is_no_config() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(CONFIG_PATH);
            then.status(404).body("Not Found");
        });

        assert_eq!(client_for(&server).fetch_config("abc").unwrap(), None);
    }

    #[test]
    fn fetch_null_config_is_no_config() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(CONFIG_PATH);
            then.status(200).body(r#"{"config":null}"#);
        });

        assert_eq!(client_for(&server).fetch_config("abc").unwrap(), None);
    }

    #[test]
    fn fetch_server_error_is_bad_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(CONFIG_PATH);
            then.status(500).body(r#"{"error":"failed_to_fetch_config"}"#);
        });

        let err = client_for(&server).fetch_config("abc").unwrap_err();

        assert!(matches!(err, InstallerError::BadResponse { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn fetch_malformed_body_is_bad_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(CONFIG_PATH);
            then.status(200).body("<html>");
        });

        let err = client_for(&server).fetch_config("abc").unwrap_err();

        assert!(matches!(err, InstallerError::BadResponse { .. }));
    }

    #[test]
    fn decoded_responses_are_not_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path(LICENSE_PATH);
            then.status(200).body(r#"{"ok":false,"reason":"inactive"}"#);
        });

        let client = client_for(&server).with_attempts(3);
        assert!(client.validate_license("abc", "m").is_err());

        mock.assert();
    }
}
