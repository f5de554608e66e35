//! # Asaas Configuration
//!
//! Configuration management for the Asaas integration.
//! The access token is loaded from environment variables.

use boleto_core::LookupError;
use std::env;
use std::time::Duration;

/// Asaas API configuration
#[derive(Clone)]
pub struct AsaasConfig {
    /// API base URL (e.g., "https://api.asaas.com/v3")
    pub api_base_url: String,

    /// Access token sent in the `access_token` header
    pub access_token: String,

    /// Optional request timeout; `None` leaves the transport default
    pub timeout: Option<Duration>,
}

impl AsaasConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `ASAAS_API_URL`
    /// - `ASAAS_API_TOKEN`
    ///
    /// Optional:
    /// - `ASAAS_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, LookupError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key/value source (env, tests)
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, LookupError> {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| LookupError::Configuration(format!("{key} not set")))
        };

        let api_base_url = required("ASAAS_API_URL")?;
        let access_token = required("ASAAS_API_TOKEN")?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(LookupError::Configuration(
                "ASAAS_API_URL must start with http:// or https://".to_string(),
            ));
        }

        let timeout = match var("ASAAS_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    LookupError::Configuration(format!(
                        "ASAAS_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self::new(api_base_url, access_token).with_timeout(timeout))
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            timeout: None,
        }
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// Check if pointed at the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.api_base_url.contains("sandbox")
    }
}

impl std::fmt::Debug for AsaasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsaasConfig")
            .field("api_base_url", &self.api_base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
