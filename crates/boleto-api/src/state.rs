//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the billing provider and the immutable startup configuration.

use anyhow::Context;
use boleto_asaas::AsaasClient;
use boleto_core::SharedBillingProvider;
use std::sync::Arc;
use tracing::info;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3002;

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Bearer secret inbound callers must present
    pub api_secret_token: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (env, tests)
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_secret_token = var("API_SECRET_TOKEN")
            .filter(|v| !v.is_empty())
            .context("API_SECRET_TOKEN not set")?;

        let port = match var("PORT").filter(|p| !p.trim().is_empty()) {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {p:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            api_secret_token,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("api_secret_token", &"<redacted>")
            .finish()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Billing provider (Asaas in production, stubs in tests)
    pub provider: SharedBillingProvider,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState backed by the Asaas API
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let asaas = AsaasClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Asaas client: {}", e))?;
        info!(
            base_url = %asaas.config().api_base_url,
            sandbox = asaas.config().is_sandbox(),
            "Asaas client ready"
        );

        Ok(Self::with_provider(config, Arc::new(asaas)))
    }

    /// Create state around an explicit provider
    pub fn with_provider(config: AppConfig, provider: SharedBillingProvider) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }
}
