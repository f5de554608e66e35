//! # consulta-boletos
//!
//! Authenticated lookup of a customer's open boletos at Asaas.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export ASAAS_API_URL=https://sandbox.asaas.com/api/v3
//! export ASAAS_API_TOKEN=$aact_...
//! export API_SECRET_TOKEN=...
//!
//! # Run the server
//! consulta-boletos
//! ```

use boleto_api::{routes, state::AppState};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Missing required configuration stops startup here
    let state = AppState::new().map_err(|e| {
        error!("Required environment variables are not set: {:#}", e);
        e
    })?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Billing provider: {}", state.provider.provider_name());

    let app = routes::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("consulta-boletos v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !state.config.is_production() {
        info!("Lookup: POST http://{}/api/consulta-boletos", addr);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
