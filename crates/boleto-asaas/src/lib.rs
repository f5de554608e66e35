//! # boleto-asaas
//!
//! Asaas billing provider for consulta-boletos.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use boleto_asaas::AsaasClient;
//! use boleto_core::lookup_invoices;
//!
//! // ASAAS_API_URL and ASAAS_API_TOKEN must be set
//! let client = AsaasClient::from_env()?;
//! let outcome = lookup_invoices(&client, "24971563792").await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::{AsaasClient, OPEN_PAYMENT_STATUSES};
pub use config::AsaasConfig;
