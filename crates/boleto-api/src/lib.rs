//! # boleto-api
//!
//! HTTP API layer for consulta-boletos.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Static Bearer-token authorization
//! - The invoice lookup endpoint and its typed responses
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/consulta-boletos` | Look up open boletos by CPF/CNPJ |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use handlers::LookupResponse;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
