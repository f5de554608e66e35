//! # Routes
//!
//! Axum router configuration for the invoice lookup API.

use crate::auth;
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET  /health - Liveness (no auth)
/// - POST /api/consulta-boletos - Invoice lookup (Bearer auth)
pub fn create_router(state: AppState) -> Router {
    // Auth runs before the handler reads the body
    let api_routes = Router::new()
        .route("/consulta-boletos", post(handlers::consulta_boletos))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        // Middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // State
        .with_state(state)
}
