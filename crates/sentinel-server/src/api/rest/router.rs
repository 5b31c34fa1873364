//! Router creation and configuration

use super::extractors::require_session;
use super::handlers::*;
use super::types::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sentinel_sdk::Console;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
///
/// `/health`, `/login` and `/logout` are public. Everything under `/dashboard`,
/// `/audit` and `/rules` needs a session. Other paths, and known paths called
/// with the wrong method, redirect to the dashboard.
pub fn create_router(console: Arc<Console>) -> Router {
    let state = AppState { console };

    let protected = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/transactions", post(submit_transaction))
        .route("/dashboard/transactions/:id", get(get_transaction))
        .route("/dashboard/simulate", post(simulate))
        .route("/audit", get(audit))
        .route("/rules", get(rules))
        .route("/rules/:id/toggle", post(toggle_rule))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health))
        .route("/login", get(login_status).post(login))
        .route("/logout", post(logout))
        .merge(protected)
        .method_not_allowed_fallback(fallback)
        .fallback(fallback)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
