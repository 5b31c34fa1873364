//! API endpoint handlers

use super::extractors::{CurrentUser, JsonExtractor};
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use sentinel_sdk::{AuditFilter, DetectionRule, ManualTransaction, StatusFilter, Transaction};
use tracing::info;

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        classifier: state.console.classifier_name().to_string(),
    })
}

pub(super) async fn login_status(State(state): State<AppState>) -> Json<LoginStatus> {
    let user = state.console.session().current_user().await;
    Json(LoginStatus {
        authenticated: user.is_some(),
        user,
    })
}

pub(super) async fn login(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let session = state.console.session();
    if !session.login(&payload.email, &payload.password).await? {
        return Err(ServerError::Unauthorized("Invalid email or password".to_string()));
    }

    let user = session
        .current_user()
        .await
        .ok_or_else(|| ServerError::InternalError("session lost after login".to_string()))?;
    Ok(Json(LoginResponse { user }))
}

pub(super) async fn logout(State(state): State<AppState>) -> Result<StatusCode, ServerError> {
    state.console.session().logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<DashboardResponse> {
    let console = &state.console;
    Json(DashboardResponse {
        user,
        summary: console.summary().await,
        transactions: console.transactions().await,
    })
}

/// Manual transaction form; analysis continues after the response
pub(super) async fn submit_transaction(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<ManualTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let tx = state.console.submit(payload).await?;
    info!(id = %tx.id, amount = tx.amount, "Manual transaction submitted");
    Ok((StatusCode::ACCEPTED, Json(tx)))
}

pub(super) async fn simulate(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<SimulateRequest>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let tx = state.console.generate_and_dispatch(payload.safe).await?;
    Ok((StatusCode::ACCEPTED, Json(tx)))
}

pub(super) async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    state
        .console
        .transaction(&id)
        .await
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("transaction {}", id)))
}

pub(super) async fn audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, ServerError> {
    let status: StatusFilter = query
        .status
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(|e: sentinel_core::CoreError| ServerError::InvalidRequest(e.to_string()))?;
    let filter = AuditFilter::new(query.search.unwrap_or_default(), status);

    Ok(Json(AuditResponse {
        transactions: state.console.audit(&filter).await,
        stats: state.console.stats().await,
    }))
}

pub(super) async fn rules(State(state): State<AppState>) -> Json<RulesResponse> {
    let catalog = state.console.catalog();
    Json(RulesResponse {
        rules: catalog.rules().await,
        models: catalog.models().to_vec(),
    })
}

pub(super) async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetectionRule>, ServerError> {
    let rule = state.console.catalog().toggle_rule(&id).await?;
    Ok(Json(rule))
}

/// Unknown paths land on the dashboard
pub(super) async fn fallback() -> impl IntoResponse {
    Redirect::to("/dashboard")
}
