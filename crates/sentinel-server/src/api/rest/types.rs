//! REST API type definitions

use sentinel_sdk::{
    AuditStats, Console, DashboardSummary, DetectionRule, ModelDescriptor, Transaction, User,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub console: Arc<Console>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub classifier: String,
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

/// What the login page needs to know
#[derive(Debug, Serialize)]
pub struct LoginStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Dashboard view: headline figures plus the live transaction list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: User,
    pub summary: DashboardSummary,
    pub transactions: Vec<Transaction>,
}

/// Simulate button; `safe` forces an ordinary transaction
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimulateRequest {
    pub safe: bool,
}

/// Audit page query string
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuditQuery {
    pub search: Option<String>,
    /// `all` or a transaction status
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub transactions: Vec<Transaction>,
    pub stats: AuditStats,
}

#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub rules: Vec<DetectionRule>,
    pub models: Vec<ModelDescriptor>,
}
