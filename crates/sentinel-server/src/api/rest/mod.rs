//! REST API implementation
//!
//! - types: request/response payloads and shared state
//! - extractors: JSON body and signed-in user extractors, session gate
//! - handlers: one handler per route
//! - router: route table and layers
//! - tests: unit tests for payload shapes

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::{CurrentUser, JsonExtractor};
pub use router::create_router;
pub use types::{
    AppState, AuditQuery, AuditResponse, DashboardResponse, HealthResponse, LoginRequest,
    LoginResponse, LoginStatus, RulesResponse, SimulateRequest,
};
