//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sentinel_runtime::RuntimeError;
use sentinel_sdk::SdkError;
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Invalid request
    InvalidRequest(String),

    /// Credentials rejected
    Unauthorized(String),

    /// Not found
    NotFound(String),

    /// Request conflicts with the transaction's current status
    Conflict(String),

    /// Internal server error
    InternalError(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServerError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::Unauthorized(msg)
            | ServerError::NotFound(msg)
            | ServerError::Conflict(msg)
            | ServerError::InternalError(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<RuntimeError> for ServerError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::NotFound(msg) => ServerError::NotFound(msg),
            RuntimeError::InvalidInput(msg) => ServerError::InvalidRequest(msg),
            RuntimeError::Core(e) => ServerError::Conflict(e.to_string()),
            other => ServerError::InternalError(other.to_string()),
        }
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Runtime(e) => e.into(),
            other => ServerError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sentinel_core::{CoreError, TransactionStatus};

    #[test]
    fn test_display() {
        let err = ServerError::InvalidRequest("missing field".to_string());
        assert_eq!(err.to_string(), "Invalid request: missing field");

        let err = ServerError::Unauthorized("invalid credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid credentials");
    }

    #[test]
    fn test_runtime_error_mapping() {
        let err: ServerError = RuntimeError::NotFound("transaction tx_1".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ServerError = RuntimeError::InvalidInput("amount".to_string()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ServerError = RuntimeError::Core(CoreError::InvalidTransition {
            id: "tx_1".to_string(),
            from: TransactionStatus::Cleared,
            to: TransactionStatus::Analyzing,
        })
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ServerError = RuntimeError::Storage("disk full".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_sdk_error_mapping() {
        let err: ServerError = SdkError::Runtime(RuntimeError::NotFound("rule r9".to_string())).into();
        assert!(matches!(err, ServerError::NotFound(_)));

        let err: ServerError = SdkError::AlreadyStarted.into();
        assert!(matches!(err, ServerError::InternalError(_)));
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let server_err: ServerError = anyhow::anyhow!("something went wrong").into();
        assert!(server_err.to_string().contains("Internal error"));
        assert!(server_err.to_string().contains("something went wrong"));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ServerError::NotFound("transaction tx_9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "transaction tx_9");
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
