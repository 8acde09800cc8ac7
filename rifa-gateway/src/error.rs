//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rifa_core::CoreError;
use serde_json::json;

use crate::store::StoreError;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the ticket store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body is malformed or missing a required field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The supplied admin password did not match.
    #[error("incorrect password")]
    InvalidCredentials,

    /// A privileged operation was attempted without a live admin session.
    #[error("admin session required")]
    AdminRequired,
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        Self::Store(StoreError::Core(err))
    }
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            GatewayError::Store(StoreError::Core(core)) => match core {
                CoreError::AlreadySold { .. } => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidCredentials | GatewayError::AdminRequired => {
                StatusCode::UNAUTHORIZED
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({"success": false, "error": self.to_string()}))).into_response()
    }
}
