//! Error taxonomy of the relay and its mapping to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller supplied an unusable identity or request body.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The user-profile service could not provide the stored tokens.
    #[error("User lookup failed: {0}")]
    Lookup(String),

    /// The auth service could not exchange the refresh token.
    #[error("Token refresh failed: {0}")]
    Refresh(String),

    /// The provider was unreachable or answered with an unhandled status.
    #[error("Provider error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

impl RelayError {
    pub fn upstream_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("provider responded with status {}", status)
        } else {
            format!("provider responded with status {}: {}", status, body.trim())
        };
        RelayError::Upstream {
            status: Some(status),
            message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation",
            RelayError::Lookup(_) => "lookup",
            RelayError::Refresh(_) => "refresh",
            RelayError::Upstream { .. } => "upstream",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Lookup(_) => StatusCode::NOT_FOUND,
            RelayError::Refresh(_) => StatusCode::UNAUTHORIZED,
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        let upstream_status = match &self {
            RelayError::Upstream { status, .. } => *status,
            _ => None,
        };
        let body = ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
            upstream_status,
        };
        (status, Json(body)).into_response()
    }
}
