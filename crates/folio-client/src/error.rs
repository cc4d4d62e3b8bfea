//! Client-side error classification.

use folio_shared::{ErrorCode, ErrorResponse, FieldError};
use thiserror::Error;

/// Failures of a client call, worded for display to end users.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timeout. Please check your connection.")]
    Timeout,

    #[error("Network error. Please check your connection.")]
    Network,

    #[error("Resource not found")]
    NotFound,

    #[error("Server error. Please try again later.")]
    Server,

    /// Any other non-success answer, carrying the server's own message.
    #[error("{message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
        details: Vec<FieldError>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify a request that never produced an HTTP status.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network
        }
    }

    /// Classify a non-success status, using the error envelope when present.
    pub(crate) fn from_status(status: u16, body: Option<ErrorResponse>) -> Self {
        match status {
            404 => ClientError::NotFound,
            500 => ClientError::Server,
            _ => match body {
                Some(body) => ClientError::Api {
                    status,
                    code: body.error.code,
                    message: body.error.message,
                    details: body.error.details.unwrap_or_default(),
                },
                None => ClientError::Api {
                    status,
                    code: ErrorCode::Unknown,
                    message: format!("Request failed with status code {}", status),
                    details: Vec::new(),
                },
            },
        }
    }

    /// True for the statuses the server uses for rejected input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Api {
                code: ErrorCode::ValidationError,
                ..
            }
        )
    }
}
