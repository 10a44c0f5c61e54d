//! Error handling module for the DocShare client.
//!
//! Provides one error type for every failure the core can surface, with the mapping from
//! HTTP status codes and server error bodies.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const AUTH_ERROR: &str = "AUTH_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const AUTHORIZATION_ERROR: &str = "AUTHORIZATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const EXPIRED: &str = "EXPIRED";
    pub const PAYLOAD_ERROR: &str = "PAYLOAD_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const CONFIGURATION_ERROR: &str = "CONFIGURATION_ERROR";
}

/// Client error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Bad credentials or missing/rejected session
    Auth(String),
    /// Malformed or duplicate input
    Validation(String),
    /// Caller lacks the role required for the operation
    Authorization(String),
    /// Resource not found
    NotFound(String),
    /// State already changed by a concurrent actor
    Conflict(String),
    /// Validity window has passed
    Expired(String),
    /// Upload rejected
    Payload(String),
    /// Network failure or timeout
    Transport(String),
    /// Any other non-success status
    Server { status: u16, message: String },
    /// Response body did not match the expected shape
    Decode(String),
    /// Session persistence failure
    Storage(String),
    /// Local file system failure
    Io(String),
    /// Invalid configuration value
    Configuration(String),
}

impl ClientError {
    /// Classify a non-success HTTP status and the server's message.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 | 422 => ClientError::Validation(message),
            401 => ClientError::Auth(message),
            403 => ClientError::Authorization(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            410 => ClientError::Expired(message),
            413 | 415 => ClientError::Payload(message),
            code => ClientError::Server {
                status: code,
                message,
            },
        }
    }

    /// Get the HTTP status code this error was derived from, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ClientError::Auth(_) => Some(StatusCode::UNAUTHORIZED),
            ClientError::Validation(_) => Some(StatusCode::BAD_REQUEST),
            ClientError::Authorization(_) => Some(StatusCode::FORBIDDEN),
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ClientError::Conflict(_) => Some(StatusCode::CONFLICT),
            ClientError::Expired(_) => Some(StatusCode::GONE),
            ClientError::Payload(_) => Some(StatusCode::PAYLOAD_TOO_LARGE),
            ClientError::Server { status, .. } => StatusCode::from_u16(*status).ok(),
            ClientError::Transport(_)
            | ClientError::Decode(_)
            | ClientError::Storage(_)
            | ClientError::Io(_)
            | ClientError::Configuration(_) => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Auth(_) => codes::AUTH_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Authorization(_) => codes::AUTHORIZATION_ERROR,
            ClientError::NotFound(_) => codes::NOT_FOUND,
            ClientError::Conflict(_) => codes::CONFLICT,
            ClientError::Expired(_) => codes::EXPIRED,
            ClientError::Payload(_) => codes::PAYLOAD_ERROR,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Server { .. } => codes::SERVER_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Io(_) => codes::IO_ERROR,
            ClientError::Configuration(_) => codes::CONFIGURATION_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Auth(msg)
            | ClientError::Validation(msg)
            | ClientError::Authorization(msg)
            | ClientError::NotFound(msg)
            | ClientError::Conflict(msg)
            | ClientError::Expired(msg)
            | ClientError::Payload(msg)
            | ClientError::Transport(msg)
            | ClientError::Decode(msg)
            | ClientError::Storage(msg)
            | ClientError::Io(msg)
            | ClientError::Configuration(msg) => msg.clone(),
            ClientError::Server { message, .. } => message.clone(),
        }
    }

    /// Re-tag a validation failure as a different error kind.
    ///
    /// Some endpoints report a domain failure (already a member, rejected file) with a
    /// plain 400; resource clients use this to surface the specific kind.
    pub(crate) fn refine_validation(self, into: fn(String) -> ClientError) -> Self {
        match self {
            ClientError::Validation(msg) => into(msg),
            other => other,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Decode error: {:?}", err);
            return ClientError::Decode(format!("Decode error: {}", err));
        }
        tracing::error!("Transport error: {:?}", err);
        ClientError::Transport(format!("Transport error: {}", err))
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        ClientError::Storage(format!("Storage error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("IO error: {:?}", err);
        ClientError::Io(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

/// Error body returned by the service: `{"detail": ...}`.
///
/// `detail` is a plain string for most failures and a list of field errors for
/// request validation failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// Flatten the detail into one human-readable line.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

/// Extract the server's message from a failed response body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.message();
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unexpected response")
        .to_string()
}
