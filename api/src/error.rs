//! Error types for the operadoras API client
//!
//! Every failed call surfaces as one [`ApiError`] shape. Only the
//! human-readable `message` depends on what went wrong; it is chosen from the
//! status code in this order:
//!
//! 1. no response at all → connection error
//! 2. `400` → backend detail, else "invalid request"
//! 3. `401` → "unauthorized"
//! 4. `403` → "access denied"
//! 5. `404` → backend detail, else "resource not found"
//! 6. `500` → "internal server error"
//! 7. anything else → backend detail, else "unexpected error"

use crate::messages::Locale;
use serde::Deserialize;
use thiserror::Error;

/// Failure category of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No response received (connection refused, DNS, timeout)
    Network,
    /// HTTP 400
    BadRequest,
    /// HTTP 401
    Unauthorized,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 500
    ServerError,
    /// Any other non-success status
    Unexpected,
    /// Success status but the body did not match the expected shape
    Decode,
}

/// Errors that can occur when calling the operadoras API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    detail: Option<String>,
    message: String,
    cause: Option<String>,
}

/// Error body returned by the backend: `{ "detail": "..." }`
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ApiError {
    /// No response was received
    #[must_use]
    pub fn network(locale: Locale, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            detail: None,
            message: locale.connection_error().to_string(),
            cause: Some(cause.to_string()),
        }
    }

    /// A non-success response was received
    ///
    /// `body` is the raw response body; a JSON `detail` string in it is kept
    /// and preferred over the generic text where the status allows it.
    #[must_use]
    pub fn from_status(locale: Locale, status: u16, body: &str) -> Self {
        let detail = extract_detail(body);

        let (kind, message) = match status {
            400 => (
                ApiErrorKind::BadRequest,
                detail
                    .clone()
                    .unwrap_or_else(|| locale.invalid_request().to_string()),
            ),
            401 => (ApiErrorKind::Unauthorized, locale.unauthorized().to_string()),
            403 => (ApiErrorKind::Forbidden, locale.access_denied().to_string()),
            404 => (
                ApiErrorKind::NotFound,
                detail
                    .clone()
                    .unwrap_or_else(|| locale.resource_not_found().to_string()),
            ),
            500 => (
                ApiErrorKind::ServerError,
                locale.internal_server_error().to_string(),
            ),
            _ => (
                ApiErrorKind::Unexpected,
                detail
                    .clone()
                    .unwrap_or_else(|| locale.unexpected_error().to_string()),
            ),
        };

        Self {
            kind,
            status: Some(status),
            detail,
            message,
            cause: None,
        }
    }

    /// A success response whose body could not be decoded
    #[must_use]
    pub fn decode(locale: Locale, status: u16, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: Some(status),
            detail: None,
            message: locale.unexpected_error().to_string(),
            cause: Some(cause.to_string()),
        }
    }

    /// Failure category
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// HTTP status, absent for network failures
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Backend-supplied detail text, if the error body carried one
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Normalized human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying transport or decoding error, for logs only
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Whether the failure happened before any response arrived
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Network)
    }
}

/// Pull a non-empty string `detail` out of an error body
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}
