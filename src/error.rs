// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the client.
//! Network and API failures, decode failures, local property-collection
//! misuse and capability gaps each get their own variant so callers can
//! match on what went wrong instead of parsing messages.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// The raw pieces of a non-2xx response, kept for callers that need to
/// inspect what the server actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpFailure {
    /// Looks up a response header, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body truncated for display.
    pub fn body_preview(&self) -> String {
        preview(&self.body)
    }
}

/// A capability gap: something the caller asked for that cannot be done.
///
/// Both kinds are permanent; retrying never helps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    #[error("{0} is currently unsupported by the library")]
    ByLibrary(String),

    #[error("{0} is currently unsupported by the Notion API")]
    ByApi(String),
}

/// Main library error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to the Notion API failed with status code: {}", .0.status)]
    Transport(HttpFailure),

    #[error("{} - {message}", .code.to_string().to_uppercase())]
    Api {
        failure: HttpFailure,
        code: NotionErrorCode,
        message: String,
    },

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Property '{0}' not found")]
    PropertyNotFound(String),

    #[error("Property '{0}' already exists")]
    PropertyExists(String),

    #[error("A property must have a name before it can be added")]
    PropertyNameRequired,

    #[error("Option '{0}' appears more than once in the same property")]
    DuplicateOption(String),

    #[error(transparent)]
    Unsupported(#[from] Unsupported),
}

impl AppError {
    /// Shorthand for a decode failure at a given location in a wire record.
    pub fn malformed(location: impl fmt::Display, reason: impl fmt::Display) -> Self {
        AppError::MalformedResponse(format!("{}: {}", location, reason))
    }

    pub fn unsupported_by_library(what: impl Into<String>) -> Self {
        AppError::Unsupported(Unsupported::ByLibrary(what.into()))
    }

    pub fn unsupported_by_api(what: impl Into<String>) -> Self {
        AppError::Unsupported(Unsupported::ByApi(what.into()))
    }

    /// The HTTP response behind a `Transport` or `Api` error.
    ///
    /// `Api` errors are a refinement of transport errors: every `Api` error
    /// also answers this with the raw status, headers and body.
    pub fn http_failure(&self) -> Option<&HttpFailure> {
        match self {
            AppError::Transport(failure) | AppError::Api { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        self.http_failure().map(|failure| failure.status)
    }

    /// The typed API error code, for `Api` errors only.
    pub fn api_code(&self) -> Option<&NotionErrorCode> {
        match self {
            AppError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the failure is transient on the remote side.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Api { code, .. } => code.is_retryable(),
            AppError::Transport(failure) => matches!(failure.status, 429 | 502 | 503 | 504),
            AppError::Network(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
