//! Vedrfolnir error types

use tracing::Level;

/// Vedrfolnir error types
#[derive(Debug, thiserror::Error)]
pub enum VedrfolnirError {
    // Upstream domain errors (surface to callers with their own status)
    #[error("bad request")]
    BadRequest,

    #[error("unauthorized")]
    Unauthorized,

    /// `query` has credentials redacted.
    #[error("not found. query: {query}")]
    NotFound { query: String },

    /// Retry budget exhausted, or an unclassified sub-500 response
    /// (`attempts == 0`).
    #[error("failed {method} {path}. retry:{attempts}")]
    UpstreamFailure {
        method: String,
        path: String,
        attempts: u32,
    },

    // Transient upstream errors, consumed by the retry loop
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream server error ({status})")]
    ServerError { status: u16 },

    // Data errors
    #[error("malformed upstream response: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Infrastructure
    #[error("cache store error: {0}")]
    Cache(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl VedrfolnirError {
    /// Whether retrying the same request could succeed.
    ///
    /// Server-side (5xx) errors, timeouts and transport failures are
    /// transient. Everything else, including 4xx responses and malformed
    /// bodies, is permanent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            VedrfolnirError::Http(_) | VedrfolnirError::Timeout | VedrfolnirError::ServerError { .. }
        )
    }

    /// Whether this is a recognised domain error whose message is safe to
    /// show to a caller.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            VedrfolnirError::BadRequest
                | VedrfolnirError::Unauthorized
                | VedrfolnirError::NotFound { .. }
                | VedrfolnirError::UpstreamFailure { .. }
        )
    }

    /// Suggested response status for an API layer.
    pub fn status_code(&self) -> u16 {
        match self {
            VedrfolnirError::BadRequest => 400,
            VedrfolnirError::Unauthorized => 401,
            VedrfolnirError::NotFound { .. } => 404,
            VedrfolnirError::UpstreamFailure { .. } => 502,
            _ => 500,
        }
    }

    /// Log level for reporting: client-class errors are informational,
    /// server-class errors are errors.
    pub fn severity(&self) -> Level {
        if self.status_code() < 500 {
            Level::INFO
        } else {
            Level::ERROR
        }
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for VedrfolnirError {
    fn from(err: redis::RedisError) -> Self {
        VedrfolnirError::Cache(err.to_string())
    }
}

/// Result type alias for Vedrfolnir operations
pub type Result<T> = std::result::Result<T, VedrfolnirError>;
