//! Response envelope and error reporting for API layers.
//!
//! Everything a caller surfaces is wrapped in [`ServerResponse`]:
//!
//! ```json
//! { "message": "success", "payload": [ ... ] }
//! ```
//!
//! [`ErrorReport`] turns an error into a status and an envelope. Domain
//! errors keep their message; anything else is flattened to
//! `"Unknown error"` and the detail only goes to the log.

use serde::{Deserialize, Serialize};
use tracing::{Level, error, info};

use crate::VedrfolnirError;

/// Message used for successful responses.
pub const SUCCESS_MESSAGE: &str = "success";

/// Message used for errors whose detail is withheld.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Uniform response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse<T> {
    pub message: String,
    pub payload: Option<T>,
}

impl<T> ServerResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            payload: Some(payload),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: None,
        }
    }
}

/// Status and caller-safe body for a failed lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub status: u16,
    pub body: ServerResponse<()>,
}

impl ErrorReport {
    /// Classify `err`, log it at its severity, and build the caller view.
    pub fn from_error(err: &VedrfolnirError) -> Self {
        let status = err.status_code();
        if err.severity() == Level::ERROR {
            error!(status, error = %err, "request failed");
        } else {
            info!(status, error = %err, "request failed");
        }

        let message = if err.is_domain() {
            err.to_string()
        } else {
            UNKNOWN_ERROR_MESSAGE.to_string()
        };

        Self {
            status,
            body: ServerResponse::error(message),
        }
    }
}

impl From<&VedrfolnirError> for ErrorReport {
    fn from(err: &VedrfolnirError) -> Self {
        Self::from_error(err)
    }
}
