// ── Core error types ──
//
// User-facing errors from airgrid-core. The page controllers are the
// only place that decides recovery (rollback) versus display, so the
// data layer never swallows or retries anything -- errors bubble up
// unchanged and `report()` renders the uniform UI shape.

use serde::Serialize;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request cancelled by the client-side timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Transport failure with no HTTP response.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx backend response.
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
        code: Option<String>,
        details: Option<serde_json::Value>,
    },

    /// Entity lookup failed (mock equivalent of a 404).
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Mutation rejected because it collides with existing state
    /// (mock equivalent of a 409).
    #[error("Conflict on {resource}: {message}")]
    Conflict {
        resource: &'static str,
        message: String,
    },

    /// Client-side validation failure. Never sent to the network.
    #[error("Validation failed: {message}")]
    Validation {
        field: Option<&'static str>,
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Configuration problem (bad URL, missing base, …).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Returns `true` for both the typed and the HTTP flavor of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Api { status: Some(404), .. })
    }

    /// Render the uniform `{message, status, code, details}` shape the
    /// UI displays for every failure.
    pub fn report(&self) -> ErrorReport {
        match self {
            Self::Timeout { timeout_ms } => ErrorReport {
                message: self.to_string(),
                status: None,
                code: Some("TIMEOUT".into()),
                details: Some(serde_json::json!({ "timeoutMs": timeout_ms })),
            },
            Self::Network { .. } => ErrorReport {
                message: self.to_string(),
                status: None,
                code: Some("NETWORK_ERROR".into()),
                details: None,
            },
            Self::Api {
                message,
                status,
                code,
                details,
            } => ErrorReport {
                message: message.clone(),
                status: *status,
                code: code.clone(),
                details: details.clone(),
            },
            Self::NotFound { .. } => ErrorReport {
                message: self.to_string(),
                status: Some(404),
                code: Some("NOT_FOUND".into()),
                details: None,
            },
            Self::Conflict { .. } => ErrorReport {
                message: self.to_string(),
                status: Some(409),
                code: Some("CONFLICT".into()),
                details: None,
            },
            Self::Validation { field, message } => ErrorReport {
                message: message.clone(),
                status: None,
                code: Some("VALIDATION".into()),
                details: field.map(|f| serde_json::json!({ "field": f })),
            },
            Self::Decode { .. } => ErrorReport {
                message: self.to_string(),
                status: None,
                code: Some("DECODE_ERROR".into()),
                details: None,
            },
            Self::Config { message } => ErrorReport {
                message: message.clone(),
                status: None,
                code: Some("CONFIG".into()),
                details: None,
            },
        }
    }
}

/// The uniform error shape surfaced to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl ErrorReport {
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404) || self.code.as_deref() == Some("NOT_FOUND")
    }
}

impl From<CoreError> for ErrorReport {
    fn from(err: CoreError) -> Self {
        err.report()
    }
}

// ── Conversion from wire-layer errors ───────────────────────────────

impl From<airgrid_api::Error> for CoreError {
    fn from(err: airgrid_api::Error) -> Self {
        match err {
            airgrid_api::Error::Timeout { timeout_ms } => Self::Timeout { timeout_ms },
            airgrid_api::Error::Transport(ref e) => {
                if let Some(status) = e.status() {
                    Self::Api {
                        message: e.to_string(),
                        status: Some(status.as_u16()),
                        code: None,
                        details: None,
                    }
                } else {
                    Self::Network {
                        message: e.to_string(),
                    }
                }
            }
            airgrid_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            airgrid_api::Error::Api {
                status,
                message,
                code,
                details,
            } => Self::Api {
                message,
                status: Some(status),
                code,
                details,
            },
            airgrid_api::Error::Deserialization { message, body: _ } => Self::Decode { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_report_carries_404_and_code() {
        let err = CoreError::NotFound {
            resource: "client",
            id: "cl-99".into(),
        };
        let report = err.report();
        assert_eq!(report.status, Some(404));
        assert_eq!(report.code.as_deref(), Some("NOT_FOUND"));
        assert!(err.is_not_found());
    }

    #[test]
    fn timeout_report_has_no_status() {
        let report = CoreError::Timeout { timeout_ms: 1500 }.report();
        assert_eq!(report.status, None);
        assert_eq!(report.code.as_deref(), Some("TIMEOUT"));
    }

    #[test]
    fn http_404_counts_as_not_found() {
        let err = CoreError::Api {
            message: "gone".into(),
            status: Some(404),
            code: None,
            details: None,
        };
        assert!(err.is_not_found());
    }
}
