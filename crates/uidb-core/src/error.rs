// ── Core error types ──
//
// User-facing errors from uidb-core. Consumers never see HTTP status codes
// or JSON parse failures directly: fetch problems are absorbed by the
// fallback, and the `From<uidb_api::Error>` impl translates whatever is left.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data errors ──────────────────────────────────────────────────
    /// Neither the live feed nor a fallback snapshot produced a catalog.
    #[error("No device data available: {reason}")]
    NoData { reason: String },

    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<uidb_api::Error> for CoreError {
    fn from(err: uidb_api::Error) -> Self {
        match err {
            uidb_api::Error::Transport(ref e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            uidb_api::Error::HttpStatus { status, url } => CoreError::Api {
                message: format!("{url} answered HTTP {status}"),
                status: Some(status),
            },
            uidb_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            uidb_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            uidb_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
