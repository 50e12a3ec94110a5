//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use uidb_config::ConfigError;
use uidb_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Catalog ──────────────────────────────────────────────────────
    #[error("No catalog data available")]
    #[diagnostic(
        code(uidb::no_data),
        help(
            "The feed could not be reached and no fallback snapshot was usable.\n\
             Reason: {reason}\n\
             Check --feed-url and --fallback-file, or drop --offline."
        )
    )]
    NoData { reason: String },

    #[error("Catalog feed error: {message}")]
    #[diagnostic(code(uidb::feed))]
    Feed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(uidb::not_found),
        help("Run: uidb {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(uidb::validation))]
    Validation { field: String, reason: String },

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(uidb::not_interactive),
        help("Use `uidb devices get <id>` to print neighbors non-interactively.")
    )]
    NotInteractive { command: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(uidb::config),
        help("Inspect the file with: uidb config show")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(uidb::config_exists), help("Pass --force to overwrite it."))]
    ConfigExists { path: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(uidb::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(uidb::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoData { .. } | Self::Feed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NotInteractive { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn device_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: "device".into(),
            identifier: identifier.into(),
            list_command: "devices list".into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoData { reason } => CliError::NoData { reason },
            CoreError::DeviceNotFound { identifier } => CliError::device_not_found(identifier),
            CoreError::Api { message, status } => CliError::Feed {
                message: match status {
                    Some(code) => format!("{message} (HTTP {code})"),
                    None => message,
                },
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let not_found = CliError::from(CoreError::DeviceNotFound {
            identifier: "x".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let no_data = CliError::from(CoreError::NoData {
            reason: "down".into(),
        });
        assert_eq!(no_data.exit_code(), exit_code::CONNECTION);

        let bad = CliError::from(CoreError::Config {
            message: "bad url".into(),
        });
        assert_eq!(bad.exit_code(), exit_code::USAGE);

        assert_eq!(
            CliError::Internal("boom".into()).exit_code(),
            exit_code::GENERAL
        );
    }
}
