//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use recipebox_config::ConfigError;
use recipebox_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the recipe server: {message}")]
    #[diagnostic(
        code(recipebox::connection_failed),
        help(
            "Check that the server is running and accessible.\n\
             Try: recipebox --server http://localhost:5000 list"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Invalid server settings: {message}")]
    #[diagnostic(
        code(recipebox::server_settings),
        help("Check the server URL, or use --insecure (-k) / ca_cert for TLS problems.")
    )]
    ServerSettings { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Recipe '{id}' not found")]
    #[diagnostic(
        code(recipebox::not_found),
        help("Run: recipebox list to see available recipes")
    )]
    NotFound { id: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Server rejected the request ({status}): {message}")]
    #[diagnostic(code(recipebox::server_error))]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(
        code(recipebox::invalid_response),
        help("Is --server pointing at a recipebox server?")
    )]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(recipebox::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(recipebox::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: recipebox config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(recipebox::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(recipebox::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(recipebox::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(recipebox::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } | Self::Server { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Server { status: 400, .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::ServerSettings { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { message } => Self::ConnectionFailed { message },
            CoreError::Server { status, message } => Self::Server { status, message },
            CoreError::Parse { message } => Self::InvalidResponse { message },
            CoreError::NotFound { id } => Self::NotFound { id },
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::Config { message } => Self::ServerSettings { message },
            CoreError::NoSelection => Self::Internal("no recipe selected".into()),
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
