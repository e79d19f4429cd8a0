// ── Core error types ──
//
// User-facing errors from recipebox-core. Consumers never see reqwest
// errors or raw JSON failures directly -- the `From<recipebox_api::Error>`
// impl translates them into the transport / server / parse taxonomy.

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Network outcomes ─────────────────────────────────────────────
    /// The request could not be sent or no response arrived.
    #[error("Cannot reach the recipe server: {message}")]
    Transport { message: String },

    /// The server answered with a failure status.
    #[error("Server rejected the request (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not decode as expected.
    #[error("Unexpected response from the recipe server: {message}")]
    Parse { message: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("No recipe is selected")]
    NoSelection,

    #[error("Recipe not found: {id}")]
    NotFound { id: String },

    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a network operation failed.
///
/// The UI only shows a message, but the cause is kept so tests and
/// scripts can branch on it without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Server,
    Parse,
}

impl CoreError {
    /// The network failure category, if this error came off the wire.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Transport { .. } => Some(FailureKind::Transport),
            Self::Server { .. } => Some(FailureKind::Server),
            Self::Parse { .. } => Some(FailureKind::Parse),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the recipe as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Server { status: 404, .. } | Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<recipebox_api::Error> for CoreError {
    fn from(err: recipebox_api::Error) -> Self {
        match err {
            recipebox_api::Error::Transport(ref e) => {
                let message = if e.is_timeout() {
                    "request timed out".to_owned()
                } else if e.is_connect() {
                    format!(
                        "connection to {} failed",
                        e.url().map_or_else(|| "<unknown>".into(), ToString::to_string)
                    )
                } else {
                    e.to_string()
                };
                CoreError::Transport { message }
            }
            recipebox_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            recipebox_api::Error::Tls(message) => CoreError::Config { message },
            recipebox_api::Error::Server { status, message } => {
                CoreError::Server { status, message }
            }
            recipebox_api::Error::Deserialization { message, body: _ } => {
                CoreError::Parse { message }
            }
        }
    }
}
