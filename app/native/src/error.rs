//! Error types for SoftScreen.
//!
//! Every failure in the fullscreen core is recoverable: the operation is
//! abandoned (or a safe default is substituted), the error is handed to the
//! diagnostic channel, and the hosting application keeps running.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for SoftScreen operations.
pub type SoftScreenResult<T> = Result<T, SoftScreenError>;

/// Errors that can occur while driving the soft fullscreen controller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum SoftScreenError {
    /// The surface has no primary window, so there is nothing to come back to.
    ///
    /// This is the embedded/sandboxed case: the surface is hosted somewhere
    /// that is not an application window of its own.
    #[error("Fullscreen mode not available: the surface has no application window")]
    UnavailableContext,

    /// The requested display index does not exist.
    #[error(
        "Requested display {requested}, but only {available} display(s) are connected; \
         continuing with display 0"
    )]
    InvalidDisplayIndex {
        /// The index that was asked for.
        requested: usize,
        /// How many displays the host reported.
        available: usize,
    },

    /// The operation is not supported by soft fullscreen.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The host reported no displays at all.
    #[error("No displays available")]
    NoDisplays,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SoftScreenError {
    /// Creates an unsupported-operation error with the given message.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Short machine-friendly name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnavailableContext => "unavailable-context",
            Self::InvalidDisplayIndex { .. } => "invalid-display-index",
            Self::UnsupportedOperation(_) => "unsupported-operation",
            Self::NoDisplays => "no-displays",
            Self::Config(_) => "config",
        }
    }
}

impl From<ConfigError> for SoftScreenError {
    fn from(err: ConfigError) -> Self { Self::Config(err.to_string()) }
}

impl From<std::io::Error> for SoftScreenError {
    fn from(err: std::io::Error) -> Self { Self::Config(err.to_string()) }
}
