//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Dispatch Errors
    // ─────────────────────────────────────────────────────────────
    /// The caller supplied an empty (or whitespace-only) action string.
    /// Surfaced verbatim; callers rely on this exact wording.
    #[error("Action is required")]
    ActionRequired,

    // ─────────────────────────────────────────────────────────────
    // adb/Platform Errors
    // ─────────────────────────────────────────────────────────────
    #[error("adb not found. Install Android platform-tools or set adb_path in config.")]
    AdbNotFound,

    #[error("adb process error: {message}")]
    Process { message: String },

    /// Broadcast submission was rejected by the device side.
    ///
    /// Displays the device-side detail verbatim so the dispatcher can
    /// compose the caller-facing "Failed to send broadcast: <detail>"
    /// message without double-prefixing.
    #[error("{message}")]
    Broadcast { message: String },

    #[error("No device matching '{specifier}' is connected")]
    NoSuchDevice { specifier: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    pub fn broadcast(message: impl Into<String>) -> Self {
        Self::Broadcast {
            message: message.into(),
        }
    }

    pub fn no_such_device(specifier: impl Into<String>) -> Self {
        Self::NoSuchDevice {
            specifier: specifier.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ActionRequired
                | Error::Broadcast { .. }
                | Error::Process { .. }
                | Error::NoSuchDevice { .. }
        )
    }

    /// Check if this error should terminate the invocation outright
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::AdbNotFound | Error::ConfigInvalid { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Log the error with context, then propagate it
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Same, with lazily-built context
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
