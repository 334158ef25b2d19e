//! Domain types for broadcast dispatch

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single broadcast request, validated at construction.
///
/// Transient: built per call, handed to the emitter once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastIntent {
    /// Action identifier attached to the broadcast
    /// (e.g. `com.tasker.RING_OFF`). Opaque to us; receivers filter on it.
    action: String,

    /// adb serial to target. `None` lets adb pick the sole connected device.
    device: Option<String>,
}

impl BroadcastIntent {
    /// Build an intent from a raw action string.
    ///
    /// The action is trimmed; an empty result is rejected with
    /// [`Error::ActionRequired`] before any platform interaction.
    pub fn new(action: &str) -> Result<Self> {
        let action = action.trim();
        if action.is_empty() {
            return Err(Error::ActionRequired);
        }
        Ok(Self {
            action: action.to_string(),
            device: None,
        })
    }

    /// Target a specific device serial.
    pub fn with_device(mut self, serial: impl Into<String>) -> Self {
        self.device = Some(serial.into());
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }
}

/// Outcome of a dispatch call, mirrored to callers as
/// `{"success": bool, "message"?: string}`.
///
/// Every dispatch terminates in one of these; errors never cross the
/// dispatcher boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DispatchReport {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
