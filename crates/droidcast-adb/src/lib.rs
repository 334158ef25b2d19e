//! # droidcast-adb - adb Platform Layer
//!
//! Implements the [`droidcast_core::IntentEmitter`] capability on top of
//! the Android Debug Bridge, plus the device discovery and tool probing
//! around it.
//!
//! Depends on [`droidcast_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Emission
//! - [`AdbEmitter`] - Sends broadcasts via `adb shell am broadcast`
//!
//! ### Device Discovery
//! - [`AdbDevice`], [`DeviceState`] - Devices known to the adb server
//! - [`list_devices()`] - Parse `adb devices -l`
//!
//! ### Platform Utilities
//! - [`ToolAvailability`] - Locate and verify the adb binary

pub mod devices;
pub mod emitter;
pub mod tool_availability;

pub use devices::{list_devices, list_devices_with_timeout, AdbDevice, DeviceState};
pub use emitter::AdbEmitter;
pub use tool_availability::ToolAvailability;
