//! Configuration file parsing for droidcast
//!
//! Reads `<config dir>/droidcast/config.toml`:
//!
//! ```toml
//! adb_path = "/opt/android-sdk/platform-tools/adb"
//! default_device = "emulator-5554"
//!
//! [aliases]
//! lights-out = "com.example.LIGHTS_OUT"
//! ```
//!
//! A pair of aliases ships built in (`ring-off`, `screen-off`) for the
//! Tasker actions this tool grew out of; user entries override them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use droidcast_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = "droidcast";

/// User configuration, all fields optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Explicit adb binary, overriding PATH/SDK discovery
    pub adb_path: Option<String>,

    /// Serial used when `--device` is not given
    pub default_device: Option<String>,

    /// Action-name shortcuts for `droidcast send`
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    /// Resolve an action argument through user aliases, then built-ins.
    /// Unknown names pass through untouched — the action string is opaque.
    pub fn resolve_action<'a>(&'a self, name: &'a str) -> &'a str {
        if let Some(action) = self.aliases.get(name) {
            return action;
        }
        builtin_alias(name).unwrap_or(name)
    }

    /// Device serial to target: explicit flag wins over the configured default.
    pub fn resolve_device<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.or(self.default_device.as_deref())
    }
}

/// Aliases that ship with the tool
fn builtin_alias(name: &str) -> Option<&'static str> {
    match name {
        "ring-off" => Some("com.tasker.RING_OFF"),
        "screen-off" => Some("com.tasker.SCREEN_OFF"),
        _ => None,
    }
}

/// Default config file location
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(CONFIG_DIR).join(CONFIG_FILENAME)
}

/// Load configuration from the default location.
///
/// A missing file yields defaults; an unreadable or malformed file is an
/// error, since silently ignoring an explicit `adb_path` or
/// `default_device` would misdirect broadcasts.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

/// Load configuration from a specific path (used by tests)
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {:?}: {}", path, e)))?;

    let config = toml::from_str(&content)
        .map_err(|e| Error::config_invalid(format!("{:?}: {}", path, e)))?;

    debug!("Loaded config from {:?}", path);
    Ok(config)
}
