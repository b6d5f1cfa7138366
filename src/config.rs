use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Window (ms) for matching an emulated mouse down to a prior touch, and a
/// native click to a prior tap. Independent of `time_threshold`.
pub const EMULATION_WINDOW_MS: f64 = 750.0;

/// Storage key used by the demo app.
pub const STORAGE_KEY: &str = "tap_config";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TapConfig {
    /// Max Chebyshev movement (px) between down and up.
    pub distance_threshold: f64,
    /// Max duration (ms) between down and up.
    pub time_threshold: f64,
    /// Ignore mouse downs from anything but the primary button.
    pub primary_button_only: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 10.0,
            time_threshold: 400.0,
            primary_button_only: true,
        }
    }
}

impl TapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("distanceThreshold", self.distance_threshold)?;
        check_threshold("timeThreshold", self.time_threshold)?;
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: TapConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads `key` from localStorage. Missing or invalid values yield the defaults.
    pub fn load_from_storage(key: &str) -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(key) {
                    match Self::from_json(&raw) {
                        Ok(config) => return config,
                        Err(err) => log::warn!("ignoring stored {key}: {err}"),
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save_to_storage(&self, key: &str) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                match self.to_json() {
                    Ok(s) => {
                        let _ = store.set_item(key, &s);
                    }
                    Err(err) => log::warn!("could not persist {key}: {err}"),
                }
            }
        }
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}
