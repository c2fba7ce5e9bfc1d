//! Persisted configuration for a [`GestureButton`](crate::GestureButton)
//!
//! Stored as pretty-printed JSON in the per-user config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::{ButtonError, ButtonResult};

/// Default hold time before a press is recognized as a long press
pub const DEFAULT_MINIMUM_PRESS_DURATION: Duration = Duration::from_millis(500);

/// Default distance (logical pixels) a press may travel before gestures fail
pub const DEFAULT_ALLOWABLE_MOVEMENT: f32 = 10.0;

const CONFIG_FILE_NAME: &str = "button.json";

/// Initial state of a capture button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Global kill switch for both gestures
    pub enabled: bool,
    /// Tap-to-photo mode
    pub photo_capture_enabled: bool,
    /// Hold-to-record mode
    pub video_capture_enabled: bool,
    /// Hold time before a long press begins
    #[serde(rename = "minimum_press_duration_ms", with = "duration_millis")]
    pub minimum_press_duration: Duration,
    /// Movement tolerance shared by both detectors
    pub allowable_movement: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            photo_capture_enabled: true,
            video_capture_enabled: true,
            minimum_press_duration: DEFAULT_MINIMUM_PRESS_DURATION,
            allowable_movement: DEFAULT_ALLOWABLE_MOVEMENT,
        }
    }
}

impl ButtonConfig {
    /// Location of the user's config file
    pub fn default_path() -> PathBuf {
        let config_dir = directories::ProjectDirs::from("app", "shutter", "Shutter")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("shutter"));

        config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn validate(&self) -> ButtonResult<()> {
        if !self.allowable_movement.is_finite() || self.allowable_movement < 0.0 {
            return Err(ButtonError::InvalidConfig(format!(
                "allowable_movement must be a non-negative number, got {}",
                self.allowable_movement
            )));
        }
        Ok(())
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> ButtonResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: ButtonConfig = serde_json::from_str(&json)?;
        config.validate()?;
        debug!("Loaded button config from {:?}", path);
        Ok(config)
    }

    /// Load the config file if one exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> ButtonResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> ButtonResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!("Saved button config to {:?}", path);
        Ok(())
    }
}

/// Serialization module for Duration as milliseconds (u64)
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
