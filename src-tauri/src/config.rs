// Desktop configuration, read from a JSON file with every field optional

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::state::geometry::{Layout, Viewport};

/// File name looked up in the host's config directory
pub const CONFIG_FILE_NAME: &str = "win99.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub viewport: Viewport,
    pub taskbar_height: i32,
    pub window_margin: i32,
    /// Bundled `.b64` icons and stylesheets
    pub asset_root: PathBuf,
    /// Downloaded remote assets
    pub cache_dir: PathBuf,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1920, 1080),
            taskbar_height: 30,
            window_margin: 20,
            asset_root: PathBuf::from("assets"),
            cache_dir: PathBuf::from("cache"),
        }
    }
}

impl DesktopConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DesktopConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0 || self.viewport.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.taskbar_height < 0 || self.taskbar_height >= self.viewport.height {
            return Err(ConfigError::Invalid(format!(
                "taskbar height {} does not fit a {}px viewport",
                self.taskbar_height, self.viewport.height
            )));
        }
        if self.window_margin < 0 {
            return Err(ConfigError::Invalid("window margin must not be negative".into()));
        }
        let work_height = self.viewport.height - self.taskbar_height;
        let both_sides = i64::from(self.window_margin) * 2;
        if both_sides >= i64::from(self.viewport.width) || both_sides >= i64::from(work_height) {
            return Err(ConfigError::Invalid(format!(
                "window margin {} leaves no room in a {}x{} work area",
                self.window_margin, self.viewport.width, work_height
            )));
        }
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout {
            viewport: self.viewport,
            taskbar_height: self.taskbar_height,
            window_margin: self.window_margin,
        }
    }
}
