//! Game settings and preferences
//!
//! The simulation only reads the logical screen size and the background speed
//! multiplier; the rest is carried for the host's menus and mixer.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use crate::sim::geometry::ScreenSize;
use crate::tuning::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub fullscreen: bool,
    pub borderless: bool,
    /// Logical screen width in pixels
    pub width: u32,
    /// Logical screen height in pixels
    pub height: u32,
    /// Parallax speed for the host's background layers
    pub background_speed_multiplier: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Menu sounds volume (0.0 - 1.0)
    pub ui_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fullscreen: false,
            borderless: false,
            width: DEFAULT_SCREEN_WIDTH as u32,
            height: DEFAULT_SCREEN_HEIGHT as u32,
            background_speed_multiplier: 6.0,

            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 0.5,
            ui_volume: 0.5,
        }
    }
}

impl Settings {
    /// Current logical screen size
    pub fn screen_size(&self) -> ScreenSize {
        ScreenSize::new(self.width as f32, self.height as f32)
    }

    /// Parse settings stored by the host
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.width == 0 || settings.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width",
                reason: format!(
                    "screen must be non-empty, got {}x{}",
                    settings.width, settings.height
                ),
            });
        }
        settings.clamp_volumes();
        log::info!("Loaded settings ({}x{})", settings.width, settings.height);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.ui_volume = self.ui_volume.clamp(0.0, 1.0);
    }
}
