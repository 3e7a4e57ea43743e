//! Game settings and preferences
//!
//! Persisted as JSON next to the binary. Missing or malformed files fall back
//! to defaults.

use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Scene width in points
    pub scene_width: f32,
    /// Scene height in points
    pub scene_height: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show live node count
    pub show_node_count: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene_width: DEFAULT_SCENE_WIDTH,
            scene_height: DEFAULT_SCENE_HEIGHT,

            show_fps: true,
            show_node_count: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Scene size as a vector
    pub fn scene_size(&self) -> Vec2 {
        Vec2::new(self.scene_width, self.scene_height)
    }

    /// Parse settings from JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Load settings, falling back to defaults if the file is unusable
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
