//! Game settings
//!
//! Read once at startup from a JSON file. Never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, MAX_FPS};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target tick rate (logical updates per second)
    pub fps: u32,
    /// RNG seed for wave layout and enemy fire (None = random per run)
    pub seed: Option<u64>,
    /// Directory holding the PNG sprite set (None = built-in sprites)
    pub assets_dir: Option<PathBuf>,
    /// Whether enemies shoot back
    pub enemy_fire: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            seed: None,
            assets_dir: None,
            enemy_fire: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Default settings file, looked up in the working directory
    const FILE_NAME: &'static str = "space_shooter.json";
    /// Environment variable overriding the settings path
    const PATH_ENV: &'static str = "SPACE_SHOOTER_SETTINGS";

    /// Resolve the settings path (env override, else working directory)
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.fps == 0 {
            log::warn!("fps must be positive, using {}", FPS);
            settings.fps = FPS;
        } else if settings.fps > MAX_FPS {
            log::warn!("fps {} is too high, using {}", settings.fps, MAX_FPS);
            settings.fps = MAX_FPS;
        }
        Ok(settings)
    }
}
