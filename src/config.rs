use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const DEFAULT_UNKNOWN_ALBUM: &str = "Unknown Album";

/// Application configuration loaded from TOML config file.
/// All fields have defaults; the config file is optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Folder name used when a file has no artist tag.
    pub unknown_artist: String,
    /// Folder name used when a file has no album tag.
    pub unknown_album: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unknown_artist: DEFAULT_UNKNOWN_ARTIST.to_string(),
            unknown_album: DEFAULT_UNKNOWN_ALBUM.to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/tagfold/config.toml`.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    /// Logs a warning and falls back to defaults if the file can't be read or parsed.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                return Self::default();
            }
        };

        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
