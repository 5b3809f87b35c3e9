//! Configuration file management.
//!
//! Reads user preferences from `~/.halo-player.toml`. The file is only read;
//! nothing about playback is written back.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_VOLUME: f32 = 0.7;

const CONFIG_TEMPLATE: &str = r#"# halo-player configuration file

# Tracks offered for selection, in order (default: audio files in assets_dir)
# tracks = ["/music/one.mp3", "/music/two.flac"]

# Directory scanned for audio files when no tracks are listed (default: assets)
# assets_dir = "assets"

# Initial volume slider value, 0.0 - 1.0 (default: 0.7)
# volume = 0.7

# Output device name as listed by --list-devices (default: system default)
# output_device = "Device Name"
"#;

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    pub tracks: Option<Vec<PathBuf>>,
    pub assets_dir: Option<PathBuf>,
    pub volume: Option<f32>,
    pub output_device: Option<String>,
}

impl Config {
    fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".halo-player.toml"))
    }

    pub fn load() -> Self {
        let path = match Self::path() {
            Some(p) => p,
            None => return Self::default(),
        };

        // Create template file if it doesn't exist
        if !path.exists() {
            match fs::write(&path, CONFIG_TEMPLATE) {
                Ok(()) => info!("Created config template at {:?}", path),
                Err(e) => warn!("Could not create config template at {:?}: {}", path, e),
            }
        }

        match fs::read_to_string(&path) {
            Ok(s) => Self::from_toml_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                warn!("Could not read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Initial volume, clamped to 0-1
    pub fn volume(&self) -> f32 {
        self.volume
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_VOLUME)
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.volume(), 0.7);
    }

    #[test]
    fn test_fields_parse() {
        let config = Config::from_toml_str(
            r#"
            tracks = ["a.mp3", "b/c.ogg"]
            assets_dir = "music"
            volume = 0.25
            output_device = "Speakers"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.tracks,
            Some(vec![PathBuf::from("a.mp3"), PathBuf::from("b/c.ogg")])
        );
        assert_eq!(config.assets_dir, Some(PathBuf::from("music")));
        assert_eq!(config.volume(), 0.25);
        assert_eq!(config.output_device.as_deref(), Some("Speakers"));
    }

    #[test]
    fn test_volume_is_clamped() {
        let loud = Config {
            volume: Some(3.0),
            ..Config::default()
        };
        let negative = Config {
            volume: Some(-1.0),
            ..Config::default()
        };
        assert_eq!(loud.volume(), 1.0);
        assert_eq!(negative.volume(), 0.0);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("volume = \"loud\"").is_err());
    }
}
