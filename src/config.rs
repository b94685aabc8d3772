use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where exported clips are written
    pub output_dir: String,
    pub ffmpeg_binary_path: String,
    pub ffprobe_binary_path: String,
    /// Program (plus leading args) used to preview clips
    pub player_command: Vec<String>,
    /// Length of each generated clip in seconds
    pub clip_duration: f64,
    /// Overlap between consecutive clips in seconds
    pub overlap_duration: f64,
    /// A trailing clip shorter than this is dropped
    pub min_clip_duration: f64,
    pub max_clips: usize,
    /// How long a notification stays up, in ticks
    pub toast_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: "all_30sec_shorts".to_string(),
            ffmpeg_binary_path: "ffmpeg".to_string(),
            ffprobe_binary_path: "ffprobe".to_string(),
            player_command: vec!["ffplay".to_string(), "-autoexit".to_string()],
            clip_duration: 30.0,
            overlap_duration: 5.0,
            min_clip_duration: 25.0,
            max_clips: 100,
            toast_ticks: 40,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".clipreel"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config, falling back to defaults when missing or invalid.
    /// A missing file is created with the defaults so it can be edited.
    pub fn load_or_default() -> Config {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };

        if !path.exists() {
            let config = Config::default();
            if let Err(e) = config.save_to(&path) {
                tracing::warn!("could not write default config: {:#}", e);
            }
            return config;
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring config at {}: {:#}", path.display(), e);
            Config::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "clip_duration": 60.0, "max_clips": 5 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.clip_duration, 60.0);
        assert_eq!(config.max_clips, 5);
        assert_eq!(config.overlap_duration, 5.0);
        assert_eq!(config.ffmpeg_binary_path, "ffmpeg");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            output_dir: "exports".to_string(),
            toast_ticks: 12,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
