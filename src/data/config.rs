//! Application Configuration
//!
//! Handles loading and saving application configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::platform::Stream;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Load configuration from file or create default
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Restore the captured levels on process shutdown if a mute is
    /// still pending.
    #[serde(default = "default_true")]
    pub restore_on_exit: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            restore_on_exit: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Audio adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Streams the controller captures and mutes.
    #[serde(default = "default_managed")]
    pub managed: Vec<Stream>,
    /// Mixer card/device name (Linux).
    #[serde(default = "default_mixer_device")]
    pub mixer_device: String,
    /// Mixer control backing the notification stream (Linux).
    #[serde(default = "default_notification_control")]
    pub notification_control: String,
    /// Mixer control backing the system stream (Linux).
    #[serde(default = "default_system_control")]
    pub system_control: String,
}

fn default_managed() -> Vec<Stream> {
    vec![Stream::Notification, Stream::System]
}

fn default_mixer_device() -> String {
    "default".to_string()
}

fn default_notification_control() -> String {
    "Beep".to_string()
}

fn default_system_control() -> String {
    "Master".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            managed: default_managed(),
            mixer_device: default_mixer_device(),
            notification_control: default_notification_control(),
            system_control: default_system_control(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_manage_both_tone_streams() {
        let config = AppConfig::default();
        assert_eq!(
            config.audio.managed,
            vec![Stream::Notification, Stream::System]
        );
        assert!(config.general.restore_on_exit);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [audio]
            mixer_device = "hw:1"
            "#,
        )
        .unwrap();

        assert_eq!(config.audio.mixer_device, "hw:1");
        assert_eq!(config.audio.system_control, "Master");
        assert_eq!(
            config.audio.managed,
            vec![Stream::Notification, Stream::System]
        );
    }

    #[test]
    fn managed_streams_parse_by_identifier() {
        let config: AppConfig = toml::from_str(
            r#"
            [audio]
            managed = ["notification"]
            "#,
        )
        .unwrap();

        assert_eq!(config.audio.managed, vec![Stream::Notification]);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.audio.managed, config.audio.managed);
        assert_eq!(parsed.audio.mixer_device, config.audio.mixer_device);
    }
}
