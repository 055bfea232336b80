use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::preview::{Device, PreviewPage};

pub const DEFAULT_ADVANCED_CONFIGURATION_URL: &str = "https://qumu.com/widget-creator";

/// Keys accepted by `config set`
pub const KEYS: [&str; 5] = [
    "editor.theme",
    "editor.default_device",
    "editor.default_page",
    "publish.directory",
    "links.advanced_configuration_url",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha,
    Latte,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StudioConfig {
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub publish: PublishSettings,
    #[serde(default)]
    pub links: LinkSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub theme: ThemeVariant,
    #[serde(default)]
    pub default_device: Device,
    #[serde(default)]
    pub default_page: PreviewPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSettings {
    #[serde(default = "default_publish_directory")]
    pub directory: PathBuf,
}

fn default_publish_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            directory: default_publish_directory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSettings {
    #[serde(default = "default_advanced_configuration_url")]
    pub advanced_configuration_url: String,
}

fn default_advanced_configuration_url() -> String {
    DEFAULT_ADVANCED_CONFIGURATION_URL.to_string()
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            advanced_configuration_url: default_advanced_configuration_url(),
        }
    }
}

impl StudioConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("portal-studio")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".portal-studio")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        if !path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", path);
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))?;
        info!("Config saved successfully");
        Ok(())
    }

    /// Current value of a dotted key, as shown by `config show`
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "editor.theme" => match self.editor.theme {
                ThemeVariant::Mocha => "mocha".to_string(),
                ThemeVariant::Latte => "latte".to_string(),
            },
            "editor.default_device" => self.editor.default_device.to_string(),
            "editor.default_page" => self.editor.default_page.to_string(),
            "publish.directory" => self.publish.directory.display().to_string(),
            "links.advanced_configuration_url" => self.links.advanced_configuration_url.clone(),
            other => anyhow::bail!("Unknown setting '{}' (expected one of: {})", other, KEYS.join(", ")),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "editor.theme" => {
                self.editor.theme = match value.to_ascii_lowercase().as_str() {
                    "mocha" => ThemeVariant::Mocha,
                    "latte" => ThemeVariant::Latte,
                    other => anyhow::bail!("Unknown theme '{}' (mocha, latte)", other),
                }
            }
            "editor.default_device" => {
                self.editor.default_device = value.parse().map_err(anyhow::Error::msg)?;
            }
            "editor.default_page" => {
                self.editor.default_page = value.parse().map_err(anyhow::Error::msg)?;
            }
            "publish.directory" => self.publish.directory = PathBuf::from(value),
            "links.advanced_configuration_url" => {
                if value.trim().is_empty() {
                    anyhow::bail!("URL cannot be empty");
                }
                self.links.advanced_configuration_url = value.trim().to_string();
            }
            other => anyhow::bail!("Unknown setting '{}' (expected one of: {})", other, KEYS.join(", ")),
        }
        info!("Updated setting {} = {}", key, value);
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudioConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.links.advanced_configuration_url, DEFAULT_ADVANCED_CONFIGURATION_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: StudioConfig = toml::from_str("[editor]\ntheme = \"latte\"\n").unwrap();
        assert_eq!(config.editor.theme, ThemeVariant::Latte);
        assert_eq!(config.editor.default_device, Device::Desktop);
        assert_eq!(config.publish.directory, PathBuf::from("."));
    }

    #[test]
    fn test_set_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = StudioConfig::default();
        config.set("editor.default_device", "mobile").unwrap();
        config.set("editor.default_page", "player").unwrap();
        config.set("publish.directory", "/srv/portals").unwrap();
        config.save_to(&path).unwrap();

        let loaded = StudioConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("editor.default_device").unwrap(), "mobile");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = StudioConfig::default();
        assert!(config.set("editor.theme", "dracula").is_err());
        assert!(config.set("editor.default_device", "watch").is_err());
        assert!(config.set("nope", "x").is_err());
        assert_eq!(config, StudioConfig::default());
    }
}
