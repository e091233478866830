use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::giphy::DEFAULT_BASE_URL as DEFAULT_GIPHY_URL;
use crate::jenkins::DEFAULT_USER as DEFAULT_JENKINS_USER;
use crate::relay::{default_easter_eggs, EasterEgg, Glyphs};

/// Configuration file structure for cirelay.
///
/// Every credential can also come from the command line or the environment,
/// which take precedence over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub jenkins: JenkinsConfig,

    #[serde(default)]
    pub discord: DiscordConfig,

    #[serde(default)]
    pub giphy: GiphyConfig,

    /// Status markers used by `!list`
    #[serde(default)]
    pub glyphs: Glyphs,

    /// Keywords answered with a canned reply and a GIF
    #[serde(default = "default_easter_eggs")]
    pub easter_eggs: Vec<EasterEgg>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JenkinsConfig {
    /// Jenkins base URL (e.g. https://ci.example.com)
    pub base_url: Option<String>,

    /// User the API token belongs to
    #[serde(default = "default_jenkins_user")]
    pub user: String,

    /// Jenkins API token
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    /// Discord bot token
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GiphyConfig {
    /// Giphy API key
    pub api_key: Option<String>,

    /// Giphy API base URL
    #[serde(default = "default_giphy_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Append log records to this file as well as stdout
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jenkins: JenkinsConfig::default(),
            discord: DiscordConfig::default(),
            giphy: GiphyConfig::default(),
            glyphs: Glyphs::default(),
            easter_eggs: default_easter_eggs(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user: default_jenkins_user(),
            token: None,
        }
    }
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_giphy_url(),
        }
    }
}

fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cirelay").join("config.toml"))
}

fn default_jenkins_user() -> String {
    DEFAULT_JENKINS_USER.to_string()
}

fn default_giphy_url() -> String {
    DEFAULT_GIPHY_URL.to_string()
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./cirelay.toml
    /// 3. ./cirelay.json
    /// 4. ./cirelay.yaml
    /// 5. ./cirelay.yml
    /// 6. `cirelay/config.toml` in the user config directory
    ///    (e.g. `~/.config/cirelay/config.toml` on Linux)
    ///
    /// Returns the defaults when no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = ["cirelay.toml", "cirelay.json", "cirelay.yaml", "cirelay.yml"]
            .into_iter()
            .map(PathBuf::from)
            .chain(user_config_file());

        for path in candidates {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }
}
