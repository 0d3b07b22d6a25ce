use std::path::{Path, PathBuf};
use std::time::Duration;

use draftloom_engine::{AssistOptions, GenerationParams, LineClassifier, MergePolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User-facing settings for the assistant and editor integration.
///
/// Every field has a default, so a partial (or absent) config file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deepest heading level the host editor supports.
    pub heading_level_cap: u8,
    /// Default depth cutoff for targeted merges with no explicit targets.
    pub target_depth_cutoff: u8,
    /// Token budget for outline generation.
    pub structure_max_length: u32,
    /// Token budget for content generation.
    pub content_max_length: u32,
    pub temperature: f32,
    /// Tick interval of the typing animation, in milliseconds.
    pub typing_interval_ms: u64,
    /// Quiet window before a content-change notification fires.
    pub change_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heading_level_cap: 3,
            target_depth_cutoff: 3,
            structure_max_length: 1500,
            content_max_length: 4000,
            temperature: 0.7,
            typing_interval_ms: 30,
            change_debounce_ms: 1500,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/draftloom");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Engine-side options derived from this config.
    pub fn assist_options(&self) -> AssistOptions {
        AssistOptions {
            heading_cap: self.heading_level_cap,
            merge: self.merge_policy(),
            structure_params: GenerationParams {
                max_length: self.structure_max_length,
                temperature: self.temperature,
            },
            content_params: GenerationParams {
                max_length: self.content_max_length,
                temperature: self.temperature,
            },
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy {
            target_depth_cutoff: self.target_depth_cutoff,
        }
    }

    pub fn classifier(&self) -> LineClassifier {
        LineClassifier::new(self.heading_level_cap)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    pub fn change_debounce(&self) -> Duration {
        Duration::from_millis(self.change_debounce_ms)
    }
}
