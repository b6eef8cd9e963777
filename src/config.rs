//! Configuration management for skill topology

use crate::error::{Result, SkillTopologyError};
use crate::store::{DEFAULT_TTL_SECS, MAX_TTL_SECS};
use crate::visualization::layout::{FlowLayout, RadarLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub fetch: FetchConfig,
    pub store: StoreConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub flow: FlowLayout,
    pub radar: RadarLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Cap on condensed job posting text, in characters
    pub max_chars: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            fetch: FetchConfig {
                user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string(),
                max_chars: 6000,
                timeout_secs: 20,
            },
            store: StoreConfig {
                ttl_secs: DEFAULT_TTL_SECS,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillTopologyError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillTopologyError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-topology")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let flow = &self.layout.flow;
        if flow.width <= 0.0 || flow.height <= 0.0 {
            return Err(SkillTopologyError::Configuration(
                "layout.flow width and height must be positive".to_string(),
            ));
        }
        if flow.node_width * 3.0 + flow.column_inset * 2.0 > flow.width {
            return Err(SkillTopologyError::Configuration(
                "layout.flow is too narrow for three node columns".to_string(),
            ));
        }
        if self.layout.radar.radius <= 0.0 || self.layout.radar.radius * 2.0 > self.layout.radar.size {
            return Err(SkillTopologyError::Configuration(
                "layout.radar radius must be positive and fit inside the canvas".to_string(),
            ));
        }
        if self.fetch.max_chars == 0 {
            return Err(SkillTopologyError::Configuration("fetch.max_chars must be positive".to_string()));
        }
        if self.store.ttl_secs == 0 || self.store.ttl_secs > MAX_TTL_SECS {
            return Err(SkillTopologyError::Configuration(format!(
                "store.ttl_secs must be between 1 and {}",
                MAX_TTL_SECS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.store.ttl_secs = 120;
        config.output.format = OutputFormat::Html;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.store.ttl_secs, 120);
        assert_eq!(loaded.output.format, OutputFormat::Html);
        assert_eq!(loaded.layout.flow.height, 420.0);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.layout.radar.radius = 400.0;
        config.save_to(&path).unwrap();

        assert!(matches!(Config::load_from(&path), Err(SkillTopologyError::Configuration(_))));
    }

    #[test]
    fn test_unbounded_ttl_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.store.ttl_secs = 10_000_000_000_000;
        config.save_to(&path).unwrap();
        assert!(matches!(Config::load_from(&path), Err(SkillTopologyError::Configuration(_))));

        config.store.ttl_secs = 0;
        config.save_to(&path).unwrap();
        assert!(matches!(Config::load_from(&path), Err(SkillTopologyError::Configuration(_))));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "layout = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(SkillTopologyError::Configuration(_))));
    }
}
