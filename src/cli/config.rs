//! Configuration management for textbook-qa
//!
//! TOML configuration with defaults and validation.
//! Location: ~/.textbook-qa/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{QaError, Result};
use crate::rag::retrieval::RetrievalConfig;
use crate::rag::synthesis::SynthesisConfig;
use crate::rag::PipelineConfig;
use crate::session::SessionConfig;

/// Complete configuration for textbook-qa
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub retrieval: RetrievalConfig,
    pub synthesis: SynthesisConfig,
    pub session: SessionConfig,
    pub repl: ReplConfig,
}

/// Interactive front-end configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub history_file: String,
    /// Print related passages under every answer
    pub show_passages: bool,
    pub color_output: bool,
    pub default_verbosity: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_file: "~/.textbook-qa/history".to_string(),
            show_passages: true,
            color_output: true,
            default_verbosity: "normal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QaError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| QaError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".textbook-qa").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.retrieval.max_passages == 0 {
            return Err(QaError::ConfigError(
                "max_passages must be greater than 0".to_string(),
            ));
        }

        let synthesis = &self.synthesis;
        if synthesis.answer_excerpt_chars == 0 || synthesis.context_excerpt_chars == 0 {
            return Err(QaError::ConfigError(
                "excerpt lengths must be greater than 0".to_string(),
            ));
        }

        let confidences = [
            ("no_match_confidence", synthesis.no_match_confidence),
            ("fallback_base_confidence", synthesis.fallback_base_confidence),
            ("fallback_step_confidence", synthesis.fallback_step_confidence),
            ("fallback_max_confidence", synthesis.fallback_max_confidence),
        ];
        for (name, value) in confidences {
            check_unit_interval(name, value)?;
        }

        for rule in &synthesis.rules {
            if rule.triggers.is_empty() {
                return Err(QaError::ConfigError(format!(
                    "rule '{}' has no triggers",
                    rule.name
                )));
            }
            if rule.triggers.iter().any(|t| t != &t.to_lowercase()) {
                return Err(QaError::ConfigError(format!(
                    "rule '{}' triggers must be lower-case",
                    rule.name
                )));
            }
            check_unit_interval(&format!("rule '{}' confidence", rule.name), rule.confidence)?;
        }

        match self.repl.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(QaError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.repl.default_verbosity
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| QaError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| QaError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| QaError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Retrieval and synthesis settings bundled for the pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            retrieval: self.retrieval.clone(),
            synthesis: self.synthesis.clone(),
        }
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// REPL history file path
    pub fn history_path(&self) -> PathBuf {
        Self::expand_path(&self.repl.history_file)
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(QaError::ConfigError(format!(
            "{} must be between 0.0 and 1.0",
            name
        )));
    }
    Ok(())
}
