//! Configuration loading and validation

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::llm::GenerationConfig;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main configuration structure loaded from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Config::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the config directory path (~/.config/smarttravel)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("smarttravel"))
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Resolve the API key: config file value first, then the environment
    pub fn api_key(&self) -> Result<String> {
        if let Some(ref key) = self.llm.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .with_context(|| format!("{} environment variable is required", API_KEY_ENV))
    }

    /// Sampling parameters for the model client
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.llm.temperature,
            top_p: self.llm.top_p,
            max_output_tokens: self.llm.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Max retries for transient API failures
    pub max_retries: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout_secs: 30,
        }
    }
}

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model to use
    pub model: String,
    /// API key override; the environment takes over when unset
    pub api_key: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            api_key: None,
            temperature: 0.7,
            top_p: 0.95,
            max_output_tokens: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.general.max_retries, 3);
        assert_eq!(config.general.timeout_secs, 30);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[general]
max_retries = 5
timeout_secs = 60

[llm]
model = "gemini-1.5-flash"
temperature = 0.3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.general.max_retries, 5);
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.temperature, 0.3);
        // Unspecified fields keep their defaults
        assert_eq!(config.llm.top_p, 0.95);
    }

    #[test]
    fn test_api_key_from_config() {
        let mut config = Config::default();
        config.llm.api_key = Some("file-key".to_string());
        assert_eq!(config.api_key().unwrap(), "file-key");
    }
}
