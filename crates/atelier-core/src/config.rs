//! Workspace configuration.
//!
//! Configuration priority: ~/.config/atelier/config.toml > environment
//! variables, mirroring how the interaction agents resolve their credentials.

use crate::error::{AtelierError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI connection settings for the generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    pub deployment: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Root configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtelierConfig {
    pub azure: AzureOpenAiConfig,
}

impl AtelierConfig {
    /// Loads configuration with file-then-env priority.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Self::from_env()
    }

    /// Reads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Reads configuration from `AZURE_OPENAI_*` environment variables.
    ///
    /// `AZURE_OPENAI_API_VERSION` is optional and defaults to the current
    /// preview version; the other three variables are required.
    pub fn from_env() -> Result<Self> {
        let endpoint = require_env("AZURE_OPENAI_ENDPOINT")?;
        let api_key = require_env("AZURE_OPENAI_API_KEY")?;
        let deployment = require_env("AZURE_OPENAI_MODEL_NAME")?;
        let api_version =
            env::var("AZURE_OPENAI_API_VERSION").unwrap_or_else(|_| default_api_version());

        Ok(Self {
            azure: AzureOpenAiConfig {
                endpoint,
                api_key,
                api_version,
                deployment,
            },
        })
    }

    /// The default config file location (~/.config/atelier/config.toml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("atelier").join("config.toml"))
    }
}

fn require_env(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| {
        AtelierError::config(format!(
            "{name} not found in ~/.config/atelier/config.toml or environment variables"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[azure]
endpoint = "https://example.openai.azure.com"
api_key = "secret"
deployment = "gpt-4o"
"#
        )
        .unwrap();

        let config = AtelierConfig::from_file(&path).unwrap();
        assert_eq!(config.azure.endpoint, "https://example.openai.azure.com");
        assert_eq!(config.azure.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.azure.deployment, "gpt-4o");
    }

    #[test]
    fn test_from_file_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[azure]\nendpoint = \"x\"\n").unwrap();

        let err = AtelierConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, AtelierError::Serialization { .. }));
    }
}
