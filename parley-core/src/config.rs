//! Settings loaded from a TOML file.
//!
//! Non-sensitive configuration lives in the XDG config directory
//! (`~/.config/parley/config.toml`). A commented default file is written on
//! first run. `PARLEY_CONFIG` overrides the file location, which the tests
//! use to run against a temp dir.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# parley configuration file
# Located at: ~/.config/parley/config.toml
#
# Data files (knowledge corpus, session logs, uploads) live under the
# platform data dir, overridable with PARLEY_DATA_DIR.

[gateway]
host = "127.0.0.1"
port = 5000

# The completion backend is any server speaking the OpenAI completions API,
# e.g. llama.cpp's llama-server:
#   llama-server -m mistral-7b-instruct-v0.1.Q4_K_M.gguf --port 8080
[inference]
base_url = "http://127.0.0.1:8080"
model = "mistral-7b-instruct"
max_tokens = 150
temperature = 0.7
timeout_secs = 120
# api_key = ""

[learning]
fetch_timeout_secs = 15
min_extracted_chars = 20
"#;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    MissingConfigDir,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write default config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Application settings, deserialized from the TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub inference: InferenceSettings,
    pub learning: LearningSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub host: String,
    pub port: u16,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Settings for the external completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub base_url: String,
    pub model: String,
    /// Maximum generated tokens per completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout for completion calls.
    pub timeout_secs: u64,
    /// Optional bearer token, for backends that require one.
    pub api_key: Option<String>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            model: "mistral-7b-instruct".to_string(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: 120,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningSettings {
    /// Timeout for `/learn-url` page fetches.
    pub fetch_timeout_secs: u64,
    /// Extracted page text shorter than this is rejected.
    pub min_extracted_chars: usize,
}

impl Default for LearningSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 15,
            min_extracted_chars: 20,
        }
    }
}

impl Settings {
    /// Path to the config file (`PARLEY_CONFIG` or the XDG default).
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(path) = std::env::var("PARLEY_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or(SettingsError::MissingConfigDir)?;
        Ok(dir.join("parley").join("config.toml"))
    }

    /// Load settings, writing the commented default file if none exists.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::config_path()?;

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                    path: path.clone(),
                    source,
                })?;
            }
            fs::write(&path, DEFAULT_CONFIG_TOML).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!("created default config file at {}", path.display());
        }

        let raw = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| SettingsError::Parse { path, source })
    }

    /// Gateway bind address, `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }
}
