//! Configuration management for CareGP Chat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChatError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Language-model provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Knowledge document settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    /// Session log settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Google Gemini provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Client timeout in seconds; 0 disables the timeout
    #[serde(default)]
    pub timeout_seconds: u64,

    /// API credential, normally taken from the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            timeout_seconds: 0,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Knowledge document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Path of the knowledge document
    #[serde(default = "default_knowledge_path")]
    pub path: PathBuf,
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from("knowledge.txt")
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
        }
    }
}

/// Session log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON session log
    #[serde(default = "default_session_log")]
    pub session_log: PathBuf,

    /// Maximum number of sessions to retain; unset keeps everything
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

fn default_session_log() -> PathBuf {
    PathBuf::from("user_sessions.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_log: default_session_log(),
            max_sessions: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(ChatError::from)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(ChatError::from)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(host) = std::env::var("CAREGP_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("CAREGP_PORT") {
            if let Ok(value) = port.parse() {
                self.server.port = value;
            } else {
                tracing::warn!("Invalid CAREGP_PORT: {}", port);
            }
        }

        if let Ok(model) = std::env::var("CAREGP_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("CAREGP_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(path) = std::env::var("CAREGP_KNOWLEDGE_PATH") {
            self.knowledge.path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("CAREGP_SESSION_LOG") {
            self.storage.session_log = PathBuf::from(path);
        }

        if let Ok(max_sessions) = std::env::var("CAREGP_MAX_SESSIONS") {
            if let Ok(value) = max_sessions.parse() {
                self.storage.max_sessions = Some(value);
            } else {
                tracing::warn!("Invalid CAREGP_MAX_SESSIONS: {}", max_sessions);
            }
        }

        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty());
        if api_key.is_some() {
            self.provider.gemini.api_key = api_key;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let crate::cli::Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the configuration
    ///
    /// A missing API credential is not a validation failure: the gateway
    /// starts and model calls fail at request time.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(ChatError::Config("server.host cannot be empty".to_string()).into());
        }

        if self.server.port == 0 {
            return Err(
                ChatError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        let valid_providers = ["gemini"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(ChatError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.gemini.model.is_empty() {
            return Err(
                ChatError::Config("provider.gemini.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.gemini.api_base.is_empty() {
            return Err(
                ChatError::Config("provider.gemini.api_base cannot be empty".to_string()).into(),
            );
        }

        if self.knowledge.path.as_os_str().is_empty() {
            return Err(ChatError::Config("knowledge.path cannot be empty".to_string()).into());
        }

        if self.storage.session_log.as_os_str().is_empty() {
            return Err(
                ChatError::Config("storage.session_log cannot be empty".to_string()).into(),
            );
        }

        if self.storage.max_sessions == Some(0) {
            return Err(ChatError::Config(
                "storage.max_sessions must be greater than 0 when set".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
