use crate::error::{DsError, Result};
use crate::types::DocStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsmithConfig {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Settings for the documentation-generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// OpenAI-compatible chat completions URL.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Maximum requests in flight per batch.
    pub concurrency: usize,
    /// Pause between batches.
    pub batch_delay_ms: u64,
    pub default_style: Option<DocStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4o-mini".into(),
            api_key: None,
            temperature: 0.2,
            timeout_secs: 60,
            concurrency: 5,
            batch_delay_ms: 1000,
            default_style: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docsmith")
            .join("history");
        Self { dir }
    }
}

impl DocsmithConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DsError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults; then apply env overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `DOCSMITH_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = get("DOCSMITH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("DOCSMITH_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| DsError::Config(format!("invalid DOCSMITH_PORT: {port}")))?;
        }
        if let Some(key) = get("DOCSMITH_API_KEY") {
            self.generator.api_key = Some(key);
        }
        if let Some(endpoint) = get("DOCSMITH_ENDPOINT") {
            self.generator.endpoint = endpoint;
        }
        if let Some(model) = get("DOCSMITH_MODEL") {
            self.generator.model = model;
        }
        if let Some(dir) = get("DOCSMITH_HISTORY_DIR") {
            self.history.dir = PathBuf::from(dir);
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.generator.concurrency == 0 {
            return Err(DsError::Config("generator.concurrency must be at least 1".into()));
        }
        if self.generator.endpoint.trim().is_empty() {
            return Err(DsError::Config("generator.endpoint must not be empty".into()));
        }
        Ok(())
    }
}
