//! Application state shared across all handlers.

use ds_core::{DocsmithConfig, Result};
use ds_generator::{BatchConfig, DocGenerator, HttpGenerator, TemplateGenerator};
use ds_history::{FileHistoryStore, HistoryStore, MemoryHistoryStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DocsmithConfig>,
    pub generator: Arc<dyn DocGenerator>,
    pub history: Arc<dyn HistoryStore>,
    pub batch: BatchConfig,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Default config, template generator, in-memory history.
    pub fn new() -> Self {
        let config = DocsmithConfig::default();
        Self {
            batch: BatchConfig::from_config(&config.generator),
            config: Arc::new(config),
            generator: Arc::new(TemplateGenerator::new()),
            history: Arc::new(MemoryHistoryStore::new()),
            start_time: std::time::Instant::now(),
        }
    }

    /// Wire up collaborators from config. Without an API key the template
    /// generator is used.
    pub fn from_config(config: DocsmithConfig) -> Result<Self> {
        let generator: Arc<dyn DocGenerator> = if config.generator.api_key.is_some() {
            info!(endpoint = %config.generator.endpoint, model = %config.generator.model, "using HTTP generator");
            Arc::new(HttpGenerator::from_config(&config.generator)?)
        } else {
            warn!("no API key configured, generating template documentation");
            Arc::new(TemplateGenerator::new())
        };
        info!(dir = %config.history.dir.display(), "history store");
        let history = Arc::new(FileHistoryStore::new(config.history.dir.clone()));

        Ok(Self {
            batch: BatchConfig::from_config(&config.generator),
            config: Arc::new(config),
            generator,
            history,
            start_time: std::time::Instant::now(),
        })
    }

    pub fn with_generator(mut self, generator: Arc<dyn DocGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = history;
        self
    }

    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
