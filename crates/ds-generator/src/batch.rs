//! Batched fan-out of generation requests.

use crate::traits::{DocGenerator, DocRequest, GeneratedDoc};
use ds_core::config::GeneratorConfig;
use ds_core::DocStyle;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Requests in flight at once.
    pub concurrency: usize,
    /// Pause between consecutive batches.
    pub delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            delay: Duration::from_millis(1000),
        }
    }
}

impl BatchConfig {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            concurrency: config.concurrency.max(1),
            delay: Duration::from_millis(config.batch_delay_ms),
        }
    }
}

/// Generate documentation for every request, `batch.concurrency` at a time.
///
/// Requests are deduplicated by name (first wins). A failed request is
/// logged and left out of the result; the rest keep their input order.
pub async fn generate_all(
    generator: Arc<dyn DocGenerator>,
    requests: Vec<DocRequest>,
    style: DocStyle,
    batch: BatchConfig,
) -> Vec<GeneratedDoc> {
    let mut seen = HashSet::new();
    let requests: Vec<DocRequest> = requests
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .collect();
    if requests.is_empty() {
        return Vec::new();
    }

    let concurrency = batch.concurrency.max(1);
    let batches = requests.len().div_ceil(concurrency);
    info!(
        generator = generator.name(),
        requests = requests.len(),
        batches,
        style = %style,
        "generating documentation"
    );

    let mut slots: Vec<Option<GeneratedDoc>> = vec![None; requests.len()];
    for (n, chunk) in requests.chunks(concurrency).enumerate() {
        if n > 0 && !batch.delay.is_zero() {
            tokio::time::sleep(batch.delay).await;
        }
        debug!(batch = n + 1, of = batches, size = chunk.len(), "starting batch");

        let mut set = JoinSet::new();
        for (offset, request) in chunk.iter().cloned().enumerate() {
            let generator = Arc::clone(&generator);
            let index = n * concurrency + offset;
            set.spawn(async move {
                let result = generator.generate(&request, style).await;
                (index, request.name, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, name, Ok(docstring))) => {
                    slots[index] = Some(GeneratedDoc { name, docstring });
                }
                Ok((_, name, Err(e))) => {
                    warn!(name = %name, error = %e, "documentation generation failed");
                }
                Err(e) => {
                    warn!(error = %e, "generation task did not complete");
                }
            }
        }
    }

    slots.into_iter().flatten().collect()
}

/// Name -> text map in the shape the re-inserter consumes.
pub fn to_doc_map(docs: &[GeneratedDoc]) -> HashMap<String, String> {
    docs.iter()
        .map(|d| (d.name.clone(), d.docstring.clone()))
        .collect()
}
