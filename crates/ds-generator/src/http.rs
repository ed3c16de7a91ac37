//! Generator backed by an OpenAI-compatible chat completions endpoint.

use crate::prompt::{build_prompt, clean_response, SYSTEM_PROMPT};
use crate::traits::{DocGenerator, DocRequest};
use async_trait::async_trait;
use ds_core::config::GeneratorConfig;
use ds_core::{DocStyle, DsError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl HttpGenerator {
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DsError::Generator(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull the first choice's message text out of a chat completions body.
pub fn parse_chat_response(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| DsError::Generator("response contained no message content".into()))
}

#[async_trait]
impl DocGenerator for HttpGenerator {
    async fn generate(&self, request: &DocRequest, style: DocStyle) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user", content: build_prompt(request, style) },
            ],
            temperature: self.temperature,
        };

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| DsError::Generator(format!("request to {} failed: {e}", self.endpoint)))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| DsError::Generator(format!("failed to read response body: {e}")))?;
        if !status.is_success() {
            return Err(DsError::Generator(format!("{} returned {status}: {text}", self.endpoint)));
        }

        let content = parse_chat_response(&text)?;
        debug!(name = %request.name, chars = content.len(), "generated documentation");
        Ok(clean_response(&content))
    }

    fn name(&self) -> &str {
        "http"
    }
}
