//! Inference Client
//!
//! Wraps an OpenAI-compatible `/v1/chat/completions` endpoint. Every call is
//! a single blocking round trip: no streaming, no retries.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::types::{
    ChatMessage, InferenceClient, InferenceOptions, InferenceResponse, TokenUsage,
};

/// Inference client for OpenAI-compatible chat completions.
pub struct OpenAiClient {
    api_url: String,
    api_key: String,
    default_model: String,
    max_tokens: u32,
    http: Client,
}

impl OpenAiClient {
    /// Create a new inference client.
    ///
    /// * `api_url` - Base URL for the inference API (e.g. `https://api.openai.com`).
    /// * `api_key` - Bearer credential for the Authorization header.
    /// * `default_model` - Default model identifier (e.g. `gpt-4o`).
    /// * `max_tokens` - Default max tokens per completion.
    pub fn new(api_url: String, api_key: String, default_model: String, max_tokens: u32) -> Self {
        Self {
            api_url,
            api_key,
            default_model,
            max_tokens,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl InferenceClient for OpenAiClient {
    /// Send a chat completion request and return the inference response.
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: Option<InferenceOptions>,
    ) -> Result<InferenceResponse> {
        let model = options
            .as_ref()
            .and_then(|o| o.model.as_deref())
            .unwrap_or(&self.default_model);

        // Newer models (o-series, gpt-5.x, gpt-4.1) use max_completion_tokens
        let uses_completion_tokens = regex::Regex::new(r"^(o[1-9]|gpt-5|gpt-4\.1)")
            .map(|re| re.is_match(model))
            .unwrap_or(false);

        let token_limit = options
            .as_ref()
            .and_then(|o| o.max_tokens)
            .unwrap_or(self.max_tokens);

        let formatted_messages: Vec<Value> = messages.iter().map(format_message).collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": formatted_messages,
            "stream": false,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(token_limit);
        } else {
            body["max_tokens"] = serde_json::json!(token_limit);
        }

        if let Some(ref opts) = options {
            if let Some(temp) = opts.temperature {
                body["temperature"] = serde_json::json!(temp);
            }
        }

        let url = format!("{}/v1/chat/completions", self.api_url);
        let resp = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .context("Inference request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Inference error: {}: {}", status.as_u16(), text);
        }

        let data: Value = resp
            .json()
            .await
            .context("Failed to parse inference response")?;

        let choice = data["choices"]
            .get(0)
            .ok_or_else(|| anyhow::anyhow!("No completion choice returned from inference"))?;

        let usage = TokenUsage {
            prompt_tokens: data["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            completion_tokens: data["usage"]["completion_tokens"].as_u64().unwrap_or(0),
            total_tokens: data["usage"]["total_tokens"].as_u64().unwrap_or(0),
        };

        Ok(InferenceResponse {
            id: data["id"].as_str().unwrap_or("").to_string(),
            model: data["model"].as_str().unwrap_or(model).to_string(),
            text: choice["message"]["content"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            usage,
            finish_reason: choice["finish_reason"]
                .as_str()
                .unwrap_or("stop")
                .to_string(),
        })
    }

    /// Get the configured default model identifier.
    fn default_model(&self) -> String {
        self.default_model.clone()
    }
}

/// Format a ChatMessage into the JSON structure expected by the
/// OpenAI-compatible API.
fn format_message(msg: &ChatMessage) -> Value {
    serde_json::json!({
        "role": msg.role,
        "content": msg.content,
    })
}
