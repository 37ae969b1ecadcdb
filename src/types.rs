//! Trove - Type Definitions
//!
//! Shared types for the mixture-of-agents runtime: chat messages, inference
//! options and responses, agent settings, snapshots and outcomes, crate
//! configuration, and the declarative pipeline definition.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ─── Inference ───────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InferenceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResponse {
    pub id: String,
    pub model: String,
    pub text: String,
    pub usage: TokenUsage,
    pub finish_reason: String,
}

/// One blocking round trip to the text-generation endpoint.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: Option<InferenceOptions>,
    ) -> anyhow::Result<InferenceResponse>;

    fn default_model(&self) -> String;
}

// ─── Agent ───────────────────────────────────────────────────────

/// Per-agent model configuration.
///
/// `retry_attempts` is carried for state-dump compatibility but is not
/// consulted by any call path: a failed inference call is reported as a
/// `Failure` outcome, never retried.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct AgentSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub user_name: String,
    pub retry_attempts: u32,
    pub saved_state_path: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            max_tokens: 500,
            user_name: "default_user".to_string(),
            retry_attempts: 1,
            saved_state_path: "agent_state.json".to_string(),
        }
    }
}

/// The result of one agent run.
///
/// External-call failures are caught at the agent boundary and reported as
/// `Failure(reason)`; the aggregator branches on the tag rather than on
/// emptiness of the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentOutcome {
    Success(String),
    Failure(String),
}

impl AgentOutcome {
    /// The produced text, if the run succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            AgentOutcome::Success(text) => Some(text),
            AgentOutcome::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AgentOutcome::Success(_))
    }
}

/// Serializable mirror of an agent's full attribute set, excluding live
/// resources (the inference client and the tool registry).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSnapshot {
    pub name: String,
    pub system_prompt: String,
    pub settings: AgentSettings,
    pub short_term_memory: Vec<String>,
    pub long_term_memory: HashMap<String, serde_json::Value>,
    pub saved_at: String,
}

// ─── Pipeline ────────────────────────────────────────────────────

/// A registered agent definition. The agent registry instantiates a fresh
/// agent from a blueprint on every build.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentBlueprint {
    pub name: String,
    pub system_prompt: String,
    #[serde(default)]
    pub settings: AgentSettings,
}

/// Declarative description of a mixture run, loaded from a JSON file by the
/// CLI: member blueprints, layer count, and the final aggregating blueprint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub name: String,
    pub layers: u32,
    pub agents: Vec<AgentBlueprint>,
    pub final_agent: AgentBlueprint,
}

// ─── Configuration ───────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TroveConfig {
    pub name: String,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub report_dir: String,
    pub log_level: LogLevel,
    pub version: String,
}

/// Returns a default `TroveConfig`. Fields with no sensible default are set
/// to empty strings so callers can override them.
pub fn default_config() -> TroveConfig {
    TroveConfig {
        name: String::new(),
        api_url: "https://api.openai.com".to_string(),
        api_key: String::new(),
        model: "gpt-4o".to_string(),
        temperature: 0.1,
        max_tokens: 500,
        report_dir: "~/.trove/reports".to_string(),
        log_level: LogLevel::Info,
        version: "0.1.0".to_string(),
    }
}
