//! Agent Module
//!
//! The core agent: a fixed system prompt plus model settings, short- and
//! long-term memory, tool delegation, and state snapshots.

pub mod memory;
pub mod state;

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::tools::ToolRegistry;
use crate::types::{
    AgentOutcome, AgentSettings, ChatMessage, InferenceClient, InferenceOptions,
};

use self::memory::{LongTermMemory, ShortTermMemory};

/// A customizable agent wrapping a system prompt and a text-generation
/// backend. Created at configuration time, mutated on each `run`,
/// process-lifetime.
pub struct Agent {
    name: String,
    system_prompt: String,
    settings: AgentSettings,
    short_term_memory: ShortTermMemory,
    long_term_memory: LongTermMemory,
    tools: Arc<ToolRegistry>,
    inference: Arc<dyn InferenceClient>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("system_prompt", &self.system_prompt)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        settings: AgentSettings,
        inference: Arc<dyn InferenceClient>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        let name = name.into();
        info!("Agent '{}' initialized with model {}", name, settings.model);

        Self {
            name,
            system_prompt: system_prompt.into(),
            settings,
            short_term_memory: ShortTermMemory::new(),
            long_term_memory: LongTermMemory::new(),
            tools,
            inference,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Execute a task: record it in short-term memory, perform one blocking
    /// inference round trip, and return the trimmed text.
    ///
    /// A transport or API error is caught here, logged, and reported as
    /// `Failure(reason)` -- never retried (the `retry_attempts` setting is
    /// dead configuration) and never propagated as an `Err`.
    pub async fn run(&mut self, task: &str) -> AgentOutcome {
        info!("Agent '{}' executing task", self.name);
        self.short_term_memory.record(task);

        let messages = vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(task),
        ];
        let options = InferenceOptions {
            model: Some(self.settings.model.clone()),
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
        };

        match self.inference.chat(messages, Some(options)).await {
            Ok(response) => AgentOutcome::Success(response.text.trim().to_string()),
            Err(err) => {
                warn!("Agent '{}' inference call failed: {:#}", self.name, err);
                AgentOutcome::Failure(err.to_string())
            }
        }
    }

    /// Execute a registered tool through the shared registry.
    ///
    /// An unregistered name yields a descriptive string value; a tool's own
    /// error propagates as `Err` (see the registry contract).
    pub fn execute_tool(&self, name: &str, params: &Value) -> anyhow::Result<Value> {
        self.tools.execute_tool(name, params)
    }

    /// Store a value in long-term memory.
    pub fn remember(&mut self, key: &str, value: Value) {
        self.long_term_memory.remember(key, value);
    }

    /// Look up a long-term memory value.
    pub fn recall(&self, key: &str) -> Option<&Value> {
        self.long_term_memory.recall(key)
    }

    /// Ingest documents into long-term memory under the `documents` key.
    pub fn ingest_docs(&mut self, docs: Vec<String>) {
        info!("Agent '{}' ingesting {} documents", self.name, docs.len());
        self.long_term_memory.ingest_docs(docs);
    }

    /// Tasks this agent has executed, oldest first.
    pub fn task_history(&self) -> &[String] {
        self.short_term_memory.tasks()
    }

    pub(crate) fn short_term_memory(&self) -> &ShortTermMemory {
        &self.short_term_memory
    }

    pub(crate) fn short_term_memory_mut(&mut self) -> &mut ShortTermMemory {
        &mut self.short_term_memory
    }

    pub(crate) fn long_term_memory(&self) -> &LongTermMemory {
        &self.long_term_memory
    }

    pub(crate) fn long_term_memory_mut(&mut self) -> &mut LongTermMemory {
        &mut self.long_term_memory
    }

    pub(crate) fn settings_mut(&mut self) -> &mut AgentSettings {
        &mut self.settings
    }

    pub(crate) fn set_identity(&mut self, name: String, system_prompt: String) {
        self.name = name;
        self.system_prompt = system_prompt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::types::{InferenceResponse, TokenUsage};

    /// Stub client that always returns the same text.
    struct FixedClient {
        reply: String,
    }

    #[async_trait]
    impl InferenceClient for FixedClient {
        async fn chat(
            &self,
            _messages: Vec<ChatMessage>,
            _options: Option<InferenceOptions>,
        ) -> anyhow::Result<InferenceResponse> {
            Ok(InferenceResponse {
                id: "resp-1".to_string(),
                model: "stub".to_string(),
                text: self.reply.clone(),
                usage: TokenUsage::default(),
                finish_reason: "stop".to_string(),
            })
        }

        fn default_model(&self) -> String {
            "stub".to_string()
        }
    }

    /// Stub client that always fails.
    struct FailingClient;

    #[async_trait]
    impl InferenceClient for FailingClient {
        async fn chat(
            &self,
            _messages: Vec<ChatMessage>,
            _options: Option<InferenceOptions>,
        ) -> anyhow::Result<InferenceResponse> {
            Err(anyhow!("connection refused"))
        }

        fn default_model(&self) -> String {
            "stub".to_string()
        }
    }

    fn test_agent(client: Arc<dyn InferenceClient>) -> Agent {
        Agent::new(
            "tester",
            "You are a test agent.",
            AgentSettings::default(),
            client,
            Arc::new(ToolRegistry::new()),
        )
    }

    #[tokio::test]
    async fn test_run_trims_and_records_task() {
        let client = Arc::new(FixedClient {
            reply: "  the answer  \n".to_string(),
        });
        let mut agent = test_agent(client);

        let outcome = agent.run("What is the answer?").await;
        assert_eq!(outcome, AgentOutcome::Success("the answer".to_string()));
        assert_eq!(agent.task_history(), ["What is the answer?"]);
    }

    #[tokio::test]
    async fn test_run_converts_errors_to_failure() {
        let mut agent = test_agent(Arc::new(FailingClient));

        let outcome = agent.run("anything").await;
        match outcome {
            AgentOutcome::Failure(reason) => assert!(reason.contains("connection refused")),
            AgentOutcome::Success(_) => panic!("expected a failure outcome"),
        }
        // The task is recorded even when the call fails.
        assert_eq!(agent.task_history().len(), 1);
    }

    #[test]
    fn test_long_term_memory_roundtrip() {
        let mut agent = test_agent(Arc::new(FailingClient));

        agent.remember("ticker", json!("TSLA"));
        assert_eq!(agent.recall("ticker"), Some(&json!("TSLA")));
        assert_eq!(agent.recall("absent"), None);

        agent.ingest_docs(vec!["report-2025.txt".to_string()]);
        assert_eq!(agent.recall("documents"), Some(&json!(["report-2025.txt"])));
    }

    #[test]
    fn test_execute_tool_delegates_to_registry() {
        let mut registry = ToolRegistry::new();
        registry
            .add_tool(
                "ping",
                "Reply with pong",
                json!({ "type": "object", "properties": {} }),
                Box::new(|_| Ok(json!("pong"))),
            )
            .unwrap();

        let agent = Agent::new(
            "tester",
            "prompt",
            AgentSettings::default(),
            Arc::new(FailingClient),
            Arc::new(registry),
        );

        assert_eq!(agent.execute_tool("ping", &json!({})).unwrap(), json!("pong"));
        assert_eq!(
            agent.execute_tool("gone", &json!({})).unwrap(),
            json!("tool 'gone' is not registered")
        );
    }
}
