//! Mixture of Agents
//!
//! The layered aggregation controller. Each layer invokes every member
//! agent with the same task string, joins the outputs in member order, and
//! feeds the concatenation to the next layer; a designated final agent
//! synthesizes the last layer's output into the returned report.
//!
//! A non-responding member never aborts the pipeline: its slot is filled
//! with a placeholder segment so every layer keeps exactly one segment per
//! member.

use anyhow::{ensure, Result};
use tracing::{error, info, warn};

use crate::agent::Agent;
use crate::types::AgentOutcome;

/// Separator between member segments within a layer.
const LAYER_SEPARATOR: &str = "\n\n";

/// Returned when the final agent fails or produces no text.
const FINAL_FAILURE_NOTICE: &str =
    "Report generation failed: no content produced by the final agent.";

/// Placeholder segment recorded for a member that failed or returned
/// nothing.
fn gap_placeholder(agent_name: &str) -> String {
    format!("[no response from {}]", agent_name)
}

/// Layered mixture-of-agents controller.
pub struct MixtureOfAgents {
    name: String,
    agents: Vec<Agent>,
    layers: u32,
    final_agent: Agent,
    history: Vec<Vec<String>>,
}

impl MixtureOfAgents {
    /// Create a mixture. Rejects a zero layer count and an empty member
    /// list -- both are configuration errors, not panics.
    pub fn new(
        name: impl Into<String>,
        agents: Vec<Agent>,
        layers: u32,
        final_agent: Agent,
    ) -> Result<Self> {
        let name = name.into();
        ensure!(layers >= 1, "mixture '{}' needs at least one layer", name);
        ensure!(
            !agents.is_empty(),
            "mixture '{}' needs at least one member agent",
            name
        );

        info!(
            "Mixture '{}' initialized: {} members, {} layers, final agent '{}'",
            name,
            agents.len(),
            layers,
            final_agent.name()
        );

        Ok(Self {
            name,
            agents,
            layers,
            final_agent,
            history: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> u32 {
        self.layers
    }

    pub fn member_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    /// Per-layer result sequences from past runs, oldest layer first.
    pub fn history(&self) -> &[Vec<String>] {
        &self.history
    }

    /// Run the task through every layer, then through the final agent.
    ///
    /// Members within a layer receive the identical task string and run in
    /// member-list order, strictly sequentially. Each layer's segments are
    /// joined with a double newline and become the next layer's task. The
    /// final agent's text is returned; if it fails or produces nothing, a
    /// fixed degradation notice is returned instead.
    pub async fn run(&mut self, task: &str) -> String {
        info!("Mixture '{}' starting run: {}", self.name, task);
        let mut current_task = task.to_string();

        for layer in 1..=self.layers {
            info!("Processing layer {}/{}", layer, self.layers);
            let mut layer_results = Vec::with_capacity(self.agents.len());

            for agent in self.agents.iter_mut() {
                let segment = match agent.run(&current_task).await {
                    AgentOutcome::Success(text) if !text.trim().is_empty() => {
                        info!("Agent '{}' completed layer {} task", agent.name(), layer);
                        text
                    }
                    AgentOutcome::Success(_) => {
                        warn!(
                            "Agent '{}' returned an empty response; recording gap",
                            agent.name()
                        );
                        gap_placeholder(agent.name())
                    }
                    AgentOutcome::Failure(reason) => {
                        warn!("Agent '{}' failed: {}; recording gap", agent.name(), reason);
                        gap_placeholder(agent.name())
                    }
                };
                layer_results.push(segment);
            }

            current_task = layer_results.join(LAYER_SEPARATOR);
            self.history.push(layer_results);
        }

        info!("Final agent '{}' aggregating results", self.final_agent.name());
        match self.final_agent.run(&current_task).await {
            AgentOutcome::Success(text) if !text.trim().is_empty() => {
                info!("Mixture '{}' run completed", self.name);
                text
            }
            AgentOutcome::Success(_) => {
                error!("Final agent '{}' returned an empty report", self.final_agent.name());
                FINAL_FAILURE_NOTICE.to_string()
            }
            AgentOutcome::Failure(reason) => {
                error!("Final agent '{}' failed: {}", self.final_agent.name(), reason);
                FINAL_FAILURE_NOTICE.to_string()
            }
        }
    }
}
