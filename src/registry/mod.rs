//! Agent Registry
//!
//! An explicit blueprint registry: names map to agent definitions, and
//! `build` instantiates a fresh agent from a blueprint on every call. The
//! registry is constructed once at process start and passed by reference to
//! consumers -- there is no process-global state.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::agent::Agent;
use crate::tools::ToolRegistry;
use crate::types::{AgentBlueprint, InferenceClient};

#[derive(Default)]
pub struct AgentRegistry {
    blueprints: HashMap<String, AgentBlueprint>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blueprint under its name, replacing any existing entry.
    pub fn register(&mut self, blueprint: AgentBlueprint) {
        info!("Registered agent blueprint '{}'", blueprint.name);
        self.blueprints.insert(blueprint.name.clone(), blueprint);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    /// Registered blueprint names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blueprints.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Instantiate a fresh agent from the named blueprint.
    pub fn build(
        &self,
        name: &str,
        inference: Arc<dyn InferenceClient>,
        tools: Arc<ToolRegistry>,
    ) -> Result<Agent> {
        let blueprint = match self.blueprints.get(name) {
            Some(blueprint) => blueprint,
            None => bail!("agent '{}' not found in registry", name),
        };

        Ok(Agent::new(
            blueprint.name.clone(),
            blueprint.system_prompt.clone(),
            blueprint.settings.clone(),
            inference,
            tools,
        ))
    }
}
