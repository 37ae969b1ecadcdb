//! Agent State Dumps
//!
//! Snapshot an agent's full attribute set (excluding live resources -- the
//! inference client and the tool registry) and write it to disk as JSON or
//! YAML. Reloading a snapshot reproduces an equivalent attribute set.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::config::resolve_path;
use crate::types::AgentSnapshot;

use super::Agent;

impl Agent {
    /// Capture the agent's serializable attribute set.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            name: self.name().to_string(),
            system_prompt: self.system_prompt().to_string(),
            settings: self.settings().clone(),
            short_term_memory: self.short_term_memory().to_vec(),
            long_term_memory: self.long_term_memory().to_map(),
            saved_at: Utc::now().to_rfc3339(),
        }
    }

    /// Apply a snapshot, replacing the agent's attributes. The inference
    /// client and tool registry references are untouched.
    pub fn apply_snapshot(&mut self, snapshot: AgentSnapshot) {
        self.set_identity(snapshot.name, snapshot.system_prompt);
        *self.settings_mut() = snapshot.settings;
        self.short_term_memory_mut()
            .replace(snapshot.short_term_memory);
        self.long_term_memory_mut()
            .replace(snapshot.long_term_memory);
    }

    /// Save the agent's state as JSON to its configured `saved_state_path`.
    pub fn save_state(&self) -> Result<()> {
        let path = resolve_path(&self.settings().saved_state_path);
        self.dump_json(&path)?;
        info!("Agent '{}' state saved to {}", self.name(), path);
        Ok(())
    }

    /// Load the agent's state from its configured `saved_state_path`.
    pub fn load_state(&mut self) -> Result<()> {
        let path = resolve_path(&self.settings().saved_state_path);
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read agent state from {}", path))?;
        let snapshot: AgentSnapshot =
            serde_json::from_str(&contents).context("Failed to parse agent state")?;

        self.apply_snapshot(snapshot);
        info!("Agent '{}' state loaded from {}", self.name(), path);
        Ok(())
    }

    /// Dump the agent's attribute set as pretty JSON.
    pub fn dump_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.snapshot())
            .context("Failed to serialize agent snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Dump the agent's attribute set as YAML.
    pub fn dump_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(&self.snapshot())
            .context("Failed to serialize agent snapshot")?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
