//! Agent Memory
//!
//! Per-agent mutable state: an ordered log of prior task strings and a
//! key-value store for anything the agent should keep across runs. Both are
//! instance-local -- no state crosses agents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which `ingest_docs` stores its document list.
const DOCUMENTS_KEY: &str = "documents";

/// Ordered sequence of prior task strings, appended on every run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortTermMemory {
    tasks: Vec<String>,
}

impl ShortTermMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, task: &str) {
        self.tasks.push(task.to_string());
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn replace(&mut self, tasks: Vec<String>) {
        self.tasks = tasks;
    }

    pub(crate) fn to_vec(&self) -> Vec<String> {
        self.tasks.clone()
    }
}

/// Key-value store for long-lived agent state. Values are schema-free JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LongTermMemory {
    entries: HashMap<String, Value>,
}

impl LongTermMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn recall(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn forget(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Store a document list under the fixed `documents` key.
    pub fn ingest_docs(&mut self, docs: Vec<String>) {
        self.remember(DOCUMENTS_KEY, Value::from(docs));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn replace(&mut self, entries: HashMap<String, Value>) {
        self.entries = entries;
    }

    pub(crate) fn to_map(&self) -> HashMap<String, Value> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_term_memory_preserves_order() {
        let mut memory = ShortTermMemory::new();
        memory.record("first");
        memory.record("second");
        memory.record("first");

        assert_eq!(memory.tasks(), ["first", "second", "first"]);
        assert_eq!(memory.len(), 3);
    }

    #[test]
    fn test_long_term_memory_overwrite_and_forget() {
        let mut memory = LongTermMemory::new();
        memory.remember("k", json!(1));
        memory.remember("k", json!(2));
        assert_eq!(memory.recall("k"), Some(&json!(2)));

        assert_eq!(memory.forget("k"), Some(json!(2)));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_ingest_docs_stores_under_documents_key() {
        let mut memory = LongTermMemory::new();
        memory.ingest_docs(vec!["a.txt".to_string(), "b.txt".to_string()]);
        assert_eq!(memory.recall("documents"), Some(&json!(["a.txt", "b.txt"])));
    }
}
