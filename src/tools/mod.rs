//! Tool Registry
//!
//! Name -> callable mapping for the tools agents can invoke outside the
//! text-generation path. Parameter schemas are validated when a tool is
//! registered; arguments are not validated before invocation, so a tool's
//! own error surfaces to the caller as-is.

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ToolError;

/// A registered callable. Receives the keyword-argument object the caller
/// passed and returns an unconstrained JSON value.
pub type ToolHandler = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// A tool entry: declared schema plus the handler behind it.
pub struct RegisteredTool {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    handler: ToolHandler,
}

/// Registry mapping tool names to callables. Constructed once at process
/// start and shared by reference with every agent.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `name`.
    ///
    /// The declared parameter schema is validated here: it must be a JSON
    /// object with `"type": "object"`, an object-valued `properties` map,
    /// and a `required` list (if present) that only names declared
    /// properties. A valid registration overwrites any existing entry
    /// unconditionally -- last registration wins.
    pub fn add_tool(
        &mut self,
        name: &str,
        description: &str,
        parameters: Value,
        handler: ToolHandler,
    ) -> Result<(), ToolError> {
        validate_schema(name, &parameters)?;

        if self.tools.contains_key(name) {
            warn!("Tool '{}' re-registered; previous handler replaced", name);
        }

        self.tools.insert(
            name.to_string(),
            RegisteredTool {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
                handler,
            },
        );

        Ok(())
    }

    /// Execute a tool by exact name.
    ///
    /// An unregistered name returns `Ok` with a descriptive string value --
    /// callers check the value, not an error path. A registered tool is
    /// invoked with `params` as its keyword-argument object; whatever it
    /// returns (or raises) passes through unchanged.
    pub fn execute_tool(&self, name: &str, params: &Value) -> Result<Value> {
        let tool = match self.tools.get(name) {
            Some(tool) => tool,
            None => {
                return Ok(Value::String(format!("tool '{}' is not registered", name)));
            }
        };

        let invocation_id = format!("tc_{}", Uuid::new_v4());
        let start = Instant::now();

        let result = (tool.handler)(params);

        debug!(
            "Tool '{}' invocation {} finished in {}ms",
            tool.name,
            invocation_id,
            start.elapsed().as_millis()
        );

        result
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Check a declared parameter schema at registration time.
fn validate_schema(name: &str, schema: &Value) -> Result<(), ToolError> {
    let invalid = |reason: &str| ToolError::InvalidSchema {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let obj = schema
        .as_object()
        .ok_or_else(|| invalid("schema is not a JSON object"))?;

    if obj.get("type").and_then(Value::as_str) != Some("object") {
        return Err(invalid("schema type must be \"object\""));
    }

    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("schema is missing an object-valued 'properties' map"))?;

    if let Some(required) = obj.get("required") {
        let entries = required
            .as_array()
            .ok_or_else(|| invalid("'required' must be an array"))?;
        for entry in entries {
            let key = entry
                .as_str()
                .ok_or_else(|| invalid("'required' entries must be strings"))?;
            if !properties.contains_key(key) {
                return Err(invalid(&format!(
                    "'required' names undeclared property '{}'",
                    key
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string", "description": "Text to echo back" }
            },
            "required": ["message"]
        })
    }

    #[test]
    fn test_add_tool_last_registration_wins() {
        let mut registry = ToolRegistry::new();

        registry
            .add_tool(
                "echo",
                "Echo v1",
                echo_schema(),
                Box::new(|_| Ok(json!("first"))),
            )
            .unwrap();
        registry
            .add_tool(
                "echo",
                "Echo v2",
                echo_schema(),
                Box::new(|_| Ok(json!("second"))),
            )
            .unwrap();

        assert_eq!(registry.len(), 1);
        let result = registry.execute_tool("echo", &json!({})).unwrap();
        assert_eq!(result, json!("second"));
    }

    #[test]
    fn test_execute_tool_unknown_name_is_descriptive_not_an_error() {
        let registry = ToolRegistry::new();
        let result = registry.execute_tool("missing", &json!({})).unwrap();
        assert_eq!(result, json!("tool 'missing' is not registered"));
    }

    #[test]
    fn test_execute_tool_passes_params_through() {
        let mut registry = ToolRegistry::new();
        registry
            .add_tool(
                "efficiency",
                "Energy efficiency as a percentage",
                json!({
                    "type": "object",
                    "properties": {
                        "consumption": { "type": "number" },
                        "production": { "type": "number" }
                    },
                    "required": ["consumption", "production"]
                }),
                Box::new(|params| {
                    let consumption = params["consumption"]
                        .as_f64()
                        .ok_or_else(|| anyhow::anyhow!("Missing 'consumption' argument"))?;
                    let production = params["production"]
                        .as_f64()
                        .ok_or_else(|| anyhow::anyhow!("Missing 'production' argument"))?;
                    if production == 0.0 {
                        return Ok(json!("Error: production value cannot be zero."));
                    }
                    Ok(json!(format!(
                        "Energy efficiency is {:.2}%.",
                        consumption / production * 100.0
                    )))
                }),
            )
            .unwrap();

        let result = registry
            .execute_tool("efficiency", &json!({ "consumption": 30.0, "production": 120.0 }))
            .unwrap();
        assert_eq!(result, json!("Energy efficiency is 25.00%."));
    }

    #[test]
    fn test_execute_tool_malformed_params_propagate_tool_error() {
        let mut registry = ToolRegistry::new();
        registry
            .add_tool(
                "strict",
                "Requires its argument",
                json!({
                    "type": "object",
                    "properties": { "value": { "type": "number" } },
                    "required": ["value"]
                }),
                Box::new(|params| {
                    params["value"]
                        .as_f64()
                        .map(|v| json!(v * 2.0))
                        .ok_or_else(|| anyhow::anyhow!("Missing 'value' argument"))
                }),
            )
            .unwrap();

        let err = registry.execute_tool("strict", &json!({})).unwrap_err();
        assert!(err.to_string().contains("Missing 'value' argument"));
    }

    #[test]
    fn test_add_tool_rejects_non_object_schema() {
        let mut registry = ToolRegistry::new();
        let err = registry
            .add_tool("bad", "", json!("not a schema"), Box::new(|_| Ok(json!(null))))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidSchema { .. }));
    }

    #[test]
    fn test_add_tool_rejects_missing_properties() {
        let mut registry = ToolRegistry::new();
        let err = registry
            .add_tool(
                "bad",
                "",
                json!({ "type": "object" }),
                Box::new(|_| Ok(json!(null))),
            )
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidSchema { .. }));
    }

    #[test]
    fn test_add_tool_rejects_undeclared_required_key() {
        let mut registry = ToolRegistry::new();
        let err = registry
            .add_tool(
                "bad",
                "",
                json!({
                    "type": "object",
                    "properties": { "a": { "type": "string" } },
                    "required": ["a", "b"]
                }),
                Box::new(|_| Ok(json!(null))),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ToolError::InvalidSchema {
                name: "bad".to_string(),
                reason: "'required' names undeclared property 'b'".to_string(),
            }
        );
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .add_tool(
                    name,
                    "",
                    json!({ "type": "object", "properties": {} }),
                    Box::new(|_| Ok(json!(null))),
                )
                .unwrap();
        }
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }
}
