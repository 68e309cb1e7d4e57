//! Per-turn tool registry.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::tool::Tool;
use crate::types::ToolResources;

/// The set of tools offered to one conversation turn.
///
/// Constructed fresh per call from a caller-supplied list; there is no
/// global registry. Lookup is a case-sensitive exact match on the name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut map: HashMap<String, Arc<dyn Tool>> = HashMap::with_capacity(tools.len());
        for tool in tools {
            let name = tool.name().to_string();
            if map.insert(name.clone(), tool).is_some() {
                warn!(tool = %name, "duplicate tool name, keeping the later registration");
            }
        }
        Self { tools: map }
    }

    /// Resolve a tool by name.
    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Build the tool list for an assistant definition.
    ///
    /// Tool resources prepend the matching service-built-in entries, the
    /// function tools follow with their schemas.
    pub fn assistant_tool_payload(
        &self,
        resources: Option<&ToolResources>,
    ) -> Vec<serde_json::Value> {
        let mut payload = Vec::with_capacity(self.tools.len() + 2);
        if let Some(resources) = resources {
            if resources.file_search.is_some() {
                payload.push(serde_json::json!({ "type": "file_search" }));
            }
            if resources.code_interpreter.is_some() {
                payload.push(serde_json::json!({ "type": "code_interpreter" }));
            }
        }
        for tool in self.tools.values() {
            payload.push(serde_json::json!({
                "type": "function",
                "function": {
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.parameters().schema,
                }
            }));
        }
        payload
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}
