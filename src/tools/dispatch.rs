//! Batch dispatch of tool calls.
//!
//! One paused run hands over a batch of tool calls; every call gets exactly
//! one textual output record, no matter how it fails. The remote run cannot
//! make progress on a call id it never received an output for, so failures
//! are recorded, not raised.

use futures::future;
use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::registry::ToolRegistry;
use super::tool::ArgumentCodec;
use crate::types::{RuntimeContext, ToolCallRequest, ToolOutput};

/// Execute a batch of tool calls concurrently and collect their outputs.
///
/// All calls run in parallel; the batch is complete before returning so
/// outputs are always submitted together, never piecemeal.
pub async fn dispatch_tool_calls(
    registry: &ToolRegistry,
    calls: &[ToolCallRequest],
    ctx: &RuntimeContext,
) -> Vec<ToolOutput> {
    debug!(count = calls.len(), "dispatching tool calls");
    let futures = calls.iter().map(|call| handle_tool_call(registry, call, ctx));
    future::join_all(futures).await
}

async fn handle_tool_call(
    registry: &ToolRegistry,
    call: &ToolCallRequest,
    ctx: &RuntimeContext,
) -> ToolOutput {
    let name = &call.function.name;
    let Some(tool) = registry.resolve(name) else {
        warn!(tool = %name, call_id = %call.id, "tool not found");
        return ToolOutput {
            tool_call_id: call.id.clone(),
            output: format!("Tool not found: {name}"),
        };
    };

    let args = match decode_arguments(tool.codec(), &call.function.arguments) {
        Ok(args) => args,
        Err(message) => {
            warn!(tool = %name, call_id = %call.id, %message, "argument decode failed");
            return ToolOutput {
                tool_call_id: call.id.clone(),
                output: format!("Invalid arguments for tool {name}: {message}"),
            };
        }
    };

    match tool.execute(&args, ctx).await {
        Ok(value) => normalize_output(name, &call.id, value),
        Err(err) => {
            warn!(tool = %name, call_id = %call.id, error = %err, "tool execution failed");
            ToolOutput {
                tool_call_id: call.id.clone(),
                output: err.to_string(),
            }
        }
    }
}

fn decode_arguments(codec: ArgumentCodec, raw: &str) -> Result<ToolArguments, String> {
    match codec {
        ArgumentCodec::Json => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(ToolArguments::new(serde_json::json!({})));
            }
            serde_json::from_str(trimmed)
                .map(ToolArguments::new)
                .map_err(|e| e.to_string())
        }
        ArgumentCodec::Raw => Ok(ToolArguments::new(serde_json::Value::String(
            raw.to_string(),
        ))),
    }
}

fn normalize_output(name: &str, call_id: &str, value: serde_json::Value) -> ToolOutput {
    let output = match value {
        serde_json::Value::Null => format!("No output from tool: {name}"),
        serde_json::Value::String(text) => text,
        other => serde_json::to_string(&other)
            .unwrap_or_else(|e| format!("Error processing tool output: {e}")),
    };
    ToolOutput {
        tool_call_id: call_id.to_string(),
        output,
    }
}
