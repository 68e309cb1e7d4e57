//! Wire types for the remote assistants service.
//!
//! Every remote-owned entity here is a snapshot: the service mutates runs
//! and threads on its side, and callers replace their copy wholesale after
//! each fetch rather than patching fields in place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a remote run.
///
/// Statuses the service may add later deserialize as [`RunStatus::Unknown`]
/// so the poll loop keeps going instead of failing on new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Statuses the service resolves on its own; polling will move past them.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Queued | Self::InProgress | Self::Cancelling)
    }

    /// Statuses the run can never leave.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Failed | Self::Completed | Self::Incomplete | Self::Expired
        )
    }
}

/// One execution attempt of an assistant against a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    #[serde(default)]
    pub assistant_id: Option<String>,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_action: Option<RequiredAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<RunError>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Run {
    /// Tool calls the run is currently paused on, empty when not paused.
    pub fn pending_tool_calls(&self) -> &[ToolCallRequest] {
        match &self.required_action {
            Some(RequiredAction::SubmitToolOutputs {
                submit_tool_outputs,
            }) => &submit_tool_outputs.tool_calls,
            _ => &[],
        }
    }
}

/// Failure detail attached to a failed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Action the service requires before a paused run can continue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredAction {
    SubmitToolOutputs {
        submit_tool_outputs: PendingToolCalls,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingToolCalls {
    pub tool_calls: Vec<ToolCallRequest>,
}

/// A request, emitted by a run, to execute a named local tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    /// Raw argument payload as produced by the model, usually JSON text.
    pub arguments: String,
}

/// The textual result submitted back for one tool call id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

/// A message in a thread, as returned by the service (newest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl Message {
    /// The value of the first content block when (and only when) it is text.
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(MessageContent::Text { text }) => Some(&text.value),
            _ => None,
        }
    }
}

/// One content block of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text {
        text: TextValue,
    },
    ImageFile {
        image_file: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
}

/// A message supplied by the caller when seeding or extending a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageInput {
    pub role: String,
    pub content: String,
}

impl MessageInput {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// A remote thread (ordered message log).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A remote assistant definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
}

/// Non-function tool resources attached to an assistant.
///
/// Their presence augments the assistant's tool list with the matching
/// built-in service tool (`file_search` / `code_interpreter`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_search: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_interpreter: Option<serde_json::Value>,
}

/// Fixed identifying metadata threaded unchanged through one conversation
/// turn's tool executions. Created by the caller, never mutated by the loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeContext {
    pub message_id: String,
    pub client_id: String,
    pub company_id: String,
    pub agent_id: String,
}

impl RuntimeContext {
    /// Flatten into the string map shape the service accepts as metadata.
    pub fn to_metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("messageId".to_string(), self.message_id.clone()),
            ("clientId".to_string(), self.client_id.clone()),
            ("companyId".to_string(), self.company_id.clone()),
            ("agentId".to_string(), self.agent_id.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_deserializes_snake_case() {
        let status: RunStatus = serde_json::from_str("\"requires_action\"").unwrap();
        assert_eq!(status, RunStatus::RequiresAction);
    }

    #[test]
    fn unrecognized_status_maps_to_unknown() {
        let status: RunStatus = serde_json::from_str("\"brand_new_status\"").unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert!(!status.is_transient());
        assert!(!status.is_terminal());
    }

    #[test]
    fn required_action_exposes_pending_calls() {
        let run: Run = serde_json::from_value(serde_json::json!({
            "id": "run_1",
            "thread_id": "thread_1",
            "status": "requires_action",
            "required_action": {
                "type": "submit_tool_outputs",
                "submit_tool_outputs": {
                    "tool_calls": [
                        {"id": "call_1", "type": "function",
                         "function": {"name": "crawlUrl", "arguments": "{}"}}
                    ]
                }
            }
        }))
        .unwrap();

        let calls = run.pending_tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.name, "crawlUrl");
    }

    #[test]
    fn run_without_required_action_has_no_pending_calls() {
        let run: Run = serde_json::from_value(serde_json::json!({
            "id": "run_1",
            "thread_id": "thread_1",
            "status": "in_progress"
        }))
        .unwrap();
        assert!(run.pending_tool_calls().is_empty());
    }

    #[test]
    fn first_text_skips_non_text_blocks() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "role": "assistant",
            "content": [
                {"type": "image_file", "image_file": {"file_id": "file_1"}},
                {"type": "text", "text": {"value": "caption"}}
            ]
        }))
        .unwrap();
        // Only the first block counts.
        assert_eq!(message.first_text(), None);
    }

    #[test]
    fn first_text_reads_leading_text_block() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "role": "assistant",
            "content": [{"type": "text", "text": {"value": "hello"}}]
        }))
        .unwrap();
        assert_eq!(message.first_text(), Some("hello"));
    }

    #[test]
    fn unknown_content_kind_is_tolerated() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "role": "assistant",
            "content": [{"type": "refusal", "refusal": "no"}]
        }))
        .unwrap();
        assert!(matches!(message.content[0], MessageContent::Other));
        assert_eq!(message.first_text(), None);
    }

    #[test]
    fn runtime_context_metadata_uses_service_keys() {
        let ctx = RuntimeContext {
            message_id: "m1".into(),
            client_id: "c1".into(),
            company_id: "co1".into(),
            agent_id: "a1".into(),
        };
        let meta = ctx.to_metadata();
        assert_eq!(meta["messageId"], "m1");
        assert_eq!(meta["agentId"], "a1");
    }
}
