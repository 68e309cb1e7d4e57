//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use wiremock::{MockServer, Request, Respond, ResponseTemplate};

use strand::client::AssistantsClient;
use strand::config::StrandConfig;

/// Client pointed at a mock server with a fast poll interval.
pub fn client_for(server: &MockServer) -> AssistantsClient {
    let config = StrandConfig::new("test-key")
        .with_base_url(server.uri())
        .with_poll_interval(Duration::from_millis(5));
    AssistantsClient::new(&config).expect("client")
}

/// Minimal run JSON in the given status.
pub fn run_json(status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "run_1",
        "thread_id": "thread_1",
        "status": status,
    })
}

/// Run JSON paused on the given function tool calls.
pub fn requires_action_run(calls: &[(&str, &str, &str)]) -> serde_json::Value {
    let tool_calls: Vec<serde_json::Value> = calls
        .iter()
        .map(|(id, name, arguments)| {
            serde_json::json!({
                "id": id,
                "type": "function",
                "function": {"name": name, "arguments": arguments},
            })
        })
        .collect();
    serde_json::json!({
        "id": "run_1",
        "thread_id": "thread_1",
        "status": "requires_action",
        "required_action": {
            "type": "submit_tool_outputs",
            "submit_tool_outputs": {"tool_calls": tool_calls},
        },
    })
}

/// Message list JSON whose newest entry is a single text message.
pub fn text_messages(value: &str) -> serde_json::Value {
    serde_json::json!({
        "data": [{
            "id": "msg_1",
            "role": "assistant",
            "content": [{"type": "text", "text": {"value": value}}],
        }]
    })
}

/// Responder that walks through a fixed sequence, repeating the last entry.
pub struct ResponseSequence {
    responses: Vec<ResponseTemplate>,
    index: AtomicUsize,
}

impl ResponseSequence {
    pub fn new(responses: Vec<ResponseTemplate>) -> Self {
        assert!(!responses.is_empty());
        Self {
            responses,
            index: AtomicUsize::new(0),
        }
    }
}

impl Respond for ResponseSequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.responses[i.min(self.responses.len() - 1)].clone()
    }
}
