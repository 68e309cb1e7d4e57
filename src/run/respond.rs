//! Conversation bootstrap.
//!
//! Creates the assistant definition and thread, starts the run, and hands
//! control to the lifecycle driver. The public boundary never raises:
//! internal errors are logged and collapsed into `None`.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::client::{AssistantsClient, CreateAssistant, CreateRun};
use crate::error::Result;
use crate::tools::{Tool, ToolRegistry};
use crate::types::{MessageInput, Run, RuntimeContext, ToolResources};

use super::driver::{RunDriver, RunOutcome};

/// One conversation turn to respond to.
#[derive(Clone)]
pub struct ConversationRequest {
    pub name: String,
    pub instructions: String,
    pub tools: Vec<Arc<dyn Tool>>,
    pub tool_resources: Option<ToolResources>,
    pub message: MessageInput,
    /// Prior messages appended before `message` when seeding or extending.
    pub additional_messages: Vec<MessageInput>,
    /// Reuse an existing thread instead of creating one.
    pub thread_id: Option<String>,
    pub metadata: Option<RuntimeContext>,
    pub additional_instructions: Option<String>,
}

impl ConversationRequest {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        message: MessageInput,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            tool_resources: None,
            message,
            additional_messages: Vec::new(),
            thread_id: None,
            metadata: None,
            additional_instructions: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool_resources(mut self, resources: ToolResources) -> Self {
        self.tool_resources = Some(resources);
        self
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: RuntimeContext) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_additional_messages(mut self, messages: Vec<MessageInput>) -> Self {
        self.additional_messages = messages;
        self
    }

    pub fn with_additional_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.additional_instructions = Some(instructions.into());
        self
    }
}

/// Result of one conversation turn.
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    /// The newest message's text, when the run completed and its first
    /// content block is text. `None` for image-first replies and for runs
    /// that ended in a non-completed terminal state.
    pub content: Option<String>,
    /// The run snapshot backing the outcome: the terminal run when the run
    /// did not complete (so failure detail stays inspectable), otherwise
    /// the first settled snapshot.
    pub run: Run,
}

/// Respond to a message. Outer boundary: any internal error is logged and
/// swallowed into `None`; callers treat `None` as an opaque failure.
pub async fn respond_to_message(
    client: &AssistantsClient,
    request: ConversationRequest,
) -> Option<ConversationOutcome> {
    match respond(client, request, CancellationToken::new()).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            error!(error = %err, "conversation turn failed");
            None
        }
    }
}

/// Respond to a message, surfacing errors and honoring cancellation.
pub async fn respond(
    client: &AssistantsClient,
    request: ConversationRequest,
    cancel: CancellationToken,
) -> Result<ConversationOutcome> {
    let registry = ToolRegistry::new(request.tools.clone());
    let ctx = request.metadata.clone().unwrap_or_default();
    let metadata = request.metadata.as_ref().map(|m| m.to_metadata());

    // A fresh assistant per invocation, keyed by nothing. Callers wanting
    // reuse hold on to their own assistant ids.
    let assistant = client
        .create_assistant(&CreateAssistant {
            name: request.name.clone(),
            instructions: request.instructions.clone(),
            model: client.model().to_string(),
            tools: registry.assistant_tool_payload(request.tool_resources.as_ref()),
            tool_resources: request.tool_resources.clone(),
            metadata: metadata.clone(),
        })
        .await?;

    let thread_id = prepare_thread(client, &request, metadata.as_ref()).await?;

    let run = client
        .create_run_and_poll(
            &thread_id,
            &CreateRun {
                assistant_id: assistant.id,
                metadata,
                additional_instructions: request.additional_instructions.clone(),
            },
            &cancel,
        )
        .await?;
    let started = run.clone();

    let driver = RunDriver::new(client, &registry, &ctx).with_cancellation(cancel);
    match driver.drive(run).await? {
        RunOutcome::Completed(messages) => {
            let content = messages
                .first()
                .and_then(|m| m.first_text())
                .map(str::to_string);
            Ok(ConversationOutcome {
                content,
                run: started,
            })
        }
        RunOutcome::Terminal(run) => Ok(ConversationOutcome { content: None, run }),
    }
}

/// Create the thread (seeded with all messages) or extend an existing one,
/// then attach metadata when supplied.
async fn prepare_thread(
    client: &AssistantsClient,
    request: &ConversationRequest,
    metadata: Option<&std::collections::HashMap<String, String>>,
) -> Result<String> {
    let thread_id = match &request.thread_id {
        Some(thread_id) => {
            for message in &request.additional_messages {
                client.create_message(thread_id, message).await?;
            }
            client.create_message(thread_id, &request.message).await?;
            thread_id.clone()
        }
        None => {
            let mut messages = request.additional_messages.clone();
            messages.push(request.message.clone());
            client.create_thread(&messages, None).await?.id
        }
    };

    if let Some(metadata) = metadata {
        client.update_thread(&thread_id, metadata).await?;
    }

    Ok(thread_id)
}
