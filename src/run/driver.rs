//! Run lifecycle driver.
//!
//! A state machine over the remote run's status, written as an iterative
//! loop: poll, branch, maybe dispatch tools and submit their outputs, poll
//! again. The loop has no iteration cap of its own; it ends when the run
//! reaches a terminal state or the cancellation token fires.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::AssistantsClient;
use crate::error::{Result, StrandError};
use crate::tools::{dispatch_tool_calls, ToolRegistry};
use crate::types::{Message, Run, RunStatus, RuntimeContext, ToolOutput};

/// Output submitted when a run pauses for tools but none were supplied.
/// The remote run needs at least one output per pause to make progress.
pub const NO_TOOLS_FALLBACK_OUTPUT: &str = "No tools found for assistant.";

/// How one conversation turn's run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The run completed; the thread's messages, in the service's own
    /// ordering (newest first, not re-sorted).
    Completed(Vec<Message>),
    /// The run ended in a non-completed terminal state; the raw run is
    /// handed back unchanged so the caller can inspect the failure.
    Terminal(Run),
}

impl RunOutcome {
    /// Messages of a completed run, `None` for terminal outcomes.
    pub fn messages(&self) -> Option<&[Message]> {
        match self {
            Self::Completed(messages) => Some(messages),
            Self::Terminal(_) => None,
        }
    }
}

/// Drives one run to a terminal state, executing tool pauses along the way.
pub struct RunDriver<'a> {
    client: &'a AssistantsClient,
    tools: &'a ToolRegistry,
    ctx: &'a RuntimeContext,
    cancel: CancellationToken,
}

impl<'a> RunDriver<'a> {
    pub fn new(client: &'a AssistantsClient, tools: &'a ToolRegistry, ctx: &'a RuntimeContext) -> Self {
        Self {
            client,
            tools,
            ctx,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token observed at every suspend point.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Advance the run until it reaches a terminal state.
    ///
    /// Only the run snapshot moves through the loop, and it is replaced
    /// wholesale on every fetch; errors submitting outputs or polling abort
    /// the whole turn.
    pub async fn drive(&self, mut run: Run) -> Result<RunOutcome> {
        loop {
            if self.cancel.is_cancelled() {
                return Err(StrandError::Canceled);
            }
            debug!(run_id = %run.id, status = %run.status, "run status");

            match run.status {
                RunStatus::Completed => {
                    let messages = self.client.list_messages(&run.thread_id).await?;
                    return Ok(RunOutcome::Completed(messages));
                }
                RunStatus::RequiresAction => {
                    run = self.handle_requires_action(run).await?;
                }
                status if status.is_terminal() => {
                    return Ok(RunOutcome::Terminal(run));
                }
                _ => {
                    // Transient or unrecognized status: poll again. New
                    // statuses the service grows must not stall the loop.
                    self.client.wait_poll_interval(&self.cancel).await?;
                    run = self.client.retrieve_run(&run.thread_id, &run.id).await?;
                }
            }
        }
    }

    async fn handle_requires_action(&self, run: Run) -> Result<Run> {
        let calls = run.pending_tool_calls().to_vec();
        if calls.is_empty() {
            // Paused with nothing to answer; treat like any other
            // not-yet-actionable status and poll again.
            warn!(run_id = %run.id, "run paused without pending tool calls");
            self.client.wait_poll_interval(&self.cancel).await?;
            return self.client.retrieve_run(&run.thread_id, &run.id).await;
        }

        if self.tools.is_empty() {
            warn!(run_id = %run.id, "no tools supplied, answering first pending call");
            return self.submit_no_tools_fallback(&run, &calls[0].id).await;
        }

        let outputs = dispatch_tool_calls(self.tools, &calls, self.ctx).await;
        if outputs.is_empty() {
            return self.submit_no_tools_fallback(&run, &calls[0].id).await;
        }

        self.client
            .submit_tool_outputs_and_poll(&run.thread_id, &run.id, &outputs, &self.cancel)
            .await
    }

    async fn submit_no_tools_fallback(&self, run: &Run, call_id: &str) -> Result<Run> {
        let outputs = [ToolOutput {
            tool_call_id: call_id.to_string(),
            output: NO_TOOLS_FALLBACK_OUTPUT.to_string(),
        }];
        self.client
            .submit_tool_outputs_and_poll(&run.thread_id, &run.id, &outputs, &self.cancel)
            .await
    }
}
