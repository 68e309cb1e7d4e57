//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::ToolParameters;
use crate::error::StrandError;
use crate::types::RuntimeContext;

/// How a tool's raw argument string is decoded before execution.
///
/// A tool is either parsed (arguments are JSON and decoded before the call)
/// or raw (the unparsed text is handed through as-is). The closed set keeps
/// the dispatcher from sniffing capabilities off individual tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentCodec {
    /// Arguments are a JSON document; decode failures are reported back to
    /// the run as the call's output.
    #[default]
    Json,
    /// The tool consumes the raw argument text without decoding.
    Raw,
}

/// Core tool trait — implement to expose a local capability to a run.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls, case-sensitively).
    fn name(&self) -> &str;

    /// Human-readable description, surfaced to the assistant definition.
    fn description(&self) -> &str;

    /// JSON Schema parameters, surfaced to the assistant definition only;
    /// they are not enforced locally beyond argument decoding.
    fn parameters(&self) -> &ToolParameters;

    /// Argument decoding mode.
    fn codec(&self) -> ArgumentCodec {
        ArgumentCodec::Json
    }

    /// Execute the tool with decoded arguments and the turn's fixed context.
    ///
    /// Executors should be safe to retry at the caller's discretion; the
    /// orchestrator itself never retries an individual call.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &RuntimeContext,
    ) -> Result<serde_json::Value, StrandError>;
}

/// Type alias for the tool handler function.
type ToolHandler = dyn Fn(
        ToolArguments,
        RuntimeContext,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, StrandError>> + Send>>
    + Send
    + Sync;

/// Closure-based tool for quick tool creation.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: ToolParameters,
    codec: ArgumentCodec,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    /// Create a JSON-argument tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, RuntimeContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, StrandError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            codec: ArgumentCodec::Json,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }

    /// Switch the argument decoding mode.
    pub fn with_codec(mut self, codec: ArgumentCodec) -> Self {
        self.codec = codec;
        self
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn codec(&self) -> ArgumentCodec {
        self.codec
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &RuntimeContext,
    ) -> Result<serde_json::Value, StrandError> {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("codec", &self.codec)
            .finish()
    }
}
