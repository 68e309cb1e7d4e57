//! Convenience re-exports for common use.

pub use crate::client::AssistantsClient;
pub use crate::config::StrandConfig;
pub use crate::error::{Result, StrandError};
pub use crate::run::{
    respond, respond_to_message, ConversationOutcome, ConversationRequest, RunDriver, RunOutcome,
};
pub use crate::tools::{
    ArgumentCodec, FunctionTool, Tool, ToolArguments, ToolParameters, ToolRegistry,
};
pub use crate::types::{
    Message, MessageContent, MessageInput, Run, RunStatus, RuntimeContext, ToolCallRequest,
    ToolOutput, ToolResources,
};
