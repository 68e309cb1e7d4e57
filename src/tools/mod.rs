//! Tool system: the contract local tools satisfy, the per-turn registry,
//! and the batch dispatcher that answers a paused run's tool calls.

pub mod arguments;
pub mod builtin;
pub mod dispatch;
pub mod registry;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use dispatch::dispatch_tool_calls;
pub use registry::ToolRegistry;
pub use tool::{ArgumentCodec, FunctionTool, Tool};
pub use types::ToolParameters;
