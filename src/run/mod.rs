//! Run orchestration: lifecycle driver and conversation bootstrap.

pub mod driver;
pub mod respond;

pub use driver::{RunDriver, RunOutcome, NO_TOOLS_FALLBACK_OUTPUT};
pub use respond::{respond, respond_to_message, ConversationOutcome, ConversationRequest};
