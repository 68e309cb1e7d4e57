//! Strand — assistant run orchestration
//!
//! Drives a remote assistant "run" through its lifecycle from the client
//! side: create an assistant and thread, start a run, execute any tool
//! calls the run pauses on, submit the outputs, and keep polling until
//! the run settles in a terminal state.
//!
//! # Quick Start
//!
//! ```no_run
//! use strand::prelude::*;
//!
//! # async fn example() -> strand::error::Result<()> {
//! let config = StrandConfig::from_env();
//! let client = AssistantsClient::new(&config)?;
//!
//! let request = ConversationRequest::new(
//!     "helper",
//!     "You are a helpful agent.",
//!     MessageInput::user("Hello!"),
//! );
//! if let Some(outcome) = respond_to_message(&client, request).await {
//!     println!("{:?}", outcome.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod run;
pub mod tools;
pub mod types;
