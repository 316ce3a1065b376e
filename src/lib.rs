pub mod api;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;

pub use conversation::{Conversation, ResponseMode, RunPoller};
pub use error::{ConvoError, Result};
