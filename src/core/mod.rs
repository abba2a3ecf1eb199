pub mod classifier;
pub mod formatter;
pub mod memory;
pub mod tutor;

pub use crate::domain::model::{AgentReply, Category, CompletionRequest, Interaction, Topic};
pub use crate::domain::ports::{Agent, ChatModel};
pub use crate::utils::error::Result;
