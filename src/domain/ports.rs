use crate::domain::model::{AgentReply, CompletionRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A hosted chat-completions backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Anything that turns one learner message into one reply.
///
/// Failures are folded into the reply (category `error`), so `run` itself
/// never fails.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn run(&mut self, message: &str) -> AgentReply;
}

