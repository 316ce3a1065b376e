use async_trait::async_trait;

use super::models::{
    Assistant, ChatCompletionResponse, ChatRequest, MessageListPage, Run, Thread, ThreadMessage,
};
use crate::error::Result;

/// The remote LLM service surface consumed by the conversation core.
///
/// Two interaction shapes live behind this trait: stateless chat completions
/// carrying the full message context per call, and the stateful
/// assistant/thread/run surface. The core never reimplements any of this; it
/// only drives it.
#[async_trait]
pub trait LlmService: Send + Sync {
    /// One completion round trip over an ordered, role-tagged message list.
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletionResponse>;

    /// Create an empty server-side thread.
    async fn create_thread(&self) -> Result<Thread>;

    /// Append a user message to a thread.
    async fn create_thread_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage>;

    /// List a thread's messages in ascending chronological order.
    async fn list_thread_messages(&self, thread_id: &str) -> Result<MessageListPage>;

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    /// Point an assistant at a different model.
    async fn update_assistant_model(&self, assistant_id: &str, model: &str) -> Result<Assistant>;

    /// Submit a run for a thread, optionally with extra run-time instructions.
    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: Option<&str>,
    ) -> Result<Run>;

    /// Re-fetch a run's current status by id.
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;
}
