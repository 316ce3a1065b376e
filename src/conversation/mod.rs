mod poller;
mod prompt;
mod questions;
mod transcript;

pub use poller::{RunPhase, RunPoller, DEFAULT_POLL_INTERVAL};
pub use prompt::AccumulatedPrompt;
pub use questions::{
    parse_question_payload, response_schema, split_questions, QUESTION_DELIMITER,
};
pub use transcript::{Speaker, Transcript, TranscriptEntry};

use std::fmt;
use std::sync::Arc;

use crate::api::models::{ChatMessage, ChatRequest, ResponseFormat, Thread};
use crate::api::{response, LlmService};
use crate::error::{ConvoError, Result};

/// Which backend interaction shape a call should use.
///
/// The two modes keep independent history tracks: the accumulated prompt for
/// completions, the server-side thread for assistant runs. Mixing them within
/// one session is legal, but neither track sees the other's history; merging
/// them would change the cost model and is intentionally not done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMode {
    Completion,
    Assistant { assistant_id: String },
}

/// A multi-turn conversation session over a remote LLM service.
///
/// Owns one accumulated prompt, one transcript and exactly one live
/// server-side thread handle, created at construction and replaced wholesale
/// on `reset`. Operations take `&mut self`; concurrent use of one session
/// requires external serialization.
pub struct Conversation {
    service: Arc<dyn LlmService>,
    model: String,
    prompt: AccumulatedPrompt,
    transcript: Transcript,
    thread: Thread,
    poller: RunPoller,
}

impl Conversation {
    /// Opens a session against `service`, creating the server-side thread
    /// that backs the assistant mode for the session's lifetime.
    pub async fn open(service: Arc<dyn LlmService>, model: impl Into<String>) -> Result<Self> {
        let thread = service.create_thread().await?;
        Ok(Self {
            service,
            model: model.into(),
            prompt: AccumulatedPrompt::new(),
            transcript: Transcript::new(),
            thread,
            poller: RunPoller::default(),
        })
    }

    pub fn with_poller(mut self, poller: RunPoller) -> Self {
        self.poller = poller;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn thread_id(&self) -> &str {
        &self.thread.id
    }

    /// Dispatch a turn over either backend shape.
    pub async fn respond(
        &mut self,
        mode: &ResponseMode,
        instruction: &str,
        question: &str,
    ) -> Result<String> {
        match mode {
            ResponseMode::Completion => self.ask(instruction, question).await,
            ResponseMode::Assistant { assistant_id } => {
                self.ask_via_assistant(instruction, question, assistant_id).await
            }
        }
    }

    /// Stateless turn: replays the whole accumulated prompt plus the new
    /// instruction and question in one completion call.
    ///
    /// Nothing is committed to the prompt or the transcript until the call
    /// succeeds and carries content; a failed call leaves the session as it
    /// was.
    pub async fn ask(&mut self, instruction: &str, question: &str) -> Result<String> {
        require_text("instruction", instruction)?;
        require_text("question", question)?;

        let staged = [
            ChatMessage::developer(instruction),
            ChatMessage::user(question),
        ];
        let request = ChatRequest {
            model: self.model.clone(),
            messages: self.prompt.replay_with(&staged),
            response_format: None,
        };
        let completion = self.service.chat_completion(&request).await?;
        let reply = response::collect_content(&completion);
        if reply.is_empty() {
            return Err(ConvoError::EmptyResponse);
        }

        self.prompt.extend(staged);
        self.prompt.extend(
            completion
                .choices
                .iter()
                .filter_map(|choice| choice.message.content.clone())
                .map(ChatMessage::assistant),
        );
        self.transcript.record_exchange(question, &reply);
        Ok(reply)
    }

    /// Assistant turn: syncs the assistant's model if it drifted from the
    /// session's, appends the question to the session thread, drives the run
    /// to a terminal state and reads the newest assistant message back off
    /// the thread.
    pub async fn ask_via_assistant(
        &mut self,
        instruction: &str,
        question: &str,
        assistant_id: &str,
    ) -> Result<String> {
        require_text("instruction", instruction)?;
        require_text("question", question)?;

        self.sync_assistant_model(assistant_id).await?;
        self.service
            .create_thread_message(&self.thread.id, question)
            .await?;
        self.poller
            .drive(
                self.service.as_ref(),
                &self.thread.id,
                assistant_id,
                Some(instruction),
            )
            .await?;

        let page = self.service.list_thread_messages(&self.thread.id).await?;
        let reply = response::newest_assistant_text(&page).ok_or(ConvoError::NoMessage)?;
        self.transcript.record_exchange(question, &reply);
        Ok(reply)
    }

    /// Ask the model for `count` short questions as schema-constrained JSON
    /// and split them on the fixed delimiter.
    ///
    /// The request goes out on a temporary message list, not the accumulated
    /// prompt; the parsed reply is committed to the prompt and summarized
    /// into the transcript only after a successful parse.
    pub async fn sample_questions(
        &mut self,
        context: &str,
        count: u32,
        max_words: u32,
    ) -> Result<Vec<String>> {
        require_text("context", context)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::developer(questions::schema_instruction(count, max_words)),
                ChatMessage::user(context),
            ],
            response_format: Some(ResponseFormat::json_schema(
                "sample_questions",
                questions::response_schema(),
            )),
        };
        let completion = self.service.chat_completion(&request).await?;
        let payload = response::collect_content(&completion);
        if payload.is_empty() {
            return Err(ConvoError::EmptyResponse);
        }

        // Parse before committing anything: a bad payload must leave the
        // prompt and transcript untouched.
        let parsed = questions::parse_question_payload(&payload)?;

        self.prompt.extend(
            completion
                .choices
                .iter()
                .filter_map(|choice| choice.message.content.clone())
                .map(ChatMessage::assistant),
        );
        self.transcript.record_exchange(context, &parsed.join(", "));
        Ok(parsed)
    }

    /// Same intent over the assistant path. That surface has no
    /// response-format schema, so the delimiter is requested in the run
    /// instructions and the reply is split directly.
    pub async fn sample_questions_via_assistant(
        &mut self,
        context: &str,
        count: u32,
        max_words: u32,
        assistant_id: &str,
    ) -> Result<Vec<String>> {
        require_text("context", context)?;

        self.service.retrieve_assistant(assistant_id).await?;
        self.service
            .create_thread_message(&self.thread.id, context)
            .await?;
        self.poller
            .drive(
                self.service.as_ref(),
                &self.thread.id,
                assistant_id,
                Some(&questions::delimited_instruction(count, max_words)),
            )
            .await?;

        let page = self.service.list_thread_messages(&self.thread.id).await?;
        let reply = response::newest_assistant_text(&page).ok_or(ConvoError::NoMessage)?;
        let parsed = questions::split_questions(&reply);
        self.transcript.record_exchange(context, &parsed.join(", "));
        Ok(parsed)
    }

    /// Discards both history tracks: requests a fresh thread, then clears
    /// the transcript and the replay buffer. A connectivity failure
    /// propagates untouched and leaves the session unchanged.
    pub async fn reset(&mut self) -> Result<()> {
        let thread = self.service.create_thread().await?;
        self.transcript.clear();
        self.prompt.clear();
        self.thread = thread;
        Ok(())
    }

    /// Read-only rendering of the transcript.
    pub fn history(&self) -> Vec<String> {
        self.transcript.lines()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    async fn sync_assistant_model(&self, assistant_id: &str) -> Result<()> {
        let assistant = self.service.retrieve_assistant(assistant_id).await?;
        if assistant.model != self.model {
            self.service
                .update_assistant_model(assistant_id, &self.model)
                .await?;
        }
        Ok(())
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.transcript)
    }
}

fn require_text(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvoError::Other(format!("{} must not be empty", name)));
    }
    Ok(())
}
