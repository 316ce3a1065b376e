use crate::api::models::ChatMessage;

/// Replay buffer for the stateless completion mode.
///
/// Every entry ever committed is resent in full on each call; that replay is
/// what gives the stateless mode its memory of prior turns, at the cost of a
/// prompt (and token bill) that grows without bound for the lifetime of the
/// session. The growth is deliberate: bounding it would silently change what
/// the model remembers.
#[derive(Debug, Default)]
pub struct AccumulatedPrompt {
    entries: Vec<ChatMessage>,
}

impl AccumulatedPrompt {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = ChatMessage>) {
        self.entries.extend(messages);
    }

    /// Full replay plus staged entries that have not been committed yet.
    /// Used to send a turn without mutating the buffer until the call
    /// succeeds.
    pub fn replay_with(&self, staged: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = self.entries.clone();
        messages.extend(staged.iter().cloned());
        messages
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
