use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.speaker {
            Speaker::User => "UserMessage",
            Speaker::Ai => "AiMessage",
        };
        write!(f, "{}: {}", tag, self.text)
    }
}

/// Human-readable record of the conversation, for display and debugging.
/// Purely observational: appended on successful turns, cleared on reset,
/// never consulted for control flow.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one completed turn as a UserMessage/AiMessage pair.
    pub fn record_exchange(&mut self, question: &str, reply: &str) {
        self.entries.push(TranscriptEntry {
            speaker: Speaker::User,
            text: question.to_string(),
        });
        self.entries.push(TranscriptEntry {
            speaker: Speaker::Ai,
            text: reply.to_string(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
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

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
