use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Clock;

pub const GREETING: &str =
    "Hello! I'm the textbook's math tutor. What can I help you with in today's lesson?";

pub const FAILURE_NOTICE: &str =
    "Something went wrong while contacting the assistant. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    /// Marks the apology appended after a failed assistant call.
    pub is_error: bool,
}

/// Conversation with the tutoring assistant, oldest message first.
///
/// Lives beside the study session and shares nothing with it.
#[derive(Debug, Clone)]
pub struct Transcript {
    clock: Clock,
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A transcript opened with the assistant's greeting.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        let mut transcript = Self {
            clock,
            messages: Vec::new(),
        };
        transcript.push(ChatRole::Assistant, GREETING, false);
        transcript
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatRole::User, text, false)
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatRole::Assistant, text, false)
    }

    pub fn push_failure(&mut self) -> &ChatMessage {
        self.push(ChatRole::Assistant, FAILURE_NOTICE, true)
    }

    /// Messages worth replaying to the model: failure notices are excluded.
    pub fn history(&self) -> impl Iterator<Item = &ChatMessage> + '_ {
        self.messages.iter().filter(|message| !message.is_error)
    }

    fn push(&mut self, role: ChatRole, text: impl Into<String>, is_error: bool) -> &ChatMessage {
        self.messages.push(ChatMessage {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            sent_at: self.clock.now(),
            is_error,
        });
        let last = self.messages.len() - 1;
        &self.messages[last]
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(Clock::default())
    }
}
