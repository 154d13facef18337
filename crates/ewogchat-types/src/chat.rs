//! Transcript and session types for ewogchat.
//!
//! The transcript is the only state a conversation carries: an append-only,
//! strictly ordered list of role-tagged messages. It lives for the process
//! lifetime and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::llm::MessageRole;
use crate::llm::Message;

/// Ordered, append-only conversation transcript.
///
/// Invariants:
/// - Messages appear in strict chronological send/receive order.
/// - Entries are never reordered or deleted; the only mutation is `push_*`.
/// - A session transcript starts with one seed assistant greeting, after
///   which user and assistant messages alternate (one pair per turn).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript seeded with an assistant greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.push_assistant(greeting);
        transcript
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Lifecycle status of a chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

/// Metadata for one interactive chat session.
///
/// Exists only for the banner and logs; sessions are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Whether responses are streamed or returned whole.
    pub streaming: bool,
    pub status: SessionStatus,
}

impl ChatSession {
    /// Start a new active session.
    pub fn start(streaming: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            ended_at: None,
            streaming,
            status: SessionStatus::Active,
        }
    }

    /// Mark the session as completed and record the end timestamp.
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.ended_at = Some(Utc::now());
    }
}
