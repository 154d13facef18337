//! Session manager for chat sessions.
//!
//! Wraps a `ChatSession` with turn tracking and lifecycle management.

use ewogchat_types::chat::{ChatSession, SessionStatus};

/// Manages the lifecycle and state of a single chat session.
pub struct SessionManager {
    session: ChatSession,
    /// Turn counter (incremented on each user+assistant exchange).
    turn_count: u32,
}

impl SessionManager {
    /// Start a new session manager.
    pub fn new(streaming: bool) -> Self {
        Self {
            session: ChatSession::start(streaming),
            turn_count: 0,
        }
    }

    /// Access the underlying chat session.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Current turn count within this session.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Increment the turn counter.
    ///
    /// A "turn" is one user message + one assistant response.
    /// Call this after each complete exchange.
    pub fn increment_turn(&mut self) {
        self.turn_count += 1;
    }

    /// Mark the session as completed.
    pub fn mark_completed(&mut self) {
        self.session.complete();
    }
}
