//! Conversation turn engine, prompt rendering, and session tracking.

pub mod engine;
pub mod prompt;
pub mod session;
