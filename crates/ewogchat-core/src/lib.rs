//! Core conversation logic for ewogchat.
//!
//! Defines the provider abstraction ([`llm::provider::ChatProvider`]), its
//! type-erased wrapper, the transcript-to-request rendering contract, and
//! the turn engine that owns the conversation bookkeeping. Infrastructure
//! implementations (the Azure HTTP client) live in ewogchat-infra.

pub mod chat;
pub mod llm;
pub mod secret;
