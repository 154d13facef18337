//! Shared domain types for ewogchat.
//!
//! This crate contains the types used across the ewogchat workspace:
//! transcript and session types, LLM request/response shapes, stream
//! events, and configuration records.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
