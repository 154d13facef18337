//! Infrastructure implementations for ewogchat.
//!
//! Houses everything that touches the outside world: the Azure OpenAI
//! HTTP client (streaming and non-streaming), the environment secret
//! store, and the config.toml loader.

pub mod config;
pub mod llm;
pub mod secret;
