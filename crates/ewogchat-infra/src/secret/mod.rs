//! Secret store implementations.
//!
//! - `env`: Environment variable store (read-only)

pub mod env;

pub use env::EnvSecretStore;
