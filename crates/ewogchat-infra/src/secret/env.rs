//! Environment variable secret store.
//!
//! A read-only secret store that resolves keys directly as environment
//! variable names (e.g. "AZURE_OPENAI_API_KEY"). Users set credentials
//! via shell config; nothing is ever written back.

use ewogchat_core::secret::SecretStore;
use ewogchat_types::error::SecretError;

/// Environment variable secret store.
pub struct EnvSecretStore;

impl EnvSecretStore {
    /// Create a new environment variable secret store.
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for EnvSecretStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => {
                // Env var exists but has invalid Unicode -- treat as not found
                // rather than erroring, since credentials must be valid strings
                Ok(None)
            }
        }
    }
}
