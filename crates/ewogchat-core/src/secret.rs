//! Secret provider trait definition.
//!
//! The only secrets this program needs are the two API keys read once at
//! startup. Backends implement lookup; there is no write path.

use ewogchat_types::error::SecretError;

/// Trait for secret lookup backends (environment, test fixtures).
pub trait SecretStore: Send + Sync {
    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this store.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, SecretError>> + Send;
}
