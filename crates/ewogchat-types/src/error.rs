use thiserror::Error;

/// Errors surfaced during startup configuration.
///
/// These occur before the conversation loop starts; the process must not
/// enter the loop when one is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(String),

    #[error(
        "no Azure OpenAI endpoint configured (set `endpoint` in config.toml or AZURE_OPENAI_ENDPOINT)"
    )]
    MissingEndpoint,
}

/// Errors from secret lookup backends.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret not found")]
    NotFound,

    #[error("secret provider unavailable")]
    ProviderUnavailable,
}
