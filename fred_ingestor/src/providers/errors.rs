use shared_utils::env::MissingEnvVarError;
use thiserror::Error;

/// Errors that can occur while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// A required credential environment variable is missing.
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVarError),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors that can occur inside a provider request.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor's API returned a specific error payload (e.g. bad API key).
    #[error("API error: {0}")]
    Api(String),

    /// The request parameters were invalid for this specific provider.
    #[error("Invalid parameters for provider: {0}")]
    Validation(String),
}
