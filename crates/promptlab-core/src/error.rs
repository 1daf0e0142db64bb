//! Error types for promptlab-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while enhancing a prompt remotely.
///
/// Analysis itself never fails; these only surface from the optional
/// enhancement step, and callers are expected to degrade to the plain
/// analysis when one occurs.
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// No API key is configured.
    #[error(
        "no API key found. Set the PROMPTLAB_API_KEY environment variable or `api_key` in your config"
    )]
    MissingCredential,

    /// The configured provider is not recognized.
    #[error("unknown provider '{provider}'. Supported: openai, anthropic")]
    UnsupportedProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// This build does not include the network client.
    #[error("this build of promptlab was compiled without the `enhance` feature")]
    MissingDependency,

    /// The provider call failed or returned an error status.
    #[error("{provider} API error: {message}")]
    Remote {
        /// Provider display name.
        provider: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The provider did not answer in time.
    #[error("{provider} API did not respond within {timeout:?}")]
    Timeout {
        /// Provider display name.
        provider: &'static str,
        /// Configured timeout.
        timeout: std::time::Duration,
    },
}

/// Result type alias using [`EnhanceError`].
pub type EnhanceResult<T> = Result<T, EnhanceError>;
