use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling the run configuration, the API credential,
/// or the target identifier. All of them abort the run before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// No usable API key was found at the configured source.
    #[error("API key not found: {0}")]
    CredentialMissing(String),

    #[error("failed to read API key file {}: {source}", path.display())]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("organization identifier must not be empty")]
    EmptyTarget,

    #[error("failed to read organization identifier from terminal: {0}")]
    TargetPrompt(String),
}
