//! API key acquisition.
//!
//! The key is an opaque string: it is read, trimmed and handed to the client.
//! Nothing here validates or rotates it.

use crate::app_config::CredentialSource;
use crate::ConfigError;

/// An API key that never prints its value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([redacted])")
    }
}

/// Resolves the API key from its configured source.
///
/// # Errors
///
/// - [`ConfigError::CredentialMissing`] if the variable is unset or the key is blank.
/// - [`ConfigError::CredentialFile`] if the key file cannot be read.
pub fn resolve_api_key(source: &CredentialSource) -> Result<ApiKey, ConfigError> {
    let (raw, origin) = match source {
        CredentialSource::Env { var, value } => {
            let Some(value) = value else {
                return Err(ConfigError::CredentialMissing(format!(
                    "set the {var} environment variable"
                )));
            };
            (value.clone(), var.clone())
        }
        CredentialSource::File(path) => {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::CredentialFile {
                    path: path.clone(),
                    source: e,
                })?;
            (content, path.display().to_string())
        }
    };

    let key = raw.trim();
    if key.is_empty() {
        return Err(ConfigError::CredentialMissing(format!("{origin} is empty")));
    }
    Ok(ApiKey(key.to_owned()))
}
