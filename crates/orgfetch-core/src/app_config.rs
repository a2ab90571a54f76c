use std::path::PathBuf;

/// Where the Crunchbase API key is read from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// The value of an environment variable, captured at config load time.
    Env {
        var: String,
        value: Option<String>,
    },
    /// A local secret file whose trimmed content is the key.
    File(PathBuf),
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Env { var, value } => f
                .debug_struct("Env")
                .field("var", var)
                .field("value", &value.as_ref().map(|_| "[redacted]"))
                .finish(),
            CredentialSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// How the organization identifier for a run is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    Configured(String),
    /// Ask on the terminal, offering `default` as the pre-filled answer.
    Prompt { default: String },
}

/// Run configuration assembled from environment variables.
///
/// `Debug` is safe to log: the credential source redacts the key.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credential_source: CredentialSource,
    pub target_source: TargetSource,
    pub base_url: String,
    pub card_ids: Vec<String>,
    pub output_path: PathBuf,
    pub preview: bool,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub retry_backoff_base_secs: u64,
}
