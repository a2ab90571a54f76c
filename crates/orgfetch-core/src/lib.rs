pub mod app_config;
pub mod config;
pub mod credentials;
pub mod error;
pub mod record;
pub mod target;

pub use app_config::{AppConfig, CredentialSource, TargetSource};
pub use config::{load_app_config, load_app_config_from_env};
pub use credentials::{resolve_api_key, ApiKey};
pub use error::ConfigError;
pub use record::CompanyRecord;
pub use target::resolve_target;
