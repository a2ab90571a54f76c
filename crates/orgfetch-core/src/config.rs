use crate::app_config::{AppConfig, CredentialSource, TargetSource};
use crate::ConfigError;

/// Environment variable holding the API key when no key file is configured.
pub const API_KEY_ENV_VAR: &str = "CRUNCHBASE_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.crunchbase.com/v4/data/entities";
const DEFAULT_TARGET: &str = "konsus";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// A missing API key is not an error here: the credential is resolved later by
/// [`crate::resolve_api_key`] so the run can fail loudly at that step.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_flag = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{raw}'"),
            }),
            Err(_) => Ok(default),
        }
    };

    let credential_source = match lookup("ORGFETCH_API_KEY_FILE") {
        Ok(path) if !path.trim().is_empty() => CredentialSource::File(PathBuf::from(path)),
        _ => CredentialSource::Env {
            var: API_KEY_ENV_VAR.to_string(),
            value: lookup(API_KEY_ENV_VAR).ok(),
        },
    };

    let target = or_default("ORGFETCH_TARGET", DEFAULT_TARGET).trim().to_string();
    let target_source = if parse_flag("ORGFETCH_PROMPT_TARGET", false)? {
        TargetSource::Prompt { default: target }
    } else {
        if target.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: "ORGFETCH_TARGET".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        TargetSource::Configured(target)
    };

    let base_url = or_default("ORGFETCH_BASE_URL", DEFAULT_BASE_URL);
    let card_ids = parse_card_ids(&or_default("ORGFETCH_CARD_IDS", "fields"));
    if card_ids.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "ORGFETCH_CARD_IDS".to_string(),
            reason: "at least one card id is required".to_string(),
        });
    }

    let output_path = PathBuf::from(or_default("ORGFETCH_OUTPUT_PATH", "company_data.parquet"));
    let preview = parse_flag("ORGFETCH_PREVIEW", true)?;
    let log_level = or_default("ORGFETCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("ORGFETCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ORGFETCH_USER_AGENT", "orgfetch/0.1 (company-lookup)");
    let max_attempts = parse_u32("ORGFETCH_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ORGFETCH_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let retry_backoff_base_secs = parse_u64("ORGFETCH_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        credential_source,
        target_source,
        base_url,
        card_ids,
        output_path,
        preview,
        log_level,
        request_timeout_secs,
        user_agent,
        max_attempts,
        retry_backoff_base_secs,
    })
}

/// Splits a comma-separated card list, dropping blanks.
fn parse_card_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
