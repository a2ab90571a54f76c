use crate::app_config::TargetSource;
use crate::ConfigError;

/// Resolves the organization identifier to look up.
///
/// For [`TargetSource::Prompt`] this blocks on the terminal until the user
/// answers; an empty answer selects the default.
///
/// # Errors
///
/// - [`ConfigError::TargetPrompt`] if the terminal cannot be read.
/// - [`ConfigError::EmptyTarget`] if the resolved identifier is blank.
pub fn resolve_target(source: &TargetSource) -> Result<String, ConfigError> {
    let raw = match source {
        TargetSource::Configured(target) => target.clone(),
        TargetSource::Prompt { default } => dialoguer::Input::<String>::new()
            .with_prompt("Organization permalink")
            .default(default.clone())
            .interact_text()
            .map_err(|e| ConfigError::TargetPrompt(e.to_string()))?,
    };

    let target = raw.trim();
    if target.is_empty() {
        return Err(ConfigError::EmptyTarget);
    }
    Ok(target.to_owned())
}
