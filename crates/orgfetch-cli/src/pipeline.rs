//! Fetch → extract → write driver for a single organization.
//!
//! Each stage returns a `Result`; the first failure is logged and the
//! remaining stages are skipped. Logging goes to whatever subscriber the
//! caller attached to the returned future.

use std::error::Error as _;

use orgfetch_core::{resolve_api_key, resolve_target, AppConfig, CompanyRecord, ConfigError};
use orgfetch_crunchbase::{
    extract_company_record, CrunchbaseClient, CrunchbaseError, ExtractError, RetryPolicy,
};
use orgfetch_parquet::{render_preview, write_company_record, StoreError};
use thiserror::Error;
use tracing::Instrument;

#[derive(Debug, Error)]
pub(crate) enum PipelineError {
    #[error("credential acquisition failed")]
    CredentialMissing(#[source] ConfigError),

    #[error("target selection failed")]
    Target(#[source] ConfigError),

    #[error("failed to retrieve data from the API")]
    Transport(#[source] CrunchbaseError),

    #[error("data extraction failed")]
    ShapeMismatch(#[source] ExtractError),

    #[error("failed to save company record")]
    Persistence(#[source] StoreError),
}

impl PipelineError {
    /// Setup failures that happen before any network call and end the
    /// process with a non-zero status.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, Self::CredentialMissing(_) | Self::Target(_))
    }
}

/// Runs one lookup end to end and returns the record that was written.
///
/// # Errors
///
/// Returns the [`PipelineError`] of the first stage that failed; it has
/// already been logged at `error` level.
pub(crate) async fn run_pipeline(config: &AppConfig) -> Result<CompanyRecord, PipelineError> {
    let api_key = resolve_api_key(&config.credential_source).map_err(|e| {
        tracing::error!(error = %e, "API key not available; aborting before any request");
        PipelineError::CredentialMissing(e)
    })?;
    // The terminal prompt blocks, so it runs off the async worker.
    let target_source = config.target_source.clone();
    let target = tokio::task::spawn_blocking(move || resolve_target(&target_source))
        .await
        .map_err(|e| ConfigError::TargetPrompt(e.to_string()))
        .and_then(|resolved| resolved)
        .map_err(|e| {
            tracing::error!(error = %e, "no organization identifier to look up");
            PipelineError::Target(e)
        })?;

    let span = tracing::info_span!("orgfetch_run", target = %target);
    async move {
        let result = run_stages(config, api_key.expose(), &target).await;
        if let Err(err) = &result {
            let cause = err.source().map_or_else(String::new, ToString::to_string);
            tracing::error!(error = %err, %cause, "run failed");
        }
        result
    }
    .instrument(span)
    .await
}

async fn run_stages(
    config: &AppConfig,
    api_key: &str,
    target: &str,
) -> Result<CompanyRecord, PipelineError> {
    let client = CrunchbaseClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.base_url,
    )
    .map_err(PipelineError::Transport)?
    .with_card_ids(config.card_ids.clone())
    .with_retry(RetryPolicy {
        max_attempts: config.max_attempts,
        backoff_base_secs: config.retry_backoff_base_secs,
    });

    let response = client
        .fetch_organization(target)
        .await
        .map_err(PipelineError::Transport)?;

    let record = extract_company_record(&response).map_err(PipelineError::ShapeMismatch)?;

    if config.preview {
        println!("{}", render_preview(&record));
    }

    write_company_record(&record, &config.output_path).map_err(PipelineError::Persistence)?;
    Ok(record)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
