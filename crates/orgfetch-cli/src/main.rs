use anyhow::Context;
use tracing::instrument::WithSubscriber;
use tracing_subscriber::EnvFilter;

mod pipeline;

/// Builds the log sink for one run.
///
/// An unparseable `ORGFETCH_LOG_LEVEL` falls back to `info` rather than
/// silencing the run.
fn build_subscriber(log_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = orgfetch_core::load_app_config().context("failed to load configuration")?;
    let subscriber = build_subscriber(&config.log_level);

    let result = pipeline::run_pipeline(&config)
        .with_subscriber(subscriber)
        .await;

    match result {
        Ok(_) => Ok(()),
        // Only setup failures end the process with a non-zero status; a failed
        // fetch, extraction or write has already been logged.
        Err(err) if err.is_fatal() => Err(err.into()),
        Err(_) => Ok(()),
    }
}
