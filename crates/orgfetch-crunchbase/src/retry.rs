//! Retry with exponential back-off for the Crunchbase client.
//!
//! [`retry_with_backoff`] wraps the organization request and retries every
//! request failure: network errors, timeouts, any non-success status (404
//! included) and bodies that are not JSON. Only client construction faults are
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CrunchbaseError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`CrunchbaseError::Http`]: timeout, connection refused or reset, body read failure.
/// - [`CrunchbaseError::NotFound`] and every [`CrunchbaseError::UnexpectedStatus`].
/// - [`CrunchbaseError::Deserialize`]: malformed body.
///
/// **Not retriable:**
/// - [`CrunchbaseError::InvalidBaseUrl`] and [`CrunchbaseError::InvalidApiKey`]: configuration faults.
pub(crate) fn is_retriable(err: &CrunchbaseError) -> bool {
    match err {
        CrunchbaseError::Http(_)
        | CrunchbaseError::NotFound { .. }
        | CrunchbaseError::UnexpectedStatus { .. }
        | CrunchbaseError::Deserialize { .. } => true,
        CrunchbaseError::InvalidBaseUrl { .. } | CrunchbaseError::InvalidApiKey(_) => false,
    }
}

/// Runs `operation` up to `max_attempts` times in total.
///
/// After the n-th failed attempt the task sleeps `backoff_base_secs * 2^n`
/// seconds before trying again.
///
/// | Attempt | Sleep after failure (`backoff_base_secs = 1`) |
/// |---------|-----------------------------------------------|
/// | 1       | 2 s                                           |
/// | 2       | 4 s                                           |
/// | 3       | (last attempt, no sleep)                      |
///
/// `max_attempts <= 1` disables retrying. Configuration faults are returned
/// immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, CrunchbaseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CrunchbaseError>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) {
                    return Err(err);
                }
                if attempt >= max_attempts {
                    tracing::error!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "max attempts reached; giving up on Crunchbase request"
                    );
                    return Err(err);
                }
                let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs,
                    error = %err,
                    "Crunchbase request failed; retrying after back-off"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error(status: u16) -> CrunchbaseError {
        CrunchbaseError::UnexpectedStatus {
            status,
            url: "https://api.example.com/organizations/x".to_owned(),
        }
    }

    #[test]
    fn every_non_success_status_is_retriable() {
        assert!(is_retriable(&server_error(500)));
        assert!(is_retriable(&server_error(503)));
        assert!(is_retriable(&server_error(429)));
        assert!(is_retriable(&server_error(401)));
        assert!(is_retriable(&CrunchbaseError::NotFound {
            url: "https://api.example.com/organizations/x".to_owned(),
        }));
    }

    #[test]
    fn deserialize_error_is_retriable() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(is_retriable(&CrunchbaseError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[test]
    fn configuration_faults_are_not_retriable() {
        assert!(!is_retriable(&CrunchbaseError::InvalidBaseUrl {
            base_url: "mailto:x".to_owned(),
            reason: "cannot be a base".to_owned(),
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, CrunchbaseError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(server_error(502))
                } else {
                    Ok::<u32, CrunchbaseError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(server_error(500))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "max_attempts counts every try");
        assert!(matches!(
            result,
            Err(CrunchbaseError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn single_attempt_never_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(1, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(server_error(503))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn not_found_is_retried_until_attempts_run_out() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(CrunchbaseError::NotFound {
                    url: "https://api.example.com/organizations/missing".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(CrunchbaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn configuration_fault_is_returned_at_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(CrunchbaseError::InvalidBaseUrl {
                    base_url: "mailto:x".to_owned(),
                    reason: "cannot be a base".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(CrunchbaseError::InvalidBaseUrl { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_per_attempt() {
        let start = tokio::time::Instant::now();
        let result = retry_with_backoff(3, 1, || async { Err::<u32, _>(server_error(500)) }).await;
        assert!(result.is_err());
        // 2 s after the first failure, 4 s after the second, none after the last.
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_secs(6) && elapsed < Duration::from_secs(7),
            "unexpected total back-off: {elapsed:?}"
        );
    }
}
