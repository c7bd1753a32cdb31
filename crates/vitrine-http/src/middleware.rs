//! Retry with exponential backoff for idempotent requests

use std::time::Duration;

use tracing::{debug, warn};

use crate::{error::HttpError, Result};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first try
    pub max_retries: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Calculate delay before retry number `retry` (zero-based)
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(retry as i32);

        let delay = Duration::from_millis(delay_ms as u64);
        std::cmp::min(delay, self.max_delay)
    }
}

/// Retries transient failures; anything else is returned immediately
pub struct RetryMiddleware {
    config: RetryConfig,
}

impl RetryMiddleware {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute operation with retry logic
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut retry = 0;
        loop {
            match operation().await {
                Ok(result) => {
                    if retry > 0 {
                        debug!("Request succeeded after {retry} retries");
                    }
                    return Ok(result);
                }
                Err(e) if !e.is_retryable() => {
                    debug!("Non-retryable error: {e}");
                    return Err(e);
                }
                Err(e) if retry >= self.config.max_retries => {
                    return Err(HttpError::RetryLimitExceeded {
                        attempts: retry + 1,
                        last: e.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.config.calculate_delay(retry);
                    warn!(
                        "Request failed (attempt {}/{}), retrying in {:?}: {}",
                        retry + 1,
                        self.config.max_retries + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn unavailable() -> HttpError {
        HttpError::HttpStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "busy".to_string(),
        }
    }

    #[test]
    fn test_retry_config_delay_calculation() {
        let config = RetryConfig::default();

        assert_eq!(config.calculate_delay(0), Duration::from_millis(500));
        assert_eq!(config.calculate_delay(1), Duration::from_millis(1000));
        assert_eq!(config.calculate_delay(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_max_delay_cap() {
        let config = RetryConfig {
            max_delay: Duration::from_secs(5),
            ..Default::default()
        };

        assert!(config.calculate_delay(10) <= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_success_on_second_attempt() {
        let middleware = RetryMiddleware::new(RetryConfig {
            max_retries: 2,
            ..Default::default()
        });

        let mut attempts = 0;
        let result = middleware
            .execute(|| {
                attempts += 1;
                let current = attempts;
                async move {
                    if current == 1 {
                        Err(unavailable())
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_limit_exceeded() {
        let middleware = RetryMiddleware::new(RetryConfig {
            max_retries: 2,
            ..Default::default()
        });

        let result = middleware
            .execute(|| async { Err::<i32, _>(unavailable()) })
            .await;

        assert!(matches!(
            result,
            Err(HttpError::RetryLimitExceeded { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_non_retryable_error() {
        let middleware = RetryMiddleware::new(RetryConfig::default());

        let result = middleware
            .execute(|| async { Err::<i32, _>(HttpError::InvalidUrl("bad".to_string())) })
            .await;

        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }
}
