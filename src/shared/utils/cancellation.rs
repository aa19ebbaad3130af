use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::shared::errors::{AppError, AppResult};

/// Caller-supplied limits for a single gateway call.
#[derive(Debug, Clone, Default)]
pub struct OperationLimits {
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl OperationLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Drive `fut` to completion unless the deadline passes or the token fires first.
    /// Dropping the inner future abandons the request on the client side only.
    pub async fn run<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let cancelled = async {
            match &self.cancellation {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };

        let bounded = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(AppError::Timeout(format!(
                        "{} exceeded {}ms",
                        operation,
                        limit.as_millis()
                    ))),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(AppError::Cancelled(operation.to_string())),
            result = bounded => result,
        }
    }
}
