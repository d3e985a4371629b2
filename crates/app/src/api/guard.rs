//! Request timeouts and cancellation.

use std::{
    future::Future,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ApiError;

/// Run `request`, giving up after `timeout` or as soon as `cancel` fires.
///
/// # Errors
///
/// Returns [`ApiError::Cancelled`] or [`ApiError::Timeout`] when the request
/// is abandoned, otherwise whatever `request` resolves to.
pub async fn guarded<F, T>(
    cancel: &CancellationToken,
    timeout: Duration,
    request: F,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;

        () = cancel.cancelled() => Err(ApiError::Cancelled),
        outcome = tokio::time::timeout(timeout, request) => match outcome {
            Ok(result) => result,
            Err(_elapsed) => Err(ApiError::Timeout(timeout)),
        },
    }
}

/// Timeout and cancellation shared by a group of requests.
///
/// [`RequestScope::cancel_all`] abandons everything currently in flight;
/// requests started afterwards are unaffected.
#[derive(Debug)]
pub struct RequestScope {
    timeout: Duration,
    token: Mutex<CancellationToken>,
}

impl RequestScope {
    /// A scope applying `timeout` to each request.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            token: Mutex::new(CancellationToken::new()),
        }
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `request` under this scope.
    ///
    /// # Errors
    ///
    /// See [`guarded`].
    pub async fn run<F, T>(&self, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let token = self.current_token();

        guarded(&token, self.timeout, request).await
    }

    /// Cancel every request started so far.
    pub fn cancel_all(&self) {
        let mut token = self.token.lock().unwrap_or_else(PoisonError::into_inner);

        token.cancel();
        *token = CancellationToken::new();

        debug!("cancelled in-flight requests");
    }

    fn current_token(&self) -> CancellationToken {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .child_token()
    }
}

#[cfg(test)]
mod tests {
    use std::{future, sync::Arc};

    use testresult::TestResult;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hung_requests_time_out() {
        let result: Result<(), ApiError> = guarded(
            &CancellationToken::new(),
            Duration::from_secs(5),
            future::pending(),
        )
        .await;

        assert!(
            matches!(result, Err(ApiError::Timeout(timeout)) if timeout == Duration::from_secs(5)),
            "expected timeout, got {result:?}"
        );
    }

    #[tokio::test]
    async fn completed_requests_pass_through() -> TestResult {
        let value = guarded(&CancellationToken::new(), Duration::from_secs(5), async {
            Ok::<_, ApiError>(7)
        })
        .await?;

        assert_eq!(value, 7);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_abandons_in_flight_requests() -> TestResult {
        let scope = Arc::new(RequestScope::new(Duration::from_secs(60)));

        let (started_tx, started_rx) = tokio::sync::oneshot::channel();

        let in_flight = tokio::spawn({
            let scope = Arc::clone(&scope);

            async move {
                scope
                    .run(async move {
                        _ = started_tx.send(());
                        future::pending::<Result<(), ApiError>>().await
                    })
                    .await
            }
        });

        started_rx.await?;
        scope.cancel_all();

        let result = in_flight.await?;

        assert!(
            matches!(result, Err(ApiError::Cancelled)),
            "expected cancellation, got {result:?}"
        );

        let after = scope.run(async { Ok::<_, ApiError>("fresh") }).await?;

        assert_eq!(after, "fresh");

        Ok(())
    }
}
