//! Bounded provider calls.
//!
//! Every provider call runs under its own timeout, clipped to the optional
//! overall deadline, and races a cancellation signal. A cancelled or expired
//! call resolves to an error value so the caller can apply its fallback.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{timeout_at, Instant};

use crate::domain::error::ProviderError;

/// Shared limits for all calls of one scoring request.
#[derive(Debug, Clone)]
pub struct CallGuard {
    deadline: Option<Instant>,
    cancel: watch::Receiver<bool>,
}

impl CallGuard {
    /// `cancel` signals cancellation by becoming `true`.
    #[must_use]
    pub fn new(deadline: Option<Duration>, cancel: watch::Receiver<bool>) -> Self {
        Self {
            deadline: deadline.map(|d| Instant::now() + d),
            cancel,
        }
    }

    /// Run `call` bounded by `timeout`, the deadline, and cancellation.
    pub async fn run<T, F>(
        &self,
        provider: &'static str,
        timeout: Duration,
        call: F,
    ) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let limit = self.limit_for(timeout);
        let mut cancel = self.cancel.clone();

        tokio::select! {
            biased;
            () = cancelled(&mut cancel) => Err(ProviderError::Cancelled { provider }),
            outcome = timeout_at(limit, call) => match outcome {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout { provider }),
            },
        }
    }

    fn limit_for(&self, timeout: Duration) -> Instant {
        let own = Instant::now() + timeout;
        match self.deadline {
            Some(deadline) => own.min(deadline),
            None => own,
        }
    }
}

/// Resolves once the flag is `true`. Pends forever if the sender is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
