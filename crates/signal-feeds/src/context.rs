//! Fetch Context
//!
//! Timeout and cancellation shared by every adapter call of one run.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{FeedError, Result};

/// Trips every [`FetchContext`] created from it
#[derive(Clone, Debug)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Abort all in-flight calls; they resolve to [`FeedError::Cancelled`]
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn context(&self, timeout: Duration) -> FetchContext {
        FetchContext {
            timeout,
            cancel: self.tx.subscribe(),
        }
    }
}

/// Per-call deadline plus the run's cancel signal
#[derive(Clone, Debug)]
pub struct FetchContext {
    timeout: Duration,
    cancel: watch::Receiver<bool>,
}

impl FetchContext {
    /// Context with a timeout and no external cancellation
    pub fn new(timeout: Duration) -> Self {
        let (_tx, cancel) = watch::channel(false);
        Self { timeout, cancel }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Drive `fut` until it completes, the timeout elapses or the run is
    /// cancelled, whichever comes first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let mut cancel = self.cancel.clone();
        let already_cancelled = *cancel.borrow_and_update();
        if already_cancelled {
            return Err(FeedError::Cancelled);
        }

        tokio::select! {
            outcome = tokio::time::timeout(self.timeout, fut) => {
                outcome.map_err(|_| FeedError::TimedOut(self.timeout))?
            }
            () = cancelled(&mut cancel) => Err(FeedError::Cancelled),
        }
    }
}

/// Resolves once the flag flips to true; never resolves if the handle is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    let closed = rx.wait_for(|flag| *flag).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
