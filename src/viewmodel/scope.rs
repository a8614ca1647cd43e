use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

/// Background work owned by a view model.
///
/// Tasks spawned here stop at their next suspension point once the scope is
/// shut down; [`WorkScope::shutdown`] waits until all of them have finished.
#[derive(Clone)]
pub struct WorkScope {
    cancel: CancellationToken,
    tracker: TaskTracker,
}

impl WorkScope {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(&self, name: &'static str, work: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => debug!(task = name, "Work cancelled"),
                _ = work => debug!(task = name, "Work finished"),
            }
        })
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

impl Default for WorkScope {
    fn default() -> Self {
        Self::new()
    }
}
