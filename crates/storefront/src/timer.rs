//! Redirect timer and submission lifecycle for native hosts.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use jewelmart_account::RedirectTimer;

/// [`RedirectTimer`] backed by the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRedirectTimer;

impl RedirectTimer for TokioRedirectTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Handle to a spawned submission, tied to its owner's lifetime.
///
/// Dropping the handle aborts the task: the in-flight remote call and the
/// pending redirect are torn down with it, and no navigation happens after
/// disposal.
#[derive(Debug)]
pub struct SubmissionHandle {
    handle: Option<JoinHandle<()>>,
}

impl SubmissionHandle {
    /// Run a submission future on the tokio runtime.
    ///
    /// Clone the flow into the future (clones share observable state): the
    /// caller keeps its handle for rendering while the task drives the
    /// attempt.
    pub fn spawn<F>(submission: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(submission)),
        }
    }

    /// Detach: let the submission run to completion unsupervised.
    pub fn detach(mut self) {
        self.handle = None;
    }

    /// Wait for the submission to finish.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for SubmissionHandle {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
