use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Stops a running crawl at its next pacing wait.
///
/// Cancellation is sticky: once triggered, every later crawl on the same
/// spider stops before its first fetch.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    inner: Arc<CancelState>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Waits out `delay`. Returns `false` if cancelled before or during the wait.
    pub(crate) async fn pace(&self, delay: Duration) -> bool {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_cancelled() {
            return false;
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => !self.is_cancelled(),
            _ = notified => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pace_completes() {
        let handle = CancelHandle::new();
        assert!(handle.pace(Duration::from_millis(1)).await);
        assert!(!handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_before_pace() {
        let handle = CancelHandle::new();
        handle.cancel();
        assert!(!handle.pace(Duration::ZERO).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_wait() {
        let handle = CancelHandle::new();
        let canceller = handle.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let started = tokio::time::Instant::now();
        assert!(!handle.pace(Duration::from_secs(3_600)).await);
        assert!(started.elapsed() < Duration::from_secs(3_600));
    }
}
