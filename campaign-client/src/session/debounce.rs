//! SearchDebouncer - coalesce rapid query-text changes
//!
//! Each schedule cancels the previously scheduled run, so only the last
//! value inside the quiet window ever fires. Pure timing; the scheduled
//! future carries the actual work.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period before a search fires
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Cancel-and-reschedule delay wrapper around a spawned task
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `task` to run after the quiet period, cancelling any
    /// previously scheduled task that has not fired yet.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancel the pending task without rescheduling
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::advance;

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_schedule_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        for _ in 0..3 {
            let fired = fired.clone();
            debouncer.schedule(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            settle().await;
            advance(Duration::from_millis(100)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        advance(SEARCH_DEBOUNCE).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_fires_before_quiet_period() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        let counter = fired.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;

        advance(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        let counter = fired.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        advance(SEARCH_DEBOUNCE * 2).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
