/// Background refresh of the selected metric
///
/// The scheduler never touches UI state. It reads a snapshot of the
/// selected index from a watch channel and queues successful results on an
/// mpsc channel that the UI loop drains.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::catalog::MetricCatalog;
use super::metrics::{FetchResult, MetricProvider};

/// A fresh result for one catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshUpdate {
    pub index: usize,
    pub result: FetchResult,
}

pub struct RefreshScheduler {
    interval: Duration,
    catalog: Arc<MetricCatalog>,
    provider: Arc<dyn MetricProvider>,
    selection: watch::Receiver<usize>,
    updates: mpsc::UnboundedSender<RefreshUpdate>,
    shutdown: CancellationToken,
}

impl RefreshScheduler {
    pub fn new(
        interval: Duration,
        catalog: Arc<MetricCatalog>,
        provider: Arc<dyn MetricProvider>,
        selection: watch::Receiver<usize>,
        updates: mpsc::UnboundedSender<RefreshUpdate>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            interval,
            catalog,
            provider,
            selection,
            updates,
            shutdown,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the UI already fetched eagerly
        ticker.tick().await;

        tracing::debug!(interval = ?self.interval, "refresh scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let Some(update) = self.tick() else { continue };

                    if self.shutdown.is_cancelled() {
                        break;
                    }
                    if self.updates.send(update).is_err() {
                        // UI side is gone
                        break;
                    }
                }
            }
        }

        tracing::debug!("refresh scheduler stopped");
    }

    /// Fetch the currently selected entry if it is refreshable.
    /// Failures are dropped here and never reach the UI.
    fn tick(&self) -> Option<RefreshUpdate> {
        let index = *self.selection.borrow();
        let metric = self.catalog.get(index)?.metric()?;

        let result = self.provider.fetch(metric);
        if let Some(err) = result.error {
            tracing::debug!(index, ?metric, error = %err, "background refresh failed, keeping last display");
            return None;
        }

        Some(RefreshUpdate { index, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Metric;
    use crate::core::errors::SanitizedError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TICK: Duration = Duration::from_millis(10);

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    impl MetricProvider for CountingProvider {
        fn fetch(&self, metric: Metric) -> FetchResult {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                FetchResult::failed("primary", "fallback", SanitizedError::Io)
            } else {
                FetchResult::ok("primary", format!("{:?} #{}", metric, n))
            }
        }
    }

    fn scheduler(
        provider: Arc<dyn MetricProvider>,
        selected: usize,
    ) -> (
        RefreshScheduler,
        watch::Sender<usize>,
        mpsc::UnboundedReceiver<RefreshUpdate>,
        CancellationToken,
    ) {
        let (selection_tx, selection_rx) = watch::channel(selected);
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let scheduler = RefreshScheduler::new(
            TICK,
            MetricCatalog::standard(),
            provider,
            selection_rx,
            updates_tx,
            shutdown.clone(),
        );
        (scheduler, selection_tx, updates_rx, shutdown)
    }

    #[tokio::test]
    async fn test_refreshes_selected_entry() {
        let provider = CountingProvider::new(false);
        let (scheduler, selection_tx, mut updates, shutdown) = scheduler(provider.clone(), 1);
        let handle = scheduler.spawn();

        let update = tokio::time::timeout(Duration::from_secs(2), updates.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(update.index, 1);
        assert!(update.result.detail_text.starts_with("Disk"));

        selection_tx.send_replace(2);
        let update = loop {
            let update = tokio::time::timeout(Duration::from_secs(2), updates.recv())
                .await
                .unwrap()
                .unwrap();
            if update.index == 2 {
                break update;
            }
        };
        assert!(update.result.detail_text.starts_with("User"));

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_quit_entry_is_never_fetched() {
        let provider = CountingProvider::new(false);
        let (scheduler, _selection_tx, mut updates, shutdown) = scheduler(provider.clone(), 3);
        let handle = scheduler.spawn();

        tokio::time::sleep(TICK * 6).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let provider = CountingProvider::new(true);
        let (scheduler, _selection_tx, mut updates, shutdown) = scheduler(provider.clone(), 0);
        let handle = scheduler.spawn();

        tokio::time::sleep(TICK * 6).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert!(provider.calls.load(Ordering::SeqCst) > 0);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stops_promptly_after_cancellation() {
        let provider = CountingProvider::new(false);
        let (scheduler, _selection_tx, mut updates, shutdown) = scheduler(provider.clone(), 0);
        let handle = scheduler.spawn();

        tokio::time::sleep(TICK * 3).await;
        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("scheduler did not stop")
            .unwrap();

        while updates.try_recv().is_ok() {}
        let calls = provider.calls.load(Ordering::SeqCst);

        tokio::time::sleep(TICK * 5).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), calls);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stops_when_ui_receiver_dropped() {
        let provider = CountingProvider::new(false);
        let (scheduler, _selection_tx, updates, _shutdown) = scheduler(provider, 0);
        drop(updates);

        tokio::time::timeout(Duration::from_secs(1), scheduler.spawn())
            .await
            .expect("scheduler kept running")
            .unwrap();
    }
}
