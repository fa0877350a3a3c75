//! Three-state gate around brief acquisition: Loading → Ready | Failed.
//!
//! Only one acquisition runs at a time. Each run takes a generation number;
//! a result whose generation is no longer current, or that lands after
//! `teardown()`, is dropped instead of touching state.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::notification::{Notification, Notifier};
use crate::provider::ContentProvider;
use crate::types::BriefContent;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load your strategic brief. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Arc<BriefContent>),
    Failed(String),
}

/// What a call to `load`/`retry` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    Failed,
    /// Not started: another acquisition is in flight, the gate is torn down,
    /// or (for retry) the gate was not in `Failed`
    Skipped,
    /// Started, but the result arrived after teardown and was dropped
    Discarded,
}

#[derive(Debug)]
struct GateInner {
    state: LoadState,
    generation: u64,
    in_flight: bool,
    torn_down: bool,
}

#[derive(Clone)]
pub struct LoadGate {
    inner: Arc<Mutex<GateInner>>,
    provider: Arc<dyn ContentProvider>,
    notifier: Arc<dyn Notifier>,
}

/// Releases the in-flight flag if the acquisition future is dropped early.
struct FlightGuard<'a> {
    inner: &'a Mutex<GateInner>,
    generation: u64,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if inner.generation == self.generation {
            inner.in_flight = false;
        }
    }
}

impl LoadGate {
    pub fn new(provider: Arc<dyn ContentProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(GateInner {
                state: LoadState::Loading,
                generation: 0,
                in_flight: false,
                torn_down: false,
            })),
            provider,
            notifier,
        }
    }

    pub fn state(&self) -> LoadState {
        self.inner.lock().state.clone()
    }

    pub fn content(&self) -> Option<Arc<BriefContent>> {
        match &self.inner.lock().state {
            LoadState::Ready(content) => Some(content.clone()),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.inner.lock().in_flight
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().torn_down
    }

    /// Run one acquisition and resolve the gate with its result.
    pub async fn load(&self) -> LoadOutcome {
        let generation = {
            let mut inner = self.inner.lock();
            if inner.torn_down || inner.in_flight {
                return LoadOutcome::Skipped;
            }
            inner.in_flight = true;
            inner.generation += 1;
            inner.state = LoadState::Loading;
            inner.generation
        };
        let _guard = FlightGuard {
            inner: &self.inner,
            generation,
        };

        log::info!(
            "Loading brief from '{}' provider (generation {})",
            self.provider.name(),
            generation
        );
        let result = self.provider.fetch_brief().await;

        let outcome = {
            let mut inner = self.inner.lock();
            if inner.torn_down || inner.generation != generation {
                log::debug!("Dropping brief result for stale generation {}", generation);
                return LoadOutcome::Discarded;
            }
            inner.in_flight = false;

            match result {
                Ok(content) => {
                    log::info!(
                        "Brief ready: {} activities, {} delegations",
                        content.supporting_activities.len(),
                        content.team_delegations.len()
                    );
                    inner.state = LoadState::Ready(Arc::new(content));
                    LoadOutcome::Ready
                }
                Err(e) => {
                    log::warn!("Brief acquisition failed: {}", e);
                    inner.state = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
                    LoadOutcome::Failed
                }
            }
        };

        if outcome == LoadOutcome::Failed {
            self.notifier.notify(Notification::error(
                "Loading Error",
                "Failed to load your strategic brief.",
            ));
        }
        outcome
    }

    /// Re-run acquisition after a failure. No-op from any other state.
    pub async fn retry(&self) -> LoadOutcome {
        if !matches!(self.inner.lock().state, LoadState::Failed(_)) {
            return LoadOutcome::Skipped;
        }
        self.load().await
    }

    /// The owning view is gone; any later result is discarded.
    pub fn teardown(&self) {
        let mut inner = self.inner.lock();
        inner.torn_down = true;
        inner.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BriefError;
    use crate::notification::{NotificationKind, RecordingNotifier};
    use crate::provider::{sample_brief, MockProvider};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Notify;

    /// Blocks every fetch until `release()` is called.
    struct HeldProvider {
        release: Notify,
        calls: AtomicU32,
    }

    impl HeldProvider {
        fn new() -> Self {
            Self {
                release: Notify::new(),
                calls: AtomicU32::new(0),
            }
        }

        fn release(&self) {
            self.release.notify_one();
        }
    }

    #[async_trait]
    impl ContentProvider for HeldProvider {
        fn name(&self) -> &str {
            "held"
        }

        async fn fetch_brief(&self) -> Result<crate::types::BriefContent, BriefError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(sample_brief())
        }
    }

    async fn wait_for_calls(provider: &HeldProvider, n: u32) {
        for _ in 0..100 {
            if provider.calls.load(Ordering::SeqCst) >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("provider was not called");
    }

    #[test]
    fn test_initial_state_is_loading() {
        let gate = LoadGate::new(
            Arc::new(MockProvider::default()),
            Arc::new(RecordingNotifier::new()),
        );
        assert_eq!(gate.state(), LoadState::Loading);
        assert!(gate.content().is_none());
    }

    #[tokio::test]
    async fn test_load_success() {
        let provider = Arc::new(MockProvider::default());
        let gate = LoadGate::new(provider.clone(), Arc::new(RecordingNotifier::new()));

        assert_eq!(gate.load().await, LoadOutcome::Ready);
        assert!(gate.content().is_some());
        assert!(!gate.is_in_flight());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_notifies_and_retry_recovers() {
        let provider = Arc::new(MockProvider::default().with_failure(true));
        let notifier = Arc::new(RecordingNotifier::new());
        let gate = LoadGate::new(provider.clone(), notifier.clone());

        assert_eq!(gate.load().await, LoadOutcome::Failed);
        assert_eq!(gate.state(), LoadState::Failed(LOAD_FAILED_MESSAGE.to_string()));
        assert_eq!(notifier.count(NotificationKind::Error), 1);
        assert_eq!(notifier.last().unwrap().title, "Loading Error");

        provider.set_failing(false);
        assert_eq!(gate.retry().await, LoadOutcome::Ready);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_only_from_failed() {
        let provider = Arc::new(MockProvider::default());
        let gate = LoadGate::new(provider.clone(), Arc::new(RecordingNotifier::new()));

        assert_eq!(gate.retry().await, LoadOutcome::Skipped);
        gate.load().await;
        assert_eq!(gate.retry().await, LoadOutcome::Skipped);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_load_is_skipped() {
        let provider = Arc::new(HeldProvider::new());
        let gate = LoadGate::new(provider.clone(), Arc::new(RecordingNotifier::new()));

        let background = gate.clone();
        let handle = tokio::spawn(async move { background.load().await });
        wait_for_calls(&provider, 1).await;

        assert!(gate.is_in_flight());
        assert_eq!(gate.load().await, LoadOutcome::Skipped);

        provider.release();
        assert_eq!(handle.await.unwrap(), LoadOutcome::Ready);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_result_after_teardown_is_discarded() {
        let provider = Arc::new(HeldProvider::new());
        let gate = LoadGate::new(provider.clone(), Arc::new(RecordingNotifier::new()));

        let background = gate.clone();
        let handle = tokio::spawn(async move { background.load().await });
        wait_for_calls(&provider, 1).await;

        gate.teardown();
        provider.release();

        assert_eq!(handle.await.unwrap(), LoadOutcome::Discarded);
        assert_eq!(gate.state(), LoadState::Loading);
        assert_eq!(gate.load().await, LoadOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_dropped_load_releases_in_flight() {
        let provider = Arc::new(HeldProvider::new());
        let gate = LoadGate::new(provider.clone(), Arc::new(RecordingNotifier::new()));

        let background = gate.clone();
        let handle = tokio::spawn(async move { background.load().await });
        wait_for_calls(&provider, 1).await;
        handle.abort();
        let _ = handle.await;

        assert!(!gate.is_in_flight());
        provider.release();
        assert_eq!(gate.load().await, LoadOutcome::Ready);
    }
}
