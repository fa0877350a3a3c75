//! Brief quality rating and its submission boundary.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::BriefError;
use crate::notification::{Notification, Notifier};
use crate::types::FeedbackPayload;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Accepts `{ rating }`; no response payload is consumed.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn submit(&self, payload: FeedbackPayload) -> Result<(), BriefError>;
}

/// Simulated submission: waits, then succeeds unless told to fail.
pub struct MockFeedbackSink {
    delay: Duration,
    fail: AtomicBool,
    call_count: AtomicU32,
    last_payload: parking_lot::Mutex<Option<FeedbackPayload>>,
}

impl MockFeedbackSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: AtomicBool::new(false),
            call_count: AtomicU32::new(0),
            last_payload: parking_lot::Mutex::new(None),
        }
    }

    pub fn with_failure(self, fail: bool) -> Self {
        self.fail.store(fail, Ordering::SeqCst);
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<FeedbackPayload> {
        *self.last_payload.lock()
    }
}

impl Default for MockFeedbackSink {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl FeedbackSink for MockFeedbackSink {
    async fn submit(&self, payload: FeedbackPayload) -> Result<(), BriefError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock() = Some(payload);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(BriefError::Submission("Mock feedback sink disabled".to_string()));
        }
        Ok(())
    }
}

/// POSTs the rating as JSON to a configured endpoint.
pub struct HttpFeedbackSink {
    client: reqwest::Client,
    url: url::Url,
}

impl HttpFeedbackSink {
    pub fn new(url: url::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl FeedbackSink for HttpFeedbackSink {
    async fn submit(&self, payload: FeedbackPayload) -> Result<(), BriefError> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| BriefError::Submission(format!("Request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(BriefError::Submission(format!(
                "Feedback endpoint returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Ephemeral star rating. Never persisted.
pub struct FeedbackState {
    /// 0 = not yet rated
    rating: AtomicU8,
    submitting: AtomicBool,
    sink: Arc<dyn FeedbackSink>,
    notifier: Arc<dyn Notifier>,
}

/// Clears the in-flight flag even if the submit future is dropped mid-await.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl FeedbackState {
    pub fn new(sink: Arc<dyn FeedbackSink>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            rating: AtomicU8::new(0),
            submitting: AtomicBool::new(false),
            sink,
            notifier,
        }
    }

    pub fn rating(&self) -> u8 {
        self.rating.load(Ordering::SeqCst)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn set_rating(&self, rating: u8) -> Result<(), BriefError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(BriefError::Validation(format!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }
        self.rating.store(rating, Ordering::SeqCst);
        Ok(())
    }

    /// Send the current rating. On success the rating resets to 0; on failure it is kept.
    pub async fn submit(&self) -> Result<(), BriefError> {
        let rating = self.rating();
        if rating == 0 {
            self.notifier.notify(Notification::error(
                "Rating Required",
                "Please rate the brief quality before submitting.",
            ));
            return Err(BriefError::Validation("rating required".to_string()));
        }

        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BriefError::Validation(
                "submission already in progress".to_string(),
            ));
        }
        let _in_flight = InFlight(&self.submitting);

        match self.sink.submit(FeedbackPayload { rating }).await {
            Ok(()) => {
                log::info!("Feedback submitted (rating {})", rating);
                // Only clear if the user has not re-rated while we were waiting
                let _ = self
                    .rating
                    .compare_exchange(rating, 0, Ordering::SeqCst, Ordering::SeqCst);
                self.notifier.notify(Notification::success(
                    "Feedback Submitted",
                    "Thank you for helping us improve!",
                ));
                Ok(())
            }
            Err(e) => {
                log::warn!("Feedback submission failed: {}", e);
                self.notifier.notify(Notification::error(
                    "Submission Failed",
                    "Unable to submit feedback. Please try again.",
                ));
                Err(e)
            }
        }
    }
}
