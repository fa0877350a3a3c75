//! Content acquisition boundary.
//!
//! `MockProvider` stands in for the brief generator with a fixed delay and
//! static content; `HttpProvider` fetches BriefContent JSON from an endpoint.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;

use crate::error::BriefError;
use crate::types::{BriefContent, ContextMetrics, WorkloadTier};

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &str;

    async fn fetch_brief(&self) -> Result<BriefContent, BriefError>;
}

pub struct MockProvider {
    delay: Duration,
    fail: AtomicBool,
    call_count: AtomicU32,
}

impl MockProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: AtomicBool::new(false),
            call_count: AtomicU32::new(0),
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
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_brief(&self) -> Result<BriefContent, BriefError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(BriefError::Acquisition(
                "Mock provider disabled".to_string(),
            ));
        }
        Ok(sample_brief())
    }
}

/// The static brief the mock provider serves, stamped with today's date.
pub fn sample_brief() -> BriefContent {
    let now = Local::now();
    BriefContent {
        date: now.format("%A, %B %-d, %Y").to_string(),
        generated_at: now.format("%I:%M %p").to_string(),
        primary_directive: "Execute strategic goal achievement - prioritize high-impact \
                            initiatives requiring focused attention"
            .to_string(),
        supporting_activities: vec![
            "Conduct comprehensive research and competitive analysis".to_string(),
            "Prepare detailed project framework with success metrics".to_string(),
            "Schedule strategic collaboration discussions".to_string(),
        ],
        team_delegations: vec![
            "Delegate research tasks to team for next-day briefing".to_string(),
            "Request team support for communication drafting".to_string(),
        ],
        alternatives: vec![
            "Switch to administrative and planning tasks if creative energy is low".to_string(),
            "Use energy dips for research and data organization activities".to_string(),
        ],
        context: ContextMetrics {
            energy_level: 7,
            available_hours: 4.0,
            workload: WorkloadTier::Moderate,
            estimated_duration: 4.0,
        },
    }
}

pub struct HttpProvider {
    client: reqwest::Client,
    url: url::Url,
}

impl HttpProvider {
    pub fn new(url: url::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl ContentProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_brief(&self) -> Result<BriefContent, BriefError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| BriefError::Acquisition(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BriefError::Acquisition(format!(
                "Brief endpoint returned {}",
                status
            )));
        }

        let brief = resp
            .json::<BriefContent>()
            .await
            .map_err(|e| BriefError::Acquisition(format!("Invalid brief payload: {}", e)))?;

        brief
            .validate()
            .map_err(|e| BriefError::Acquisition(format!("Rejected brief payload: {}", e)))?;
        Ok(brief)
    }
}
