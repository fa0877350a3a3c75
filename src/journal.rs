//! Evening journal: the input side of the workflow.
//!
//! An entry captures tomorrow's energy, time and workload context. Submitting
//! it hands the entry to a `JournalSink`; brief generation happens elsewhere.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::BriefError;
use crate::types::{energy_label, WorkloadAdvice, WorkloadTier};

pub const DEFAULT_ENERGY_LEVEL: u8 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub energy_level: u8,
    #[serde(default)]
    pub energy_context: String,
    pub available_hours: f64,
    #[serde(default)]
    pub time_constraints: String,
    pub workload: Option<WorkloadTier>,
    #[serde(default)]
    pub workload_context: String,
    #[serde(default)]
    pub priority_opportunities: String,
    /// Did today's primary directive get done?
    #[serde(default)]
    pub completed_today: bool,
    /// Only meaningful when `completed_today` is false
    #[serde(default)]
    pub blocker_description: String,
    #[serde(default)]
    pub key_focus_areas: String,
    #[serde(default)]
    pub partner_coordination: bool,
    /// Only meaningful when `partner_coordination` is true
    #[serde(default)]
    pub coordination_requests: String,
}

impl Default for JournalEntry {
    fn default() -> Self {
        Self {
            energy_level: DEFAULT_ENERGY_LEVEL,
            energy_context: String::new(),
            available_hours: 0.0,
            time_constraints: String::new(),
            workload: None,
            workload_context: String::new(),
            priority_opportunities: String::new(),
            completed_today: false,
            blocker_description: String::new(),
            key_focus_areas: String::new(),
            partner_coordination: false,
            coordination_requests: String::new(),
        }
    }
}

impl JournalEntry {
    pub fn energy_label(&self) -> &'static str {
        energy_label(self.energy_level)
    }

    pub fn workload_advice(&self) -> Option<WorkloadAdvice> {
        self.workload.map(|w| w.advice())
    }

    pub fn validate(&self) -> Result<(), BriefError> {
        if !(1..=10).contains(&self.energy_level) {
            return Err(BriefError::Validation(format!(
                "Energy level must be between 1 and 10, got {}",
                self.energy_level
            )));
        }
        if !self.available_hours.is_finite() || self.available_hours < 0.0 {
            return Err(BriefError::Validation(
                "Available hours must be a non-negative number".to_string(),
            ));
        }
        if self.workload.is_none() {
            return Err(BriefError::Validation(
                "Select a workload intensity level".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tomorrow's date as shown in the journal header ("Planning for: ...").
pub fn planning_date(today: NaiveDate) -> String {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    tomorrow.format("%A, %B %-d, %Y").to_string()
}

pub fn planning_date_today() -> String {
    planning_date(Local::now().date_naive())
}

#[async_trait]
pub trait JournalSink: Send + Sync {
    async fn submit(&self, entry: &JournalEntry) -> Result<(), BriefError>;
}

/// Waits, then accepts the entry.
pub struct MockJournalSink {
    delay: Duration,
    call_count: AtomicU32,
}

impl MockJournalSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            call_count: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JournalSink for MockJournalSink {
    async fn submit(&self, entry: &JournalEntry) -> Result<(), BriefError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        log::info!(
            "Journal accepted: energy {} ({}), {}h, workload {}",
            entry.energy_level,
            entry.energy_label(),
            entry.available_hours,
            entry.workload.map(|w| w.as_str()).unwrap_or("unset")
        );
        Ok(())
    }
}

/// Validate, then submit. Invalid entries never reach the sink.
pub async fn submit_journal(entry: &JournalEntry, sink: &dyn JournalSink) -> Result<(), BriefError> {
    entry.validate()?;
    sink.submit(entry).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_entry() -> JournalEntry {
        JournalEntry {
            available_hours: 4.0,
            workload: Some(WorkloadTier::Moderate),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let entry = JournalEntry::default();
        assert_eq!(entry.energy_level, 7);
        assert_eq!(entry.energy_label(), "Good Energy");
        assert!(entry.workload_advice().is_none());
    }

    #[test]
    fn test_validate_requires_workload() {
        let entry = JournalEntry {
            workload: None,
            ..valid_entry()
        };
        assert!(matches!(entry.validate(), Err(BriefError::Validation(_))));
    }

    #[test]
    fn test_validate_energy_and_hours() {
        assert!(valid_entry().validate().is_ok());

        let entry = JournalEntry {
            energy_level: 11,
            ..valid_entry()
        };
        assert!(entry.validate().is_err());

        let entry = JournalEntry {
            available_hours: -1.0,
            ..valid_entry()
        };
        assert!(entry.validate().is_err());

        let entry = JournalEntry {
            available_hours: f64::NAN,
            ..valid_entry()
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_planning_date_is_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(planning_date(today), "Friday, October 16, 2026");
    }

    #[test]
    fn test_entry_deserializes_camel_case() {
        let json = r#"{"energyLevel": 3, "availableHours": 2, "workload": "Critical"}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.energy_label(), "Low Energy");
        assert_eq!(
            entry.workload_advice().unwrap().headline,
            "Survival Mode"
        );
    }

    #[tokio::test]
    async fn test_submit_journal_skips_sink_when_invalid() {
        let sink = MockJournalSink::new(Duration::ZERO);
        let entry = JournalEntry::default();
        assert!(submit_journal(&entry, &sink).await.is_err());
        assert_eq!(sink.call_count(), 0);

        submit_journal(&valid_entry(), &sink).await.unwrap();
        assert_eq!(sink.call_count(), 1);
    }
}
