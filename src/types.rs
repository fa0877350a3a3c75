use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BriefError;

/// Workload intensity entered in the evening journal ("TNT workload")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadTier {
    Light,
    Moderate,
    Heavy,
    Critical,
}

/// Headline and guidance shown for a workload tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadAdvice {
    pub headline: &'static str,
    pub details: &'static str,
}

impl WorkloadTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadTier::Light => "Light",
            WorkloadTier::Moderate => "Moderate",
            WorkloadTier::Heavy => "Heavy",
            WorkloadTier::Critical => "Critical",
        }
    }

    pub fn advice(&self) -> WorkloadAdvice {
        match self {
            WorkloadTier::Light => WorkloadAdvice {
                headline: "Optimal Focus Day",
                details: "Plan longer strategic sessions, complex projects, and important calls. \
                          Maximum productivity window available.",
            },
            WorkloadTier::Moderate => WorkloadAdvice {
                headline: "Balanced Approach",
                details: "Focus on quick wins and efficient task completion. \
                          Balance commitments with consistent progress.",
            },
            WorkloadTier::Heavy => WorkloadAdvice {
                headline: "Micro-Task Mode",
                details: "Limit to 15-minute focused windows. \
                          Prioritize delegation and relationship maintenance.",
            },
            WorkloadTier::Critical => WorkloadAdvice {
                headline: "Survival Mode",
                details: "Maintenance only. Delegate everything possible. \
                          Focus on next-day recovery preparation.",
            },
        }
    }
}

impl fmt::Display for WorkloadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadTier {
    type Err = BriefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(WorkloadTier::Light),
            "moderate" => Ok(WorkloadTier::Moderate),
            "heavy" => Ok(WorkloadTier::Heavy),
            "critical" => Ok(WorkloadTier::Critical),
            other => Err(BriefError::Validation(format!(
                "Unknown workload tier '{}'. Expected Light, Moderate, Heavy or Critical",
                other
            ))),
        }
    }
}

/// Human label for an energy level on the 1-10 scale.
pub fn energy_label(level: u8) -> &'static str {
    match level {
        0..=2 => "Exhausted",
        3..=4 => "Low Energy",
        5..=6 => "Moderate",
        7..=8 => "Good Energy",
        _ => "High Energy",
    }
}

/// Context metrics shown above the brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMetrics {
    /// Energy level, 1-10
    pub energy_level: u8,
    /// Focus hours available today
    pub available_hours: f64,
    pub workload: WorkloadTier,
    /// Estimated hours to work through the brief
    pub estimated_duration: f64,
}

impl ContextMetrics {
    pub fn energy_label(&self) -> &'static str {
        energy_label(self.energy_level)
    }
}

/// The payload a ContentProvider returns. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefContent {
    /// Long-form date the brief is for, e.g. "Friday, October 16, 2026"
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub generated_at: String,
    pub primary_directive: String,
    #[serde(default)]
    pub supporting_activities: Vec<String>,
    #[serde(default)]
    pub team_delegations: Vec<String>,
    /// Display-only; never turned into checklist items
    #[serde(default)]
    pub alternatives: Vec<String>,
    pub context: ContextMetrics,
}

impl BriefContent {
    /// Reject payloads outside the data model: energy 1-10, non-negative
    /// hours and duration, non-empty primary directive.
    pub fn validate(&self) -> Result<(), BriefError> {
        if self.primary_directive.trim().is_empty() {
            return Err(BriefError::Validation(
                "Brief has no primary directive".to_string(),
            ));
        }
        let ctx = &self.context;
        if !(1..=10).contains(&ctx.energy_level) {
            return Err(BriefError::Validation(format!(
                "Energy level must be between 1 and 10, got {}",
                ctx.energy_level
            )));
        }
        if !ctx.available_hours.is_finite() || ctx.available_hours < 0.0 {
            return Err(BriefError::Validation(format!(
                "Available hours must be a non-negative number, got {}",
                ctx.available_hours
            )));
        }
        if !ctx.estimated_duration.is_finite() || ctx.estimated_duration < 0.0 {
            return Err(BriefError::Validation(format!(
                "Estimated duration must be a non-negative number, got {}",
                ctx.estimated_duration
            )));
        }
        Ok(())
    }
}

/// Checklist priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single completable unit derived from brief content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub text: String,
    pub priority: Priority,
}

/// Display theme persisted under the `theme` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Body sent to the feedback submission boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub rating: u8,
}
