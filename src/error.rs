//! Error types for the brief view
//!
//! Each error carries its recoverability and the place it surfaces in the
//! view: load failures replace the brief, submission and rating problems
//! are toasts, an unreadable stored checklist is recovered without a word.

use thiserror::Error;

/// Error types for brief loading, checklist and feedback operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BriefError {
    // Retryable errors
    #[error("Failed to load brief: {0}")]
    Acquisition(String),

    #[error("Failed to submit feedback: {0}")]
    Submission(String),

    // Recovered silently by callers (falls back to an empty checklist)
    #[error("Stored checklist is unreadable: {0}")]
    PersistenceRead(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown checklist item: {0}")]
    UnknownItem(String),

    #[error("Brief is not loaded yet")]
    NotReady,

    // Requires user action
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BriefError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BriefError::Acquisition(_) | BriefError::Submission(_) | BriefError::NotReady
        )
    }

    /// Returns true if this error requires user action to resolve
    pub fn requires_user_action(&self) -> bool {
        matches!(self, BriefError::Validation(_) | BriefError::Config(_))
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BriefError::Acquisition(_) => "Check your connection and retry loading the brief.",
            BriefError::Submission(_) => "Your rating was kept. Try submitting again.",
            BriefError::PersistenceRead(_) => "Checklist progress was reset to empty.",
            BriefError::Storage(_) => "Check file permissions and disk space.",
            BriefError::UnknownItem(_) => "Reload the brief to refresh the checklist.",
            BriefError::NotReady => "Wait for the brief to finish loading.",
            BriefError::Validation(_) => "Rate the brief from 1 to 5 stars before submitting.",
            BriefError::Config(_) => "Check your configuration in ~/.morningbrief/config.json",
        }
    }
}

impl From<std::io::Error> for BriefError {
    fn from(err: std::io::Error) -> Self {
        BriefError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BriefError {
    fn from(err: serde_json::Error) -> Self {
        BriefError::Storage(err.to_string())
    }
}

/// Where an error shows up in the brief view
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorSurface {
    /// Replaces the brief with an error state and a retry control
    LoadBanner,
    /// Transient toast; the view stays interactive
    Toast,
    /// Already recovered (empty checklist); logged, never shown
    Silent,
    /// Stops the process before a view exists
    Fatal,
}

/// Serializable error envelope for whatever renders the brief
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewError {
    pub title: &'static str,
    pub message: String,
    pub surface: ErrorSurface,
    pub can_retry: bool,
    pub recovery_suggestion: &'static str,
}

impl BriefError {
    pub fn surface(&self) -> ErrorSurface {
        match self {
            BriefError::Acquisition(_) | BriefError::NotReady => ErrorSurface::LoadBanner,
            BriefError::Submission(_) | BriefError::Validation(_) | BriefError::UnknownItem(_) => {
                ErrorSurface::Toast
            }
            BriefError::PersistenceRead(_) => ErrorSurface::Silent,
            BriefError::Storage(_) | BriefError::Config(_) => ErrorSurface::Fatal,
        }
    }

    /// Short heading, matching the notification titles the view raises
    pub fn title(&self) -> &'static str {
        match self {
            BriefError::Acquisition(_) => "Brief Unavailable",
            BriefError::NotReady => "Brief Loading",
            BriefError::Submission(_) => "Submission Failed",
            BriefError::Validation(_) => "Rating Required",
            BriefError::UnknownItem(_) => "Unknown Task",
            BriefError::PersistenceRead(_) => "Checklist Reset",
            BriefError::Storage(_) => "Storage Error",
            BriefError::Config(_) => "Configuration Error",
        }
    }
}

impl From<&BriefError> for ViewError {
    fn from(err: &BriefError) -> Self {
        ViewError {
            title: err.title(),
            message: err.to_string(),
            surface: err.surface(),
            can_retry: err.is_retryable(),
            recovery_suggestion: err.recovery_suggestion(),
        }
    }
}
