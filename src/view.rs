//! The brief page: load gate, derived checklist, completion state and feedback.
//!
//! Checklist and feedback operations are only reachable once the gate is
//! `Ready`; before that they return `BriefError::NotReady`. Dropping the view
//! tears the gate down so an in-flight acquisition cannot update it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::actions::derive_action_items;
use crate::checklist::{ChecklistState, Progress};
use crate::error::BriefError;
use crate::feedback::{FeedbackSink, FeedbackState};
use crate::gate::{LoadGate, LoadOutcome, LoadState};
use crate::notification::Notifier;
use crate::provider::ContentProvider;
use crate::store::PersistedStore;
use crate::theme;
use crate::types::{ActionItem, BriefContent, Theme};

pub struct BriefView {
    gate: LoadGate,
    checklist: ChecklistState,
    feedback: FeedbackState,
    store: Arc<dyn PersistedStore>,
    mounted: AtomicBool,
}

impl BriefView {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        feedback_sink: Arc<dyn FeedbackSink>,
        store: Arc<dyn PersistedStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gate: LoadGate::new(provider, notifier.clone()),
            checklist: ChecklistState::load(store.clone(), notifier.clone()),
            feedback: FeedbackState::new(feedback_sink, notifier),
            store,
            mounted: AtomicBool::new(false),
        }
    }

    /// First acquisition for this view. Later calls are skipped; use `retry`.
    pub async fn mount(&self) -> LoadOutcome {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return LoadOutcome::Skipped;
        }
        self.gate.load().await
    }

    pub async fn retry(&self) -> LoadOutcome {
        self.gate.retry().await
    }

    pub fn load_state(&self) -> LoadState {
        self.gate.state()
    }

    /// Handle for driving the gate from another task.
    pub fn gate(&self) -> &LoadGate {
        &self.gate
    }

    pub fn content(&self) -> Result<Arc<BriefContent>, BriefError> {
        self.gate.content().ok_or(BriefError::NotReady)
    }

    /// Checklist for the loaded brief, recomputed from the current content.
    pub fn action_items(&self) -> Result<Vec<ActionItem>, BriefError> {
        let content = self.content()?;
        Ok(derive_action_items(&content))
    }

    pub fn completed_ids(&self) -> Result<&[String], BriefError> {
        self.content()?;
        Ok(self.checklist.completed_ids())
    }

    pub fn is_completed(&self, id: &str) -> Result<bool, BriefError> {
        self.content()?;
        Ok(self.checklist.is_completed(id))
    }

    pub fn toggle(&mut self, id: &str, checked: bool) -> Result<(), BriefError> {
        let items = self.action_items()?;
        self.checklist.toggle(&items, id, checked)
    }

    pub fn complete_all(&mut self) -> Result<(), BriefError> {
        let items = self.action_items()?;
        self.checklist.complete_all(&items);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), BriefError> {
        self.content()?;
        self.checklist.reset();
        Ok(())
    }

    pub fn completion_percentage(&self) -> Result<u8, BriefError> {
        Ok(self.checklist.completion_percentage(&self.action_items()?))
    }

    pub fn progress(&self) -> Result<Progress, BriefError> {
        Ok(self.checklist.progress(&self.action_items()?))
    }

    pub fn rating(&self) -> u8 {
        self.feedback.rating()
    }

    pub fn set_rating(&self, rating: u8) -> Result<(), BriefError> {
        self.content()?;
        self.feedback.set_rating(rating)
    }

    pub async fn submit_feedback(&self) -> Result<(), BriefError> {
        self.content()?;
        self.feedback.submit().await
    }

    pub fn theme(&self) -> Theme {
        theme::load_theme(self.store.as_ref())
    }

    pub fn toggle_theme(&self) -> Result<Theme, BriefError> {
        theme::toggle_theme(self.store.as_ref())
    }
}

impl Drop for BriefView {
    fn drop(&mut self) {
        self.gate.teardown();
    }
}
