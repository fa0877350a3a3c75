//! Completed-item tracking for the brief checklist.
//!
//! Completion is tracked by item id, never by position in the rendered list.
//! Every mutation rewrites the full id list under `checkedItems`.

use std::sync::Arc;

use serde_json::Value;

use crate::actions::{self, item_ids};
use crate::error::BriefError;
use crate::notification::{Notification, Notifier};
use crate::store::{PersistedStore, CHECKED_ITEMS_KEY};
use crate::types::ActionItem;

/// Progress summary for the sidebar ("n of m tasks completed")
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
    pub all_complete: bool,
}

pub struct ChecklistState {
    /// Insertion-ordered, unique
    completed_ids: Vec<String>,
    store: Arc<dyn PersistedStore>,
    notifier: Arc<dyn Notifier>,
}

impl ChecklistState {
    /// Restore from the store. Missing or unreadable data yields an empty set.
    pub fn load(store: Arc<dyn PersistedStore>, notifier: Arc<dyn Notifier>) -> Self {
        let completed_ids = match read_completed_ids(store.as_ref()) {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!("{}; starting with an empty checklist", e);
                Vec::new()
            }
        };

        Self {
            completed_ids,
            store,
            notifier,
        }
    }

    pub fn completed_ids(&self) -> &[String] {
        &self.completed_ids
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_ids.iter().any(|c| c == id)
    }

    /// Mark `id` done or not done.
    ///
    /// Checking requires the id to be in `items`; unchecking accepts any stored id
    /// so stale entries can still be cleared.
    pub fn toggle(&mut self, items: &[ActionItem], id: &str, checked: bool) -> Result<(), BriefError> {
        if checked {
            let item = items
                .iter()
                .find(|item| item.id == id)
                .ok_or_else(|| BriefError::UnknownItem(id.to_string()))?;

            if !self.is_completed(id) {
                self.completed_ids.push(id.to_string());
                self.notifier.notify(Notification::task_completed(&item.text));
            }
        } else {
            self.completed_ids.retain(|c| c != id);
        }

        self.persist();
        Ok(())
    }

    /// Replace the completed set with every current item id.
    pub fn complete_all(&mut self, items: &[ActionItem]) {
        self.completed_ids = item_ids(items);
        self.persist();
    }

    pub fn reset(&mut self) {
        self.completed_ids.clear();
        self.persist();
    }

    pub fn completion_percentage(&self, items: &[ActionItem]) -> u8 {
        actions::completion_percentage(&self.completed_ids, items)
    }

    pub fn progress(&self, items: &[ActionItem]) -> Progress {
        let completed = actions::count_completed(&self.completed_ids, items);
        let total = items.len();
        Progress {
            completed,
            total,
            percentage: self.completion_percentage(items),
            all_complete: total > 0 && completed == total,
        }
    }

    // Write failures are logged; in-memory state stays authoritative.
    fn persist(&self) {
        let value = Value::from(self.completed_ids.clone());
        if let Err(e) = self.store.save(CHECKED_ITEMS_KEY, value) {
            log::error!("Failed to persist checklist: {}", e);
        }
    }
}

/// Parse the stored id list. Absent → empty; anything but an array of strings
/// is a `PersistenceRead` error.
pub fn read_completed_ids(store: &dyn PersistedStore) -> Result<Vec<String>, BriefError> {
    let value = match store.load(CHECKED_ITEMS_KEY) {
        Some(v) => v,
        None => return Ok(Vec::new()),
    };

    // Stored by a string-only store (e.g. raw localStorage text)
    let value = match value {
        Value::String(raw) => serde_json::from_str::<Value>(&raw)
            .map_err(|e| BriefError::PersistenceRead(e.to_string()))?,
        other => other,
    };

    let ids: Vec<String> = serde_json::from_value(value)
        .map_err(|e| BriefError::PersistenceRead(e.to_string()))?;

    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}
