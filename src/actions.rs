//! Checklist derivation from brief content.
//!
//! The list is a pure projection: primary directive first, then supporting
//! activities, then delegations, each in source order. Ids are positional
//! (`activity-{i}`, `delegation-{i}`), so they stay stable only while the
//! source lists keep their order.

use std::collections::HashSet;

use crate::types::{ActionItem, BriefContent, Priority};

pub const PRIMARY_ID: &str = "primary";
pub const ACTIVITY_PREFIX: &str = "activity";
pub const DELEGATION_PREFIX: &str = "delegation";
pub const DELEGATION_MARKER: &str = "Delegate: ";

/// Derive the ordered checklist for a brief.
pub fn derive_action_items(brief: &BriefContent) -> Vec<ActionItem> {
    let mut items = Vec::with_capacity(
        1 + brief.supporting_activities.len() + brief.team_delegations.len(),
    );

    items.push(ActionItem {
        id: PRIMARY_ID.to_string(),
        text: brief.primary_directive.clone(),
        priority: Priority::High,
    });

    items.extend(
        brief
            .supporting_activities
            .iter()
            .enumerate()
            .map(|(i, activity)| ActionItem {
                id: format!("{}-{}", ACTIVITY_PREFIX, i),
                text: activity.clone(),
                priority: Priority::Medium,
            }),
    );

    items.extend(
        brief
            .team_delegations
            .iter()
            .enumerate()
            .map(|(i, delegation)| ActionItem {
                id: format!("{}-{}", DELEGATION_PREFIX, i),
                text: format!("{}{}", DELEGATION_MARKER, delegation),
                priority: Priority::Low,
            }),
    );

    items
}

/// Ids of a derived list, in list order.
pub fn item_ids(items: &[ActionItem]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

/// round(100 * |completed ∩ current| / |current|), 0 for an empty list.
pub fn completion_percentage<'a, I>(completed: I, items: &[ActionItem]) -> u8
where
    I: IntoIterator<Item = &'a String>,
{
    let total = items.len();
    if total == 0 {
        return 0;
    }
    let done = count_completed(completed, items);
    ((done as f64 * 100.0 / total as f64).round() as u8).min(100)
}

/// Number of current items whose id is in `completed`. Ids that no longer
/// map to an item are ignored.
pub fn count_completed<'a, I>(completed: I, items: &[ActionItem]) -> usize
where
    I: IntoIterator<Item = &'a String>,
{
    let current: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
    completed
        .into_iter()
        .filter(|id| current.contains(id.as_str()))
        .collect::<HashSet<_>>()
        .len()
}
