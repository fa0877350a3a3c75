//! Light/dark preference shared by every page skin.

use serde_json::Value;

use crate::error::BriefError;
use crate::store::{PersistedStore, THEME_KEY};
use crate::types::Theme;

/// Stored theme, or the dark default when absent or unrecognised.
pub fn load_theme(store: &dyn PersistedStore) -> Theme {
    match store.load(THEME_KEY) {
        Some(Value::String(s)) => Theme::parse(&s).unwrap_or_else(|| {
            log::warn!("Ignoring unknown theme '{}'", s);
            Theme::default()
        }),
        Some(other) => {
            log::warn!("Ignoring non-string theme value {}", other);
            Theme::default()
        }
        None => Theme::default(),
    }
}

pub fn save_theme(store: &dyn PersistedStore, theme: Theme) -> Result<(), BriefError> {
    store.save(THEME_KEY, Value::String(theme.as_str().to_string()))
}

/// Flip the stored theme and return the new one.
pub fn toggle_theme(store: &dyn PersistedStore) -> Result<Theme, BriefError> {
    let next = load_theme(store).toggled();
    save_theme(store, next)?;
    log::info!("Theme switched to {}", next.as_str());
    Ok(next)
}
