//! Evening journal → morning brief.
//!
//! The library holds the brief page's state: the gate around brief
//! acquisition, the derived checklist, completion tracking persisted to a
//! key-value store, the quality rating, and the journal entry that feeds the
//! next brief.

pub mod actions;
pub mod checklist;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod journal;
pub mod notification;
pub mod provider;
pub mod state;
pub mod store;
pub mod theme;
pub mod types;
pub mod view;

pub use error::{BriefError, ViewError};
pub use gate::{LoadOutcome, LoadState};
pub use view::BriefView;
