//! # Application State
//!
//! Core business state for Pulpit. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tab: Tab                       // songs or scripture
//! ├── navigator: Navigator           // items on screen + position
//! ├── verses: VerseStore             // flat verse dictionary
//! ├── hymnal: Hymnal                 // hymn number → stanzas
//! ├── verse_status: DataStatus       // load state of the verse file
//! ├── hymnal_status: DataStatus      // load state of the hymnal file
//! ├── status_message: String         // status bar text
//! ├── error: Option<String>          // message shown in a popup
//! ├── projecting: bool               // full-screen view open
//! ├── translation: String            // citation label, e.g. "KJV"
//! ├── remote_enabled: bool           // may ask the remote source
//! └── pending_fetch: Option<Reference> // remote request in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::navigation::Navigator;
use crate::core::reference::Reference;
use crate::library::{DataStatus, Hymnal, VerseStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Song,
    Verse,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Song => "Hymns",
            Tab::Verse => "Scripture",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Song => Tab::Verse,
            Tab::Verse => Tab::Song,
        }
    }
}

pub struct App {
    pub tab: Tab,
    pub navigator: Navigator,
    pub verses: VerseStore,
    pub hymnal: Hymnal,
    pub verse_status: DataStatus,
    pub hymnal_status: DataStatus,
    pub status_message: String,
    pub error: Option<String>,
    pub projecting: bool,
    pub translation: String,
    pub remote_enabled: bool,
    /// The only remote answer still wanted. Anything else arriving is stale.
    pub pending_fetch: Option<Reference>,
}

impl App {
    pub fn new(translation: impl Into<String>, remote_enabled: bool) -> Self {
        Self {
            tab: Tab::default(),
            navigator: Navigator::new(),
            verses: VerseStore::empty(),
            hymnal: Hymnal::empty(),
            verse_status: DataStatus::Loading,
            hymnal_status: DataStatus::Loading,
            status_message: String::from("Loading data..."),
            error: None,
            projecting: false,
            translation: translation.into(),
            remote_enabled,
            pending_fetch: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.translation.clone(), config.remote_enabled)
    }

    /// Worst of the two data statuses, for the status badge.
    pub fn data_status(&self) -> &DataStatus {
        let rank = |status: &DataStatus| match status {
            DataStatus::Unavailable(_) => 2,
            DataStatus::Loading => 1,
            DataStatus::Ready => 0,
        };
        if rank(&self.hymnal_status) > rank(&self.verse_status) {
            &self.hymnal_status
        } else {
            &self.verse_status
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetch.is_some()
    }

    pub fn can_step_forward(&self) -> bool {
        self.navigator.can_step_forward(&self.verses)
    }

    pub fn can_step_backward(&self) -> bool {
        self.navigator.can_step_backward(&self.verses)
    }
}
