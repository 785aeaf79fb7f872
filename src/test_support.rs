//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::reference::Reference;
use crate::core::state::App;
use crate::library::{
    DataStatus, Hymnal, PassageSource, RemoteVerse, SourceError, VerseStore,
};

/// John 3:16-17 plus Psalms 23:1-3 and 23:6. Only the two Psalms verses
/// 1 and 6 mention the LORD.
pub fn sample_verses() -> VerseStore {
    let verses = [
        ("John 3:16", "# For God so loved the world"),
        ("John 3:17", "For God sent not his Son into the world to condemn the world"),
        ("Psalms 23:1", "The LORD is my shepherd; I shall not want."),
        ("Psalms 23:2", "He maketh me to lie down in green pastures"),
        ("Psalms 23:3", "He restoreth my soul"),
        ("Psalms 23:6", "and I will dwell in the house of the LORD for ever."),
    ];
    VerseStore::from_map(
        verses
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

pub const SAMPLE_HYMNAL_JSON: &str = r#"[
  {"number": 100, "title": "Great Is Thy Faithfulness", "lyrics": [
    {"type": "verse", "index": 1, "lines": ["Great is Thy faithfulness", "O God my Father"]},
    {"type": "refrain", "index": 0, "lines": ["Great is Thy faithfulness", "Morning by morning"]}
  ]},
  {"title": "No Number", "lyrics": []},
  {"number": 7, "lyrics": [{"type": "verse", "index": 1, "lines": ["untitled"]}]},
  {"number": "twelve", "title": "String Number", "lyrics": []},
  {"number": 462, "title": "Blessed Assurance", "lyrics": [
    {"type": "verse", "index": 1, "lines": ["Blessed assurance, Jesus is mine"]}
  ]}
]"#;

pub const SAMPLE_SPS: &str = "## comment\n\
100#$#Great Is Thy Faithfulness#$#x#$#x#$#x#$#x#$#1@%Great is Thy faithfulness@%O God my Father@$Refrain@%Great is Thy faithfulness@%Morning by morning\n\
462#$#Blessed Assurance#$#x#$#x#$#x#$#x#$#1@%Blessed assurance, Jesus is mine\n\
abc#$#Bad Number#$#x#$#x#$#x#$#x#$#1@%ignored\n\
7#$##$#x#$#x#$#x#$#x#$#1@%no title\n";

/// A source that always answers with one verse of fixed text.
pub struct StaticSource {
    name: String,
    text: String,
}

impl StaticSource {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl PassageSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_passage(&self, reference: &Reference) -> Result<Vec<RemoteVerse>, SourceError> {
        Ok(vec![RemoteVerse {
            book: reference.book.clone(),
            chapter: reference.chapter,
            verse: reference.start_verse.unwrap_or(1),
            text: self.text.clone(),
            placeholder: false,
        }])
    }
}

/// A source that always fails at the network level.
pub struct FailingSource;

#[async_trait]
impl PassageSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_passage(&self, _reference: &Reference) -> Result<Vec<RemoteVerse>, SourceError> {
        Err(SourceError::Network("connection refused".to_string()))
    }
}

/// An offline App with the sample verses and the sample SPS hymnal loaded.
pub fn test_app() -> App {
    let mut app = App::new("KJV", false);
    app.verses = sample_verses();
    app.hymnal = Hymnal::from_sps(SAMPLE_SPS, false);
    app.verse_status = DataStatus::Ready;
    app.hymnal_status = DataStatus::Ready;
    app.status_message = "Ready".to_string();
    app
}
