//! # Verse Store
//!
//! Flat dictionary from `"Book Chapter:Verse"` to verse text, as shipped in
//! `verses-1769.json`. Misses come back as [`Lookup::NotFound`] rather than
//! errors so callers can render a placeholder and carry on.

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::core::books;
use crate::core::reference::Reference;
use crate::library::data::{DataError, read_data_file};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseKey {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseKey {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }

    /// Same book and chapter, different verse.
    pub fn with_verse(&self, verse: u32) -> Self {
        Self::new(self.book.clone(), self.chapter, verse)
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

impl FromStr for VerseKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("not a verse key: {s}");
        let (book, locator) = s.trim().rsplit_once(' ').ok_or_else(bad)?;
        let (chapter, verse) = locator.split_once(':').ok_or_else(bad)?;
        Ok(Self {
            book: book.to_string(),
            chapter: chapter.parse().map_err(|_| bad())?,
            verse: verse.parse().map_err(|_| bad())?,
        })
    }
}

/// Result of a single verse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Lookup::Found(text) => Some(text),
            Lookup::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassageError {
    /// Verse 1 of the chapter is missing, so the chapter is treated as absent.
    ChapterNotFound { book: String, chapter: u32 },
}

impl fmt::Display for PassageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassageError::ChapterNotFound { book, chapter } => {
                write!(f, "{book} {chapter} not found")
            }
        }
    }
}

impl std::error::Error for PassageError {}

/// Anything that can answer single-verse lookups. The navigator only needs
/// this, which keeps it testable against a plain map.
pub trait VerseLookup {
    fn lookup(&self, key: &VerseKey) -> Lookup;

    fn contains(&self, key: &VerseKey) -> bool {
        self.lookup(key).is_found()
    }
}

#[derive(Debug, Default, Clone)]
pub struct VerseStore {
    verses: HashMap<String, String>,
}

impl VerseStore {
    /// A store with no data; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(verses: HashMap<String, String>) -> Self {
        Self { verses }
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let verses: HashMap<String, String> = serde_json::from_str(json).map_err(DataError::Json)?;
        if verses.is_empty() {
            return Err(DataError::Empty("verse file".to_string()));
        }
        Ok(Self { verses })
    }

    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let json = read_data_file(path).await?;
        let store = Self::from_json(&json)?;
        info!("Loaded {} verses from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Cache a verse obtained elsewhere (e.g. the remote source).
    pub fn insert(&mut self, key: &VerseKey, text: impl Into<String>) {
        self.verses.insert(key.to_string(), text.into());
    }

    /// Verses `1..=last` where `last` is the verse before the first gap.
    pub fn resolve_chapter(
        &self,
        book: &str,
        chapter: u32,
    ) -> Result<RangeInclusive<u32>, PassageError> {
        let first = VerseKey::new(book, chapter, 1);
        if !self.contains(&first) {
            return Err(PassageError::ChapterNotFound {
                book: book.to_string(),
                chapter,
            });
        }

        let mut last = 1;
        while self.contains(&first.with_verse(last + 1)) {
            last += 1;
        }
        debug!("Resolved {} {} to verses 1-{}", book, chapter, last);
        Ok(1..=last)
    }

    /// Every verse a reference covers, with misses kept in place.
    pub fn passage(&self, reference: &Reference) -> Result<Vec<(VerseKey, Lookup)>, PassageError> {
        let range = match reference.verses() {
            Some(range) => range,
            None => self.resolve_chapter(&reference.book, reference.chapter)?,
        };

        Ok(range
            .map(|verse| {
                let key = VerseKey::new(reference.book.clone(), reference.chapter, verse);
                let found = self.lookup(&key);
                (key, found)
            })
            .collect())
    }

    /// Case-insensitive text search, in canonical book order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(VerseKey, String)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<(VerseKey, String)> = self
            .verses
            .iter()
            .filter(|(_, text)| text.to_lowercase().contains(&needle))
            .filter_map(|(key, text)| {
                let key = key.parse::<VerseKey>().ok()?;
                Some((key, strip_marker(text).to_string()))
            })
            .collect();

        hits.sort_by(|(a, _), (b, _)| {
            (books::position(&a.book), a.chapter, a.verse).cmp(&(
                books::position(&b.book),
                b.chapter,
                b.verse,
            ))
        });
        hits.truncate(limit);
        hits
    }
}

impl VerseLookup for VerseStore {
    fn lookup(&self, key: &VerseKey) -> Lookup {
        match self.verses.get(&key.to_string()) {
            Some(text) => Lookup::Found(strip_marker(text).to_string()),
            None => Lookup::NotFound,
        }
    }
}

/// Paragraph markers in the KJV data are a leading `#`.
fn strip_marker(text: &str) -> &str {
    match text.strip_prefix('#') {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}
