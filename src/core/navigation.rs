//! # Navigator
//!
//! Owns the list of items being shown and which one is current.
//!
//! ```text
//!            load()                 step() / lazy extension
//!   Empty ───────────▶ Loaded ◀──────────────┐
//!     ▲                  │  └────────────────┘
//!     └──── reset() ─────┘
//! ```
//!
//! Song stanzas are a fixed list. Verse passages are not: stepping past
//! either end of a passage looks up the neighbouring verse and, if it
//! exists, grows the list by one. The real extent of a chapter is never
//! loaded up front.

use log::debug;

use crate::library::verses::{Lookup, VerseKey, VerseLookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    None,
    Song,
    Verse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// `-1` / `+1` as typed by callers that think in offsets.
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -1 => Some(Direction::Backward),
            1 => Some(Direction::Forward),
            _ => None,
        }
    }
}

/// One screenful of content: a stanza or a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub title: String,
    pub text: String,
    pub citation: String,
    /// Set for verse items; lazy extension reads it from the boundary item.
    pub key: Option<VerseKey>,
}

impl ContentItem {
    pub fn stanza(title: String, text: String, citation: String) -> Self {
        Self {
            title,
            text,
            citation,
            key: None,
        }
    }

    /// A verse item, with `citation` carrying the translation label.
    pub fn verse(key: VerseKey, text: String, translation: &str) -> Self {
        Self {
            title: key.to_string(),
            citation: format!("{key} ({translation})"),
            text,
            key: Some(key),
        }
    }

    /// Stand-in for a verse missing from the data.
    pub fn missing_verse(key: VerseKey, translation: &str) -> Self {
        let text = format!("[{key} not found]");
        Self::verse(key, text, translation)
    }
}

/// Book and chapter a verse passage is pinned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub book: String,
    pub chapter: u32,
    pub translation: String,
}

#[derive(Debug, Default)]
pub struct Navigator {
    kind: ContentKind,
    items: Vec<ContentItem>,
    current: usize,
    main_title: String,
    anchor: Option<Anchor>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything and start at the first item.
    pub fn load(
        &mut self,
        items: Vec<ContentItem>,
        kind: ContentKind,
        main_title: impl Into<String>,
        anchor: Option<Anchor>,
    ) {
        debug!("Navigator load: {:?} with {} items", kind, items.len());
        self.kind = kind;
        self.items = items;
        self.current = 0;
        self.main_title = main_title.into();
        self.anchor = anchor;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&ContentItem> {
        self.items.get(self.current)
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current)
    }

    pub fn main_title(&self) -> &str {
        &self.main_title
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// "2 of 5", or `None` when nothing is loaded.
    pub fn position_label(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{} of {}", i + 1, self.items.len()))
    }

    /// Move one item. Returns the new current item, or `None` when the step
    /// was a no-op.
    pub fn step(
        &mut self,
        direction: Direction,
        lookup: &dyn VerseLookup,
    ) -> Option<&ContentItem> {
        if self.items.is_empty() {
            return None;
        }

        match direction {
            Direction::Forward if self.current + 1 < self.items.len() => {
                self.current += 1;
            }
            Direction::Backward if self.current > 0 => {
                self.current -= 1;
            }
            _ => {
                let (key, text) = self.neighbor(direction, lookup)?;
                let item = ContentItem::verse(key, text, self.translation());
                match direction {
                    Direction::Forward => {
                        self.items.push(item);
                        self.current += 1;
                    }
                    Direction::Backward => {
                        self.items.insert(0, item);
                        self.current = 0;
                    }
                }
                debug!(
                    "Extended passage {:?}, now {} items",
                    direction,
                    self.items.len()
                );
            }
        }

        self.current()
    }

    pub fn can_step_forward(&self, lookup: &dyn VerseLookup) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.current + 1 < self.items.len() || self.neighbor(Direction::Forward, lookup).is_some()
    }

    pub fn can_step_backward(&self, lookup: &dyn VerseLookup) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.current > 0 || self.neighbor(Direction::Backward, lookup).is_some()
    }

    /// Look up the verse just past the boundary in `direction`, without
    /// touching state. `None` when extension does not apply or the verse
    /// does not exist.
    fn neighbor(&self, direction: Direction, lookup: &dyn VerseLookup) -> Option<(VerseKey, String)> {
        if self.kind != ContentKind::Verse {
            return None;
        }
        let anchor = self.anchor.as_ref()?;

        let boundary = match direction {
            Direction::Forward => self.items.last()?,
            Direction::Backward => self.items.first()?,
        };
        let verse = boundary.key.as_ref()?.verse;
        let next = match direction {
            Direction::Forward => verse.checked_add(1)?,
            Direction::Backward => verse.checked_sub(1).filter(|v| *v >= 1)?,
        };

        let key = VerseKey::new(anchor.book.clone(), anchor.chapter, next);
        match lookup.lookup(&key) {
            Lookup::Found(text) => Some((key, text)),
            Lookup::NotFound => None,
        }
    }

    fn translation(&self) -> &str {
        self.anchor
            .as_ref()
            .map(|a| a.translation.as_str())
            .unwrap_or_default()
    }
}
