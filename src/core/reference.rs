//! # Scripture References
//!
//! Parses the free-text locators an operator types:
//!
//! ```text
//! John 3            chapter reference
//! John 3:16         single verse
//! John 3:16-18      verse range
//! 1 Corinthians 13:4-7
//! Song of Solomon 2:1
//! ```
//!
//! Parsing never panics. Anything outside the grammar comes back as a
//! `ParseError` whose `Display` tells the user what is accepted.

use std::fmt;
use std::ops::RangeInclusive;

use crate::core::books;

/// Shown to the user whenever a reference fails to parse.
pub const ACCEPTED_FORMATS: &str =
    "use \"Book Chapter\", \"Book Chapter:Verse\" or \"Book Chapter:Start-End\" (e.g. John 3:16-18)";

/// Psalm 119. No range is expanded past this many verses.
pub const LONGEST_CHAPTER: u32 = 176;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: u32,
    /// `None` for a whole-chapter reference.
    pub start_verse: Option<u32>,
    /// Equal to `start_verse` when a single verse was given.
    pub end_verse: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace.
    Empty,
    /// No chapter number after the book name.
    MissingChapter,
    /// The book part is not one or more words (optionally "1 "/"2 " prefixed).
    InvalidBook(String),
    /// A chapter or verse that is not a positive integer.
    InvalidNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no reference entered; {ACCEPTED_FORMATS}"),
            ParseError::MissingChapter => {
                write!(f, "missing chapter number; {ACCEPTED_FORMATS}")
            }
            ParseError::InvalidBook(book) => {
                write!(f, "\"{book}\" is not a book name; {ACCEPTED_FORMATS}")
            }
            ParseError::InvalidNumber(num) => {
                write!(f, "\"{num}\" is not a positive number; {ACCEPTED_FORMATS}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a reference like `"1 John 4:7-8"`.
pub fn parse(input: &str) -> Result<Reference, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (book_part, locator) = trimmed
        .rsplit_once(char::is_whitespace)
        .ok_or(ParseError::MissingChapter)?;

    if !locator.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseError::MissingChapter);
    }

    let book = parse_book(book_part)?;

    let (chapter, verses) = match locator.split_once(':') {
        Some((chapter, verses)) => (chapter, Some(verses)),
        None => (locator, None),
    };
    let chapter = positive(chapter)?;

    let (start_verse, end_verse) = match verses {
        None => (None, None),
        Some(verses) => match verses.split_once('-') {
            Some((start, end)) => (Some(positive(start)?), Some(positive(end)?)),
            None => {
                let verse = positive(verses)?;
                (Some(verse), Some(verse))
            }
        },
    };

    Ok(Reference {
        book,
        chapter,
        start_verse,
        end_verse,
    })
}

/// One or more alphabetic words, optionally led by a single digit word.
fn parse_book(raw: &str) -> Result<String, ParseError> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let invalid = || ParseError::InvalidBook(raw.trim().to_string());

    let name_words = match words.split_first() {
        Some((first, rest)) if first.len() == 1 && first.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        Some(_) => &words[..],
        None => return Err(invalid()),
    };

    if name_words.is_empty()
        || !name_words
            .iter()
            .all(|word| word.chars().all(char::is_alphabetic))
    {
        return Err(invalid());
    }

    Ok(words.join(" "))
}

fn positive(raw: &str) -> Result<u32, ParseError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber(raw.to_string()));
    }
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidNumber(raw.to_string())),
    }
}

impl Reference {
    pub fn chapter(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            start_verse: None,
            end_verse: None,
        }
    }

    pub fn range(book: impl Into<String>, chapter: u32, start: u32, end: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            start_verse: Some(start),
            end_verse: Some(end),
        }
    }

    pub fn is_whole_chapter(&self) -> bool {
        self.start_verse.is_none()
    }

    /// Inclusive verse range, `None` for a whole chapter.
    /// A reversed range such as `5-3` is empty rather than an error.
    /// The end is clamped to `LONGEST_CHAPTER`, but never below the start,
    /// so a single out-of-range verse still comes back as itself.
    pub fn verses(&self) -> Option<RangeInclusive<u32>> {
        let start = self.start_verse?;
        let end = self
            .end_verse
            .unwrap_or(start)
            .min(LONGEST_CHAPTER.max(start));
        Some(start..=end)
    }

    /// "John 3:16-18 (KJV)"
    pub fn citation(&self, translation: &str) -> String {
        format!("{self} ({translation})")
    }

    /// Swap the typed book name for the catalog spelling when there is one.
    pub fn canonicalized(mut self) -> Self {
        if let Some(book) = books::canonical(&self.book) {
            self.book = book.to_string();
        }
        self
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        match (self.start_verse, self.end_verse) {
            (Some(start), Some(end)) if start != end => write!(f, ":{start}-{end}"),
            (Some(start), _) => write!(f, ":{start}"),
            (None, _) => Ok(()),
        }
    }
}
