//! Canonical book names, grouped by testament.
//!
//! Lookups into verse data are exact string matches, so user input like
//! "john" or "SONG OF SOLOMON" is mapped onto the spelling the data uses.

pub const OLD_TESTAMENT: &[&str] = &[
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
];

pub const NEW_TESTAMENT: &[&str] = &[
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn label(self) -> &'static str {
        match self {
            Testament::Old => "Old Testament",
            Testament::New => "New Testament",
        }
    }

    pub fn books(self) -> &'static [&'static str] {
        match self {
            Testament::Old => OLD_TESTAMENT,
            Testament::New => NEW_TESTAMENT,
        }
    }
}

/// All books in canonical order.
pub fn all() -> impl Iterator<Item = &'static str> {
    OLD_TESTAMENT.iter().chain(NEW_TESTAMENT.iter()).copied()
}

/// Case- and whitespace-insensitive match against the catalog.
pub fn canonical(name: &str) -> Option<&'static str> {
    let wanted = normalize(name);
    all().find(|book| normalize(book) == wanted)
}

/// Canonical position of a book, used to order search results.
/// Unknown books sort after every known one.
pub fn position(name: &str) -> usize {
    let wanted = normalize(name);
    all()
        .position(|book| normalize(book) == wanted)
        .unwrap_or(usize::MAX)
}

pub fn testament(name: &str) -> Option<Testament> {
    let book = canonical(name)?;
    if OLD_TESTAMENT.contains(&book) {
        Some(Testament::Old)
    } else {
        Some(Testament::New)
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
