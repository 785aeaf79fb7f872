//! Bundled sample verses (KJV, public domain) used when the remote source
//! cannot be reached.

use async_trait::async_trait;

use crate::core::reference::Reference;
use crate::library::source::{PassageSource, RemoteVerse, SourceError};

const SAMPLE_VERSES: &[(&str, u32, u32, &str)] = &[
    ("John", 1, 1, "In the beginning was the Word, and the Word was with God, and the Word was God."),
    ("John", 1, 2, "The same was in the beginning with God."),
    ("John", 1, 3, "All things were made by him; and without him was not any thing made that was made."),
    ("John", 1, 4, "In him was life; and the life was the light of men."),
    ("John", 1, 5, "And the light shineth in darkness; and the darkness comprehended it not."),
    ("John", 3, 16, "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life."),
    ("John", 3, 17, "For God sent not his Son into the world to condemn the world; but that the world through him might be saved."),
    ("John", 3, 18, "He that believeth on him is not condemned: but he that believeth not is condemned already, because he hath not believed in the name of the only begotten Son of God."),
    ("John", 3, 19, "And this is the condemnation, that light is come into the world, and men loved darkness rather than light, because their deeds were evil."),
    ("John", 3, 20, "For every one that doeth evil hateth the light, neither cometh to the light, lest his deeds should be reproved."),
    ("John", 14, 6, "Jesus saith unto him, I am the way, the truth, and the life: no man cometh unto the Father, but by me."),
    ("Psalms", 23, 1, "The LORD is my shepherd; I shall not want."),
    ("Psalms", 23, 2, "He maketh me to lie down in green pastures: he leadeth me beside the still waters."),
    ("Psalms", 23, 3, "He restoreth my soul: he leadeth me in the paths of righteousness for his name's sake."),
    ("Psalms", 23, 4, "Yea, though I walk through the valley of the shadow of death, I will fear no evil: for thou art with me; thy rod and thy staff they comfort me."),
    ("Psalms", 23, 5, "Thou preparest a table before me in the presence of mine enemies: thou anointest my head with oil; my cup runneth over."),
    ("Psalms", 23, 6, "Surely goodness and mercy shall follow me all the days of my life: and I will dwell in the house of the LORD for ever."),
    ("Proverbs", 3, 5, "Trust in the LORD with all thine heart; and lean not unto thine own understanding."),
    ("Proverbs", 3, 6, "In all thy ways acknowledge him, and he shall direct thy paths."),
    ("Isaiah", 40, 31, "But they that wait upon the LORD shall renew their strength; they shall mount up with wings as eagles; they shall run, and not be weary; and they shall walk, and not faint."),
    ("Isaiah", 41, 10, "Fear thou not; for I am with thee: be not dismayed; for I am thy God: I will strengthen thee; yea, I will help thee; yea, I will uphold thee with the right hand of my righteousness."),
    ("Jeremiah", 29, 11, "For I know the thoughts that I think toward you, saith the LORD, thoughts of peace, and not of evil, to give you an expected end."),
    ("Matthew", 5, 3, "Blessed are the poor in spirit: for theirs is the kingdom of heaven."),
    ("Matthew", 5, 4, "Blessed are they that mourn: for they shall be comforted."),
    ("Matthew", 5, 5, "Blessed are the meek: for they shall inherit the earth."),
    ("Matthew", 5, 6, "Blessed are they which do hunger and thirst after righteousness: for they shall be filled."),
    ("Matthew", 5, 7, "Blessed are the merciful: for they shall obtain mercy."),
    ("Matthew", 5, 8, "Blessed are the pure in heart: for they shall see God."),
    ("Romans", 3, 23, "For all have sinned, and come short of the glory of God;"),
    ("Romans", 3, 24, "Being justified freely by his grace through the redemption that is in Christ Jesus:"),
    ("Romans", 8, 28, "And we know that all things work together for good to them that love God, to them who are the called according to his purpose."),
    ("1 Corinthians", 13, 4, "Charity suffereth long, and is kind; charity envieth not; charity vaunteth not itself, is not puffed up,"),
    ("1 Corinthians", 13, 5, "Doth not behave itself unseemly, seeketh not her own, is not easily provoked, thinketh no evil;"),
    ("1 Corinthians", 13, 6, "Rejoiceth not in iniquity, but rejoiceth in the truth;"),
    ("1 Corinthians", 13, 7, "Beareth all things, believeth all things, hopeth all things, endureth all things."),
    ("1 Corinthians", 13, 13, "And now abideth faith, hope, charity, these three; but the greatest of these is charity."),
    ("Ephesians", 2, 8, "For by grace are ye saved through faith; and that not of yourselves: it is the gift of God:"),
    ("Ephesians", 2, 9, "Not of works, lest any man should boast."),
    ("Philippians", 4, 13, "I can do all things through Christ which strengtheneth me."),
    ("Philippians", 4, 19, "But my God shall supply all your need according to his riches in glory by Christ Jesus."),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackSource;

impl FallbackSource {
    pub fn new() -> Self {
        Self
    }

    fn chapter_verses<'a>(book: &'a str, chapter: u32) -> impl Iterator<Item = (u32, &'static str)> + 'a {
        SAMPLE_VERSES
            .iter()
            .filter(move |(b, c, _, _)| b.eq_ignore_ascii_case(book) && *c == chapter)
            .map(|(_, _, verse, text)| (*verse, *text))
    }

    /// Answer a reference from bundled data only. Never fails.
    pub fn passage(&self, reference: &Reference) -> Vec<RemoteVerse> {
        let known: Vec<(u32, &str)> =
            Self::chapter_verses(&reference.book, reference.chapter).collect();
        let verse = |verse: u32, text: String, placeholder: bool| RemoteVerse {
            book: reference.book.clone(),
            chapter: reference.chapter,
            verse,
            text,
            placeholder,
        };

        let Some(range) = reference.verses() else {
            return known
                .into_iter()
                .map(|(n, text)| verse(n, text.to_string(), false))
                .collect();
        };

        range
            .map(|n| match known.iter().find(|(v, _)| *v == n) {
                Some((_, text)) => verse(n, text.to_string(), false),
                None if known.is_empty() => verse(
                    n,
                    format!(
                        "[{} {}:{} unavailable offline; connect to the internet or add it to the verse file]",
                        reference.book, reference.chapter, n
                    ),
                    true,
                ),
                None => verse(n, format!("[Verse {n} not available in fallback data]"), true),
            })
            .collect()
    }

    /// Keyword search over the bundled verses, in bundle order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<RemoteVerse> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        SAMPLE_VERSES
            .iter()
            .filter(|(_, _, _, text)| text.to_lowercase().contains(&needle))
            .take(limit)
            .map(|(book, chapter, verse, text)| RemoteVerse {
                book: book.to_string(),
                chapter: *chapter,
                verse: *verse,
                text: text.to_string(),
                placeholder: false,
            })
            .collect()
    }
}

#[async_trait]
impl PassageSource for FallbackSource {
    fn name(&self) -> &str {
        "bundled samples"
    }

    async fn fetch_passage(&self, reference: &Reference) -> Result<Vec<RemoteVerse>, SourceError> {
        Ok(self.passage(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_range() {
        let verses = FallbackSource.passage(&Reference::range("John", 3, 16, 17));
        assert_eq!(verses.len(), 2);
        assert!(verses[0].text.starts_with("For God so loved the world"));
        assert!(verses.iter().all(|v| !v.placeholder));
    }

    #[test]
    fn test_gap_in_known_chapter() {
        let verses = FallbackSource.passage(&Reference::range("Romans", 8, 28, 29));
        assert!(!verses[0].placeholder);
        assert!(verses[1].placeholder);
        assert_eq!(verses[1].text, "[Verse 29 not available in fallback data]");
    }

    #[test]
    fn test_unknown_chapter_gets_placeholders() {
        let verses = FallbackSource.passage(&Reference::range("Obadiah", 1, 1, 2));
        assert_eq!(verses.len(), 2);
        assert!(verses.iter().all(|v| v.placeholder));
        assert!(verses[0].text.contains("Obadiah 1:1"));
    }

    #[test]
    fn test_whole_chapter_returns_bundled_verses() {
        let verses = FallbackSource.passage(&Reference::chapter("Psalms", 23));
        assert_eq!(verses.len(), 6);
        assert!(FallbackSource.passage(&Reference::chapter("Obadiah", 1)).is_empty());
    }

    #[test]
    fn test_huge_range_is_bounded() {
        let verses = FallbackSource.passage(&Reference::range("Obadiah", 1, 1, u32::MAX));
        assert_eq!(verses.len(), 176);
        assert!(verses.iter().all(|v| v.placeholder));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(FallbackSource.passage(&Reference::range("John", 3, 20, 16)).is_empty());
    }

    #[test]
    fn test_search() {
        let hits = FallbackSource.search("shepherd", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book, "Psalms");
        assert_eq!(FallbackSource.search("the", 3).len(), 3);
        assert!(FallbackSource.search(" ", 3).is_empty());
    }
}
