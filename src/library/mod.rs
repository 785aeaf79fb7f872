pub mod data;
pub mod fallback;
pub mod hymnal;
pub mod remote;
pub mod source;
pub mod verses;

pub use data::{DataError, DataStatus};
pub use fallback::FallbackSource;
pub use hymnal::{Hymn, Hymnal, Stanza};
pub use remote::BibleApiSource;
pub use source::{PassageSource, RemoteVerse, SourceError, fetch_with_fallback};
pub use verses::{Lookup, PassageError, VerseKey, VerseLookup, VerseStore};
