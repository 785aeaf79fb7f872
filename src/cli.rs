//! # Command Line
//!
//! Argument parsing plus the one-shot commands. Without a subcommand the
//! binary starts the TUI; with one it prints a result and exits.
//!
//! ```text
//! pulpit verse 1 John 4:7-8
//! pulpit hymn 100
//! pulpit search shepherd --limit 5
//! pulpit books
//! ```

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;
use textwrap::Options;

use crate::HymnalFormat;
use crate::core::books::Testament;
use crate::core::config::{CliOverrides, ResolvedConfig};
use crate::core::reference::{self, ParseError, Reference};
use crate::library::{
    BibleApiSource, DataError, FallbackSource, Hymn, Hymnal, Lookup, RemoteVerse, VerseKey,
    VerseStore, fetch_with_fallback,
};

/// Output column width for wrapped text.
pub const WRAP_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "pulpit", about = "Hymn and scripture projector for the terminal")]
pub struct Args {
    /// Verse data file (JSON object of "Book C:V" -> text)
    #[arg(long, value_name = "PATH")]
    pub verses: Option<PathBuf>,

    /// Hymnal data file
    #[arg(long, value_name = "PATH")]
    pub hymnal: Option<PathBuf>,

    /// Hymnal file format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub hymnal_format: Option<HymnalFormat>,

    /// Never contact the remote verse service
    #[arg(long)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a passage, e.g. `verse John 3:16-18`
    Verse {
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,
    },
    /// Print every stanza of a hymn
    Hymn { number: u32 },
    /// Case-insensitive keyword search over verse text
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// List the books of the Bible in canonical order
    Books,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            verses_path: self.verses.clone(),
            hymnal_path: self.hymnal.clone(),
            hymnal_format: self.hymnal_format,
            offline: self.offline,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    Reference(ParseError),
    Data(DataError),
    NotFound(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Reference(e) => write!(f, "invalid reference: {e}"),
            CliError::Data(e) => write!(f, "data unavailable: {e}"),
            CliError::NotFound(what) => write!(f, "{what}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Reference(e)
    }
}

impl From<DataError> for CliError {
    fn from(e: DataError) -> Self {
        CliError::Data(e)
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Run one command and return the text to print.
pub async fn execute(command: Command, config: &ResolvedConfig) -> Result<String, CliError> {
    info!("Running command {:?}", command);
    match command {
        Command::Verse { reference } => verse(&reference.join(" "), config).await,
        Command::Hymn { number } => {
            let hymnal = Hymnal::load(&config.hymnal_path, config.hymnal_format).await?;
            let hymn = hymnal
                .get(number)
                .ok_or_else(|| CliError::NotFound(format!("Song #{number} not found.")))?;
            Ok(format_hymn(hymn))
        }
        Command::Search { query, limit } => {
            let query = query.join(" ");
            let store = match VerseStore::load(&config.verses_path).await {
                Ok(store) => store,
                Err(e) => {
                    warn!("Searching bundled samples only: {}", e);
                    VerseStore::empty()
                }
            };
            Ok(format_search(&query, &search(&store, &query, limit)))
        }
        Command::Books => Ok(format_books()),
    }
}

async fn verse(input: &str, config: &ResolvedConfig) -> Result<String, CliError> {
    let reference = reference::parse(input)?.canonicalized();

    let store = VerseStore::load(&config.verses_path).await;
    if let Ok(store) = &store
        && let Ok(passage) = store.passage(&reference)
        && passage.iter().any(|(_, lookup)| lookup.is_found())
    {
        let lines = passage
            .into_iter()
            .map(|(key, lookup)| match lookup {
                Lookup::Found(text) => (key.verse, text),
                Lookup::NotFound => (key.verse, format!("[{key} not found]")),
            })
            .collect::<Vec<_>>();
        return Ok(format_passage(&reference, &config.translation, &lines));
    }

    if config.remote_enabled {
        let fallback = FallbackSource::new();
        let verses = match BibleApiSource::new(
            Some(config.remote_base_url.clone()),
            &config.translation,
            config.remote_timeout,
        ) {
            Ok(remote) => fetch_with_fallback(&remote, &fallback, &reference).await,
            Err(e) => {
                warn!("Remote source unavailable: {}", e);
                fallback.passage(&reference)
            }
        };
        if !verses.is_empty() {
            let lines = verses
                .into_iter()
                .map(|v| (v.verse, v.text))
                .collect::<Vec<_>>();
            return Ok(format_passage(&reference, &config.translation, &lines));
        }
    }

    match store {
        Err(e) => Err(CliError::Data(e)),
        Ok(_) if reference.verses().is_some_and(|r| r.is_empty()) => {
            Ok(format!("{reference} contains no verses"))
        }
        Ok(_) => Err(CliError::NotFound(format!("{reference} not found."))),
    }
}

/// Local hits first, then bundled samples not already listed.
pub fn search(store: &VerseStore, query: &str, limit: usize) -> Vec<(VerseKey, String)> {
    let mut hits = store.search(query, limit);
    let extra: Vec<RemoteVerse> = FallbackSource::new().search(query, limit);
    for verse in extra {
        let key = VerseKey::new(verse.book, verse.chapter, verse.verse);
        if !hits.iter().any(|(k, _)| *k == key) {
            hits.push((key, verse.text));
        }
    }
    hits.truncate(limit);
    hits
}

// ============================================================================
// Formatting
// ============================================================================

pub fn format_passage(reference: &Reference, translation: &str, verses: &[(u32, String)]) -> String {
    let mut out = reference.citation(translation);
    out.push('\n');
    for (number, text) in verses {
        let prefix = format!("{number:>3} ");
        let indent = " ".repeat(prefix.len());
        let options = Options::new(WRAP_WIDTH)
            .initial_indent(&prefix)
            .subsequent_indent(&indent);
        out.push('\n');
        out.push_str(&textwrap::fill(text, options));
    }
    out
}

pub fn format_hymn(hymn: &Hymn) -> String {
    let mut out = format!("Hymn #{} - {}\n", hymn.number, hymn.title);
    for stanza in &hymn.stanzas {
        out.push('\n');
        out.push_str(&stanza.title);
        out.push('\n');
        for line in stanza.text.lines() {
            let options = Options::new(WRAP_WIDTH)
                .initial_indent("  ")
                .subsequent_indent("    ");
            out.push_str(&textwrap::fill(line, options));
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}

pub fn format_search(query: &str, hits: &[(VerseKey, String)]) -> String {
    if hits.is_empty() {
        return format!("No verses match \"{query}\".");
    }
    let mut out = format!("{} match(es) for \"{query}\"\n", hits.len());
    for (key, text) in hits {
        let options = Options::new(WRAP_WIDTH).subsequent_indent("    ");
        out.push('\n');
        out.push_str(&textwrap::fill(&format!("{key}: {text}"), options));
    }
    out
}

pub fn format_books() -> String {
    [Testament::Old, Testament::New]
        .into_iter()
        .map(|testament| {
            let names = testament.books().join(", ");
            let options = Options::new(WRAP_WIDTH)
                .initial_indent("  ")
                .subsequent_indent("  ");
            format!(
                "{} ({} books)\n{}",
                testament.label(),
                testament.books().len(),
                textwrap::fill(&names, options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
