use std::fmt;

use async_trait::async_trait;
use log::{info, warn};

use crate::core::reference::Reference;

/// A verse as returned by a passage source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteVerse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    /// Stand-in text for a verse no source could supply.
    pub placeholder: bool,
}

/// Errors that can occur while fetching a passage.
#[derive(Debug)]
pub enum SourceError {
    /// Source misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-success status.
    Api { status: u16, message: String },
    /// Body did not match either payload shape.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

#[async_trait]
pub trait PassageSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Fetch every verse the reference covers.
    async fn fetch_passage(&self, reference: &Reference) -> Result<Vec<RemoteVerse>, SourceError>;
}

/// Ask `primary` first and fall back on any failure or empty answer.
/// The fallback's own error, if any, degrades to an empty passage.
pub async fn fetch_with_fallback(
    primary: &dyn PassageSource,
    fallback: &dyn PassageSource,
    reference: &Reference,
) -> Vec<RemoteVerse> {
    match primary.fetch_passage(reference).await {
        Ok(verses) if !verses.is_empty() => {
            info!(
                "{} returned {} verses for {}",
                primary.name(),
                verses.len(),
                reference
            );
            return verses;
        }
        Ok(_) => warn!("{} returned no verses for {}", primary.name(), reference),
        Err(e) => warn!(
            "{} unavailable for {}, using {}: {}",
            primary.name(),
            reference,
            fallback.name(),
            e
        ),
    }

    fallback.fetch_passage(reference).await.unwrap_or_else(|e| {
        warn!("{} failed for {}: {}", fallback.name(), reference, e);
        Vec::new()
    })
}
