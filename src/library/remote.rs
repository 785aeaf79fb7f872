//! bible-api.com style passage source.
//!
//! `GET {base_url}/{reference}?translation={t}` answers with either a
//! multi-verse payload:
//!
//! ```json
//! {"reference": "John 3:16-17", "verses": [{"book_name": "John", "chapter": 3, "verse": 16, "text": "..."}]}
//! ```
//!
//! or, from some mirrors, a single verse with only `reference` and `text`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::Deserialize;

use crate::core::reference::{self, Reference};
use crate::library::source::{PassageSource, RemoteVerse, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Deserialize, Debug)]
struct PassagePayload {
    reference: Option<String>,
    text: Option<String>,
    verses: Option<Vec<VersePayload>>,
}

#[derive(Deserialize, Debug)]
struct VersePayload {
    book_name: String,
    chapter: u32,
    verse: u32,
    text: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn payload_to_verses(payload: PassagePayload) -> Result<Vec<RemoteVerse>, SourceError> {
    if let Some(verses) = payload.verses {
        return Ok(verses
            .into_iter()
            .map(|v| RemoteVerse {
                book: v.book_name,
                chapter: v.chapter,
                verse: v.verse,
                text: v.text.trim().to_string(),
                placeholder: false,
            })
            .collect());
    }

    match (payload.reference, payload.text) {
        (Some(reference), Some(text)) => {
            let parsed = reference::parse(&reference)
                .map_err(|e| SourceError::Parse(format!("bad reference {reference:?}: {e}")))?;
            let verse = parsed.start_verse.ok_or_else(|| {
                SourceError::Parse(format!("single-verse payload without a verse: {reference}"))
            })?;
            Ok(vec![RemoteVerse {
                book: parsed.book,
                chapter: parsed.chapter,
                verse,
                text: text.trim().to_string(),
                placeholder: false,
            }])
        }
        _ => Err(SourceError::Parse(
            "payload has neither verses nor reference/text".to_string(),
        )),
    }
}

// ============================================================================
// Source Implementation
// ============================================================================

pub struct BibleApiSource {
    base_url: String,
    translation: String,
    client: reqwest::Client,
}

impl BibleApiSource {
    pub fn new(
        base_url: Option<String>,
        translation: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            translation: translation.to_lowercase(),
            client,
        })
    }

    /// The reference goes in as a single encoded path segment.
    fn passage_url(&self, reference: &Reference) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::Config(format!("bad base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Config(format!("base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .push(&reference.to_string());
        url.query_pairs_mut()
            .append_pair("translation", &self.translation);
        Ok(url)
    }
}

#[async_trait]
impl PassageSource for BibleApiSource {
    fn name(&self) -> &str {
        "bible-api"
    }

    async fn fetch_passage(&self, reference: &Reference) -> Result<Vec<RemoteVerse>, SourceError> {
        let url = self.passage_url(reference)?;
        info!("Fetching {} from {}", reference, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("bible-api response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("bible-api error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let payload: PassagePayload = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        payload_to_verses(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> BibleApiSource {
        BibleApiSource::new(Some(base.to_string()), "KJV", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_passage_url_encodes_reference() {
        let url = source("https://bible-api.com")
            .passage_url(&Reference::range("1 John", 4, 7, 8))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://bible-api.com/1%20John%204:7-8?translation=kjv"
        );
    }

    #[test]
    fn test_passage_url_keeps_base_path() {
        let url = source("http://localhost:9000/api/")
            .passage_url(&Reference::chapter("John", 3))
            .unwrap();
        assert_eq!(url.path(), "/api/John%203");
    }

    #[test]
    fn test_passage_url_rejects_bad_base() {
        let err = source("not a url")
            .passage_url(&Reference::chapter("John", 3))
            .unwrap_err();
        assert!(matches!(err, SourceError::Config(_)));
    }

    #[test]
    fn test_multi_verse_payload() {
        let payload: PassagePayload = serde_json::from_str(
            r#"{"reference": "John 3:16-17", "verses": [
                {"book_name": "John", "chapter": 3, "verse": 16, "text": " For God so loved\n"},
                {"book_name": "John", "chapter": 3, "verse": 17, "text": "For God sent not"}
            ], "text": "ignored"}"#,
        )
        .unwrap();
        let verses = payload_to_verses(payload).unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].text, "For God so loved");
        assert_eq!(verses[1].verse, 17);
    }

    #[test]
    fn test_single_verse_payload_handles_numbered_books() {
        let payload: PassagePayload = serde_json::from_str(
            r#"{"reference": "1 John 4:8", "text": "He that loveth not knoweth not God"}"#,
        )
        .unwrap();
        let verses = payload_to_verses(payload).unwrap();
        assert_eq!(verses[0].book, "1 John");
        assert_eq!(verses[0].chapter, 4);
        assert_eq!(verses[0].verse, 8);
    }

    #[test]
    fn test_empty_payload_is_parse_error() {
        let payload: PassagePayload = serde_json::from_str(r#"{"error": "not found"}"#).unwrap();
        assert!(matches!(
            payload_to_verses(payload),
            Err(SourceError::Parse(_))
        ));
    }
}
