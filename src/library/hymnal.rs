//! # Hymnal Loading
//!
//! Every supported file format is normalized into the same [`Hymn`] shape,
//! so nothing above this module knows which format was loaded.
//!
//! ```text
//! JSON     [{number, title, lyrics:[{type, index, lines}]}]
//! SPS      123#$#Title#$#...#$#<lyrics>     (field 6 = lyrics)
//!          lyrics:  stanza @$ stanza @$ ...
//!          stanza:  title @% line @% line ...
//! ```
//!
//! Malformed records are logged and skipped; a bad record never fails the
//! whole hymnal.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::HymnalFormat;
use crate::library::data::{DataError, read_data_file};

const SPS_FIELD_DELIMITER: &str = "#$#";
const SPS_STANZA_DELIMITER: &str = "@$";
const SPS_LINE_DELIMITER: &str = "@%";
const SPS_COMMENT_PREFIX: &str = "##";
const SPS_LYRICS_FIELD: usize = 6;

/// Stanza title used when a legacy record is loaded as one block.
pub const FLAT_STANZA_TITLE: &str = "Lyrics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hymn {
    pub number: u32,
    pub title: String,
    pub stanzas: Vec<Stanza>,
}

#[derive(Debug, Clone, Default)]
pub struct Hymnal {
    hymns: BTreeMap<u32, Hymn>,
}

// ============================================================================
// JSON record types
// ============================================================================

#[derive(Deserialize, Debug)]
struct HymnRecord {
    number: Option<u32>,
    title: Option<String>,
    #[serde(default)]
    lyrics: Vec<LyricBlock>,
}

#[derive(Deserialize, Debug)]
struct LyricBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    lines: Vec<String>,
}

impl Hymnal {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, number: u32) -> Option<&Hymn> {
        self.hymns.get(&number)
    }

    pub fn len(&self) -> usize {
        self.hymns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hymns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hymn> {
        self.hymns.values()
    }

    /// Read and parse a hymnal file. `Auto` picks the adapter from the
    /// extension, then from the first character of the document.
    pub async fn load(path: &Path, format: HymnalFormat) -> Result<Self, DataError> {
        let text = read_data_file(path).await?;
        let format = match format {
            HymnalFormat::Auto => detect_format(path, &text),
            other => other,
        };
        let hymnal = Self::parse(&text, format)?;
        info!(
            "Loaded {} hymns from {} ({:?})",
            hymnal.len(),
            path.display(),
            format
        );
        Ok(hymnal)
    }

    pub fn parse(text: &str, format: HymnalFormat) -> Result<Self, DataError> {
        let hymnal = match format {
            HymnalFormat::Json => Self::from_json(text)?,
            HymnalFormat::Sps | HymnalFormat::Auto => Self::from_sps(text, false),
            HymnalFormat::SpsFlat => Self::from_sps(text, true),
        };
        if hymnal.is_empty() {
            return Err(DataError::Empty("hymnal".to_string()));
        }
        Ok(hymnal)
    }

    /// Parse the JSON hymnal format. Only a non-array document is fatal.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(text).map_err(DataError::Json)?;
        let mut hymns = BTreeMap::new();

        for (position, value) in records.into_iter().enumerate() {
            let record: HymnRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping hymn record {}: {}", position, e);
                    continue;
                }
            };
            let (Some(number), Some(title)) = (record.number, record.title) else {
                warn!("Skipping hymn record {}: missing number or title", position);
                continue;
            };

            let stanzas = record
                .lyrics
                .into_iter()
                .filter_map(|block| {
                    let title = match block.kind.as_str() {
                        "verse" => format!("Verse {}", block.index),
                        "refrain" => "Refrain".to_string(),
                        other => {
                            debug!("Hymn {}: skipping lyric block of type {:?}", number, other);
                            return None;
                        }
                    };
                    Some(Stanza {
                        title,
                        text: block.lines.join("\n"),
                    })
                })
                .collect();

            hymns.insert(
                number,
                Hymn {
                    number,
                    title,
                    stanzas,
                },
            );
        }

        Ok(Self { hymns })
    }

    /// Parse the legacy `#$#` format. With `flat`, each song's lyrics become
    /// a single stanza instead of one per `@$` block.
    pub fn from_sps(text: &str, flat: bool) -> Self {
        let mut hymns = BTreeMap::new();

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.starts_with(SPS_COMMENT_PREFIX) || !line.contains(SPS_FIELD_DELIMITER) {
                continue;
            }

            let fields: Vec<&str> = line.split(SPS_FIELD_DELIMITER).collect();
            let Ok(number) = fields[0].trim().parse::<u32>() else {
                debug!("Skipping SPS record with bad number: {:?}", fields[0]);
                continue;
            };
            let title = fields.get(1).map(|t| t.trim()).unwrap_or_default();
            if title.is_empty() {
                warn!("Skipping SPS hymn {}: missing title", number);
                continue;
            }

            let lyrics = fields.get(SPS_LYRICS_FIELD).copied().unwrap_or_default();
            let stanzas = if flat {
                flat_stanza(lyrics).into_iter().collect()
            } else {
                sps_stanzas(lyrics)
            };

            hymns.insert(
                number,
                Hymn {
                    number,
                    title: title.to_string(),
                    stanzas,
                },
            );
        }

        Self { hymns }
    }
}

fn sps_stanzas(lyrics: &str) -> Vec<Stanza> {
    lyrics
        .split(SPS_STANZA_DELIMITER)
        .filter(|part| !part.trim().is_empty())
        .filter_map(|part| {
            let mut lines = part.split(SPS_LINE_DELIMITER);
            let title = lines.next().unwrap_or_default().trim().to_string();
            let text = lines.collect::<Vec<_>>().join("\n").trim().to_string();
            (!text.is_empty()).then_some(Stanza { title, text })
        })
        .collect()
}

fn flat_stanza(lyrics: &str) -> Option<Stanza> {
    let text = lyrics
        .split(SPS_STANZA_DELIMITER)
        .filter_map(|part| {
            let body = part
                .split(SPS_LINE_DELIMITER)
                .skip(1)
                .collect::<Vec<_>>()
                .join("\n");
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    (!text.is_empty()).then(|| Stanza {
        title: FLAT_STANZA_TITLE.to_string(),
        text,
    })
}

fn detect_format(path: &Path, text: &str) -> HymnalFormat {
    let is_json_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json_ext || text.trim_start().starts_with('[') {
        HymnalFormat::Json
    } else {
        HymnalFormat::Sps
    }
}
