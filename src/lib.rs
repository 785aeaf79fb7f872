//! Pulpit library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod core;
pub mod library;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which adapter turns a hymnal file into `Hymn`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HymnalFormat {
    /// Pick from the file extension and contents.
    #[default]
    Auto,
    /// JSON array of hymn records with tagged lyric blocks.
    Json,
    /// Legacy `#$#`-delimited records, one stanza per `@$` block.
    Sps,
    /// Legacy `#$#`-delimited records, whole lyrics as one stanza.
    SpsFlat,
}
