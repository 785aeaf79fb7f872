use std::fmt;
use std::path::Path;

use log::{debug, warn};

/// Why a backing data file could not be used.
#[derive(Debug)]
pub enum DataError {
    /// File could not be read.
    Io { path: String, source: std::io::Error },
    /// File was read but is not valid JSON of the expected shape.
    Json(serde_json::Error),
    /// File parsed but held nothing usable.
    Empty(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            DataError::Json(e) => write!(f, "malformed JSON: {e}"),
            DataError::Empty(what) => write!(f, "{what} contains no entries"),
        }
    }
}

impl std::error::Error for DataError {}

/// Load state of one backing data file, as shown to the operator.
///
/// `Unavailable` is kept apart from an empty store so the UI can say
/// "no data" instead of "not found".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataStatus {
    #[default]
    Loading,
    Ready,
    Unavailable(String),
}

impl DataStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DataStatus::Ready)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataStatus::Loading => "Loading data...",
            DataStatus::Ready => "Ready",
            DataStatus::Unavailable(_) => "Error",
        }
    }
}

/// Read a whole data file on the tokio runtime.
pub async fn read_data_file(path: &Path) -> Result<String, DataError> {
    debug!("Reading data file {}", path.display());
    tokio::fs::read_to_string(path).await.map_err(|source| {
        warn!("Failed to read {}: {}", path.display(), source);
        DataError::Io {
            path: path.display().to_string(),
            source,
        }
    })
}
