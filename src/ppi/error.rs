use std::path::PathBuf;

use thiserror::Error;

/// Reasons the interaction table could not be loaded.
///
/// None of these are fatal: the cache records the error next to an empty
/// dataset and the viewer shows it to the user.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("interaction table is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed interaction CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("interaction table has no `{0}` column")]
    MissingColumn(&'static str),
}
