pub mod nyt;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Race page has no races")]
    MissingRace,
}

pub type Result<T> = std::result::Result<T, FormatError>;
