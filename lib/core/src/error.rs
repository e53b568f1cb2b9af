use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Failed to parse record {path}: {reason}")]
    RecordParse { path: PathBuf, reason: String },

    #[error("Vote matrix is empty")]
    EmptyMatrix,

    #[error("Unknown measure(s): {}", .0.join(", "))]
    UnknownMeasure(Vec<String>),

    #[error("Ambiguous measure key {key}: shared by {}", .titles.join(" | "))]
    AmbiguousMeasureKey { key: String, titles: Vec<String> },

    #[error("Clustering failed: {0}")]
    ClusteringFailure(String),

    #[error("Dendrogram rendering failed: {0}")]
    RenderFailure(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
