//! Fetching and reading the vocabularies rank tables are built from.

pub mod download;
pub mod extract;
pub mod fasttext;
pub mod lines;

pub use download::{download, download_with_retry};
pub use extract::{ArchiveKind, extract, fetch_and_materialize, move_with_overwrite};
pub use fasttext::FastTextVocabulary;
pub use lines::{read_file, read_lines};

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Download cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transfer interrupted: {0}")]
    Transfer(#[source] std::io::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Archive entry escapes the output directory: {0}")]
    PathTraversal(String),

    #[error("Unsupported archive: {0}")]
    UnsupportedArchive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Network failures may succeed on a new attempt, nothing else will
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Transfer(_) => true,
            FetchError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// How [`fetch_and_materialize`] treats existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Total download attempts, at least one is made
    pub attempts: u32,
    pub overwrite: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            attempts: 2,
            overwrite: true,
        }
    }
}
