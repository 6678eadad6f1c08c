//! Prompt assembly errors.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from reading sources and assembling a prompt.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Nothing was read from any source.
    #[error("prompt is empty")]
    EmptyPrompt,
    /// A source would push the prompt over its byte budget.
    #[error("total size would exceed limit of {limit} bytes")]
    BudgetExceeded {
        /// The budget that was exceeded, in bytes.
        limit: usize,
    },
    /// The argument is neither an existing path nor an http(s) URL.
    #[error("{0}: no such file and not a URL")]
    NotFound(String),
    /// The file exists but could not be opened.
    #[error("permission denied: {}", .0.display())]
    AccessDenied(PathBuf),
    /// The path is a directory or other non-regular file.
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    /// The URL could not be fetched.
    #[error("failed to scrape {url}: {reason}")]
    SourceUnavailable {
        /// The URL requested.
        url: String,
        /// Transport error or HTTP status.
        reason: String,
    },
    /// Text could not be extracted from a PDF.
    #[error("failed to extract PDF text: {0}")]
    Extraction(String),
    /// Any other I/O failure.
    #[error("error reading {what}: {source}")]
    Io {
        /// The source being read.
        what: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => Self::AccessDenied(path.to_owned()),
            _ => Self::Io {
                what: path.display().to_string(),
                source,
            },
        }
    }
}
