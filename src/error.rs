use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the manifest builder and validator
#[derive(Debug, Error)]
pub enum Error {
    /// The site root does not exist or is not a directory
    #[error("site root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// The configured site domain is empty or could not be parsed
    #[error("invalid site domain: {0:?}")]
    InvalidDomain(String),

    /// An exclude pattern failed to compile
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading a config file or manifest failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing manifest records failed
    #[error("failed to write manifest: {0}")]
    Output(#[source] std::io::Error),

    /// Some pages could not be extracted; the manifest written so far is incomplete
    #[error("{failed} of {total} page tasks failed")]
    PagesFailed { failed: usize, total: usize },

    /// The background build task itself panicked or was cancelled
    #[error("manifest build task failed: {0}")]
    Producer(#[from] tokio::task::JoinError),

    /// A config file is not valid JSON for the expected shape
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
