use serde::{Deserialize, Serialize};
use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

/// Wire-level failure codes. This enumeration is closed: every provider
/// failure collapses into one of these before it reaches a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    FileNotFound,
    DirectoryNotFound,
    FileExists,
    DirectoryExists,
    Other,
}

/// Failures produced by a file-system provider.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    #[snafu(display("File not found: {path}"))]
    FileNotFound { path: String },

    #[snafu(display("Directory not found: {path}"))]
    DirectoryNotFound { path: String },

    #[snafu(display("File already exists: {path}"))]
    FileExists { path: String },

    #[snafu(display("Directory already exists: {path}"))]
    DirectoryExists { path: String },

    #[snafu(display("Path resolves outside the provider root: {path}"))]
    PathOutsideRoot { path: String },

    #[snafu(display("Source and destination are the same path: {path}"))]
    SamePath { path: String },

    #[snafu(display("Destination lies inside the source directory: {path}"))]
    DestinationInsideSource { path: String },

    #[snafu(display("Invalid item name: {name:?}"))]
    InvalidName { name: String },

    #[snafu(display("The provider root itself cannot be modified"))]
    RootUnmodifiable,

    #[snafu(display("Storage error: {source}"), context(false))]
    Storage { source: opendal::Error },

    #[snafu(display("IO error: {source}"), context(false))]
    Io { source: std::io::Error },
}

impl ProviderError {
    /// Collapse to the closed wire-level code set. Platform error details
    /// never cross this boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProviderError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ProviderError::DirectoryNotFound { .. } => ErrorCode::DirectoryNotFound,
            ProviderError::FileExists { .. } => ErrorCode::FileExists,
            ProviderError::DirectoryExists { .. } => ErrorCode::DirectoryExists,
            _ => ErrorCode::Other,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Chunk index {index} is out of range for {total_count} chunk(s)"))]
    ChunkOutOfRange { index: u64, total_count: u64 },

    #[snafu(display("Provider operation failed: {source}"), context(false))]
    Provider { source: ProviderError },

    #[snafu(display("Storage error: {source}"), context(false))]
    Storage { source: opendal::Error },

    #[snafu(display("IO error: {source}"), context(false))]
    Io { source: std::io::Error },

    #[snafu(display("JSON error: {source}"), context(false))]
    Json { source: serde_json::Error },
}
