//! Error types for mesh loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The bytes could not be obtained: missing, unreadable or truncated input.
    Io,
    /// The bytes were present but do not follow the STL grammar.
    Format,
}

/// Errors that can occur while loading an STL mesh.
///
/// Every variant is fatal to the load; no partial mesh is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input is too short to hold the 80-byte header and triangle count.
    #[error("binary STL preamble needs {expected} bytes, got {got}")]
    TruncatedHeader {
        /// Required preamble size.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// A binary body ended before all declared triangles were read.
    #[error("truncated binary STL: expected {expected} triangles, found {found}")]
    Truncated {
        /// Triangle count declared in the header.
        expected: u32,
        /// Complete triangles actually present.
        found: u32,
    },

    /// The binary body holds more data than the declared triangle count.
    #[error("binary STL declares {declared} triangles but carries {actual_bytes} body bytes")]
    TriangleCountMismatch {
        /// Triangle count declared in the header.
        declared: u32,
        /// Bytes following the 84-byte preamble.
        actual_bytes: u64,
    },

    /// The mesh has more distinct vertices than `u32` indices can address.
    #[error("mesh has {count} distinct vertices, more than u32 indices can address")]
    TooManyVertices {
        /// Number of vertices already stored when the limit was hit.
        count: usize,
    },

    /// The ASCII text violates the STL grammar.
    #[error("invalid ASCII STL at line {line}: {message}")]
    Format {
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },
}

impl LoadError {
    /// Create a `Format` error for the given line.
    #[must_use]
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Returns which half of the taxonomy this error belongs to.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::Io { .. } | Self::TruncatedHeader { .. } | Self::Truncated { .. } => {
                LoadErrorKind::Io
            }
            Self::TriangleCountMismatch { .. }
            | Self::TooManyVertices { .. }
            | Self::Format { .. } => LoadErrorKind::Format,
        }
    }
}
