//! Error types for the hdfs-path library.

use thiserror::Error;

use crate::path::HdfsPath;

/// Main error type for hdfs-path operations.
#[derive(Error, Debug)]
pub enum HdfsPathError {
    /// Malformed path text, malformed wildcard pattern, or a join that
    /// would mix two different authorities.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The filesystem-client capability failed to bind an authority.
    #[error("connection to {authority} failed: {reason}")]
    Connection { authority: String, reason: String },

    /// Attempt to change the working directory to a path on a different
    /// authority than the client this session is bound to.
    #[error("cannot change working directory across filesystems: bound to {bound}, requested {requested}")]
    CrossFilesystem { bound: String, requested: String },

    /// Listing attempted on a path that does not denote a directory.
    #[error("not a directory: {0}")]
    NotADirectory(HdfsPath),

    /// Explicitly unsupported operation, e.g. multi-segment glob.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for hdfs-path operations.
pub type Result<T> = std::result::Result<T, HdfsPathError>;
