//! The filesystem-client capability consumed by sessions.
//!
//! The RPC transport to the remote filesystem is an external collaborator:
//! this crate only needs a way to bind an [`Authority`] to a live handle and
//! a handful of namespace queries on that handle. Both are expressed as
//! traits so the transport stays swappable (and fakeable in tests).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::{Authority, HdfsPath};

/// Opens client handles for authorities.
pub trait Connect {
    type Client: FsClient;

    /// Bind `authority` to a live client handle.
    ///
    /// Failures surface as [`crate::HdfsPathError::Connection`]; this call
    /// may block on network I/O.
    fn connect(&self, authority: &Authority) -> Result<Self::Client>;
}

/// A live handle onto one remote filesystem.
///
/// The working-directory accessors are infallible by contract: once a handle
/// is connected, the remote guarantees these calls succeed. Namespace
/// queries (`list`, `is_directory`) may still fail like any remote call.
pub trait FsClient {
    /// The handle's current working directory.
    fn working_directory(&self) -> HdfsPath;

    /// Set the handle's working directory. Always succeeds once connected.
    fn set_working_directory(&mut self, path: &HdfsPath);

    /// Enumerate the entries of a directory, in the remote's order.
    fn list(&mut self, path: &HdfsPath) -> Result<Vec<DirEntry>>;

    /// Whether `path` denotes a directory.
    fn is_directory(&mut self, path: &HdfsPath) -> Result<bool>;

    /// Release the handle. Idempotent.
    fn close(&mut self);
}

/// One entry of a directory listing. Transient: it only exists to carry the
/// unqualified name (for pattern filtering) and the entry kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Unqualified name of the entry.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}
