//! # hdfs-path
//!
//! Path values for a remote, authority-qualified hierarchical filesystem
//! (`hdfs://host:port/...`), with lazy session-scoped bindings to a
//! filesystem client.
//!
//! ## Features
//!
//! - **Path algebra**: [`HdfsPath`] is an immutable value with string-like
//!   composition — parsing, `/` joining, splitting, normalization, and
//!   equality/ordering/hashing on the normalized form.
//! - **Relative paths**: [`HdfsPath::relpath_to`] computes the relative path
//!   between two locations, returning the destination unchanged when it
//!   lives on a different authority and is therefore unreachable relatively.
//! - **Sessions**: [`FsSession`] binds authorities to client handles lazily,
//!   caches one handle per authority, guards working-directory changes
//!   against crossing filesystems, and offers a scoped
//!   ([`FsSession::enter`]) working directory that restores and closes on
//!   every exit path.
//! - **Traversal**: pattern-filtered listing and a lazy depth-first
//!   [`FsSession::walk`] (plus `walk_dirs`/`walk_files` projections).
//!
//! The RPC transport is not part of this crate: callers supply it through
//! the [`Connect`]/[`FsClient`] traits.
//!
//! ## Example
//!
//! ```
//! use hdfs_path::{Connect, DirEntry, FsClient, FsSession, HdfsPath, Result};
//! # struct Stub;
//! # struct StubClient(HdfsPath);
//! # impl Connect for Stub {
//! #     type Client = StubClient;
//! #     fn connect(&self, a: &hdfs_path::Authority) -> Result<StubClient> {
//! #         Ok(StubClient(HdfsPath::parse(&format!("{}/", a))?))
//! #     }
//! # }
//! # impl FsClient for StubClient {
//! #     fn working_directory(&self) -> HdfsPath { self.0.clone() }
//! #     fn set_working_directory(&mut self, p: &HdfsPath) { self.0 = p.clone(); }
//! #     fn list(&mut self, _: &HdfsPath) -> Result<Vec<DirEntry>> {
//! #         Ok(vec![DirEntry::new("part-0.txt", false)])
//! #     }
//! #     fn is_directory(&mut self, _: &HdfsPath) -> Result<bool> { Ok(true) }
//! #     fn close(&mut self) {}
//! # }
//! # fn main() -> Result<()> {
//! let data = HdfsPath::parse("hdfs://namenode:8020/data")?;
//!
//! // pure path work, no connection involved
//! let part = &data / "2026" / "part-0.txt";
//! assert_eq!(data.relpath_to(&part).to_string(), "2026/part-0.txt");
//!
//! // anything touching the namespace goes through a session
//! let mut session = FsSession::new(Stub);
//! for path in session.list(&data)? {
//!     println!("{}", path);
//! }
//! session.close();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod path;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use client::{Connect, DirEntry, FsClient};
pub use error::{HdfsPathError, Result};
pub use path::{Authority, HdfsPath};
pub use session::{CwdGuard, FsSession, Walk};
