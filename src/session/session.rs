//! Session state: lazy client binding and working-directory management.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use log::{debug, trace};

use crate::client::{Connect, FsClient};
use crate::error::{HdfsPathError, Result};
use crate::path::{Authority, HdfsPath};

/// A session onto one or more remote filesystems.
///
/// Paths themselves are plain values; a session supplies the live state they
/// need: client handles, opened lazily on first use and cached per
/// [`Authority`], and the working directory of the filesystem the session is
/// bound to. The bound authority is the one of the first client resolved;
/// working-directory changes to any other authority are rejected rather than
/// silently retargeted.
///
/// A session is single-threaded by design. Callers needing concurrency use
/// independent sessions, one per live authority binding.
pub struct FsSession<C: Connect> {
    connector: C,
    clients: HashMap<Authority, C::Client>,
    bound: Option<Authority>,
}

impl<C: Connect> FsSession<C> {
    /// Create a session. No connection is opened until a path operation
    /// needs one.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            clients: HashMap::new(),
            bound: None,
        }
    }

    fn authority_of(path: &HdfsPath) -> Authority {
        path.authority()
            .cloned()
            .unwrap_or_else(Authority::default_fs)
    }

    /// The authority this session's working-directory state belongs to, if a
    /// client has been resolved yet.
    pub fn bound_authority(&self) -> Option<&Authority> {
        self.bound.as_ref()
    }

    /// Resolve the client handle for `path`'s authority (the default
    /// filesystem if the path carries none), connecting and caching it on
    /// first use.
    ///
    /// May block on network I/O; connection failures surface as
    /// [`HdfsPathError::Connection`] and leave no partial state behind.
    pub fn client(&mut self, path: &HdfsPath) -> Result<&mut C::Client> {
        let authority = Self::authority_of(path);
        let client = match self.clients.entry(authority.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("connecting to {}", authority);
                entry.insert(self.connector.connect(&authority)?)
            }
        };
        if self.bound.is_none() {
            self.bound = Some(authority);
        }
        Ok(client)
    }

    /// The current working directory of the filesystem `path` belongs to.
    pub fn working_directory(&mut self, path: &HdfsPath) -> Result<HdfsPath> {
        Ok(self.client(path)?.working_directory())
    }

    /// Change the working directory to `path`.
    ///
    /// Fails with [`HdfsPathError::CrossFilesystem`] if `path` is on a
    /// different authority than the client this session is bound to; the
    /// existing working directory is left untouched in that case.
    pub fn set_working_directory(&mut self, path: &HdfsPath) -> Result<()> {
        let requested = Self::authority_of(path);
        if let Some(bound) = &self.bound {
            if *bound != requested {
                return Err(HdfsPathError::CrossFilesystem {
                    bound: bound.to_string(),
                    requested: requested.to_string(),
                });
            }
        }
        trace!("chdir to {}", path);
        self.client(path)?.set_working_directory(path);
        Ok(())
    }

    /// Relative path from `start` to `path`.
    ///
    /// `start` defaults to the working directory of `path`'s filesystem, so
    /// `relpath(p, None)` answers "how do I get to `p` from where this
    /// session currently is". With an explicit `start` this is pure
    /// [`HdfsPath::relpath_to`] and touches no connection state beyond the
    /// default-case lookup.
    pub fn relpath(&mut self, path: &HdfsPath, start: Option<&HdfsPath>) -> Result<HdfsPath> {
        let start = match start {
            Some(start) => start.clone(),
            None => self.working_directory(path)?,
        };
        Ok(start.relpath_to(path))
    }

    /// Close and drop every cached client handle. Idempotent: closing an
    /// already-closed session is a no-op. The session stays usable; the next
    /// path operation reconnects.
    pub fn close(&mut self) {
        for (authority, mut client) in self.clients.drain() {
            debug!("closing client for {}", authority);
            client.close();
        }
        self.bound = None;
    }

    /// Enter `path` as the working directory for a scope.
    ///
    /// Saves the current working directory and changes it to `path`. The
    /// returned guard dereferences to the session; when it goes out of scope
    /// — by normal exit, early `?` return, or unwind — it restores the saved
    /// directory and then closes the session, in that order. Errors raised
    /// inside the scope are untouched by the cleanup.
    ///
    /// # Example
    /// ```no_run
    /// # fn demo<C: hdfs_path::Connect>(mut session: hdfs_path::FsSession<C>) -> hdfs_path::Result<()> {
    /// let dir = hdfs_path::HdfsPath::parse("hdfs://host:1/data")?;
    /// {
    ///     let mut scope = session.enter(&dir)?;
    ///     let entries = scope.list(&dir)?;
    ///     // working directory is `dir` in here
    /// # let _ = entries;
    /// }
    /// // restored and closed again
    /// # Ok(())
    /// # }
    /// ```
    pub fn enter(&mut self, path: &HdfsPath) -> Result<CwdGuard<'_, C>> {
        let saved = self.working_directory(path)?;
        self.set_working_directory(path)?;
        Ok(CwdGuard {
            session: self,
            saved,
        })
    }
}

impl<C: Connect> Drop for FsSession<C> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Guard created by [`FsSession::enter`].
///
/// Restores the saved working directory and closes the session when dropped.
pub struct CwdGuard<'s, C: Connect> {
    session: &'s mut FsSession<C>,
    saved: HdfsPath,
}

impl<C: Connect> Deref for CwdGuard<'_, C> {
    type Target = FsSession<C>;

    fn deref(&self) -> &FsSession<C> {
        self.session
    }
}

impl<C: Connect> DerefMut for CwdGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut FsSession<C> {
        self.session
    }
}

impl<C: Connect> Drop for CwdGuard<'_, C> {
    fn drop(&mut self) {
        // Restore first, then close: the restore must land on the still-open
        // bound client.
        if let Some(bound) = self.session.bound.clone() {
            if let Some(client) = self.session.clients.get_mut(&bound) {
                trace!("restoring working directory to {}", self.saved);
                client.set_working_directory(&self.saved);
            }
        }
        self.session.close();
    }
}
