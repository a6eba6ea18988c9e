//! Directory listing and recursive walk.

use glob::Pattern;
use log::trace;

use crate::client::{Connect, FsClient};
use crate::error::{HdfsPathError, Result};
use crate::path::HdfsPath;
use crate::session::FsSession;

impl<C: Connect> FsSession<C> {
    /// List the entries of `dir` as child paths.
    ///
    /// Fails with [`HdfsPathError::NotADirectory`] if `dir` does not denote
    /// a directory.
    pub fn list(&mut self, dir: &HdfsPath) -> Result<Vec<HdfsPath>> {
        self.list_matching(dir, "*")
    }

    /// List the entries of `dir` whose unqualified name matches a Unix
    /// shell-style wildcard pattern (`*`, `?`, `[...]`).
    ///
    /// Matching applies to entry names only, never to full paths; the
    /// remote's enumeration order is preserved. A multi-segment pattern
    /// (containing `/` or `**`) fails fast with
    /// [`HdfsPathError::Unsupported`] instead of silently matching a subset.
    pub fn list_matching(&mut self, dir: &HdfsPath, pattern: &str) -> Result<Vec<HdfsPath>> {
        let matcher = compile_pattern(pattern)?;
        let client = self.client(dir)?;
        if !client.is_directory(dir)? {
            return Err(HdfsPathError::NotADirectory(dir.clone()));
        }
        let entries = client.list(dir)?;
        trace!("listed {} entries under {}", entries.len(), dir);
        Ok(entries
            .into_iter()
            .filter(|entry| matcher.matches(&entry.name))
            .map(|entry| dir.child(&entry.name))
            .collect())
    }

    /// Depth-first walk of everything under `root`, `root` itself excluded.
    ///
    /// Directories are yielded before their contents; each directory costs
    /// one listing call, issued lazily as the iterator advances. A listing
    /// failure is yielded as an `Err` item for that directory and the walk
    /// continues with what remains.
    pub fn walk(&mut self, root: &HdfsPath) -> Walk<'_, C> {
        Walk::new(self, root, WalkFilter::All)
    }

    /// Like [`FsSession::walk`], yielding directories only.
    pub fn walk_dirs(&mut self, root: &HdfsPath) -> Walk<'_, C> {
        Walk::new(self, root, WalkFilter::Dirs)
    }

    /// Like [`FsSession::walk`], yielding files only. Directories are still
    /// descended into.
    pub fn walk_files(&mut self, root: &HdfsPath) -> Walk<'_, C> {
        Walk::new(self, root, WalkFilter::Files)
    }
}

fn compile_pattern(pattern: &str) -> Result<Pattern> {
    if pattern.contains('/') || pattern.contains("**") {
        return Err(HdfsPathError::Unsupported(format!(
            "multi-segment pattern {:?}: only single-segment wildcards are supported",
            pattern
        )));
    }
    Pattern::new(pattern)
        .map_err(|e| HdfsPathError::InvalidPath(format!("bad pattern {:?}: {}", pattern, e)))
}

#[derive(Debug, Clone, Copy)]
enum WalkFilter {
    All,
    Dirs,
    Files,
}

impl WalkFilter {
    fn wants(self, is_dir: bool) -> bool {
        match self {
            WalkFilter::All => true,
            WalkFilter::Dirs => is_dir,
            WalkFilter::Files => !is_dir,
        }
    }
}

enum Frame {
    /// An entry to hand to the caller (and descend into, if a directory).
    Visit { path: HdfsPath, is_dir: bool },
    /// A directory whose listing is still pending.
    Expand(HdfsPath),
}

/// Lazy depth-first traversal returned by [`FsSession::walk`] and friends.
///
/// The stack holds at most one frame per entry seen so far, so recursion is
/// bounded by the depth and fan-out of the observed tree.
pub struct Walk<'s, C: Connect> {
    session: &'s mut FsSession<C>,
    stack: Vec<Frame>,
    filter: WalkFilter,
}

impl<'s, C: Connect> Walk<'s, C> {
    fn new(session: &'s mut FsSession<C>, root: &HdfsPath, filter: WalkFilter) -> Self {
        Self {
            session,
            stack: vec![Frame::Expand(root.clone())],
            filter,
        }
    }

    fn expand(&mut self, dir: &HdfsPath) -> Result<()> {
        let client = self.session.client(dir)?;
        let mut entries = client.list(dir)?;
        // reversed so the first listed entry is popped first
        entries.reverse();
        for entry in entries {
            self.stack.push(Frame::Visit {
                path: dir.child(&entry.name),
                is_dir: entry.is_dir,
            });
        }
        Ok(())
    }
}

impl<C: Connect> Iterator for Walk<'_, C> {
    type Item = Result<HdfsPath>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Expand(dir) => {
                    if let Err(e) = self.expand(&dir) {
                        return Some(Err(e));
                    }
                }
                Frame::Visit { path, is_dir } => {
                    if is_dir {
                        self.stack.push(Frame::Expand(path.clone()));
                    }
                    if self.filter.wants(is_dir) {
                        return Some(Ok(path));
                    }
                }
            }
        }
        None
    }
}
