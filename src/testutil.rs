//! In-memory filesystem fake for session and traversal tests.
//!
//! One [`MemoryFs`] plays the connector role for any number of authorities.
//! Trees persist across reconnects; working directories live on the handle
//! and die with it, like the real capability.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::client::{Connect, DirEntry, FsClient};
use crate::error::{HdfsPathError, Result};
use crate::path::{Authority, HdfsPath};

#[derive(Debug, Default)]
struct Tree {
    /// Absolute key (`/a/b`) to entry kind. The root is implicit.
    entries: BTreeMap<String, bool>,
}

#[derive(Debug, Default)]
struct Inner {
    trees: RefCell<HashMap<Authority, Rc<RefCell<Tree>>>>,
    /// Last working directory set on any handle, per authority.
    last_cwd: RefCell<HashMap<Authority, HdfsPath>>,
    /// Key of a directory whose listing is rigged to fail.
    fail_list: RefCell<Option<String>>,
    connects: Cell<usize>,
    closes: Cell<usize>,
    lists: Cell<usize>,
}

/// Fake connector over per-authority in-memory trees.
#[derive(Clone, Default)]
pub struct MemoryFs {
    inner: Rc<Inner>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an authority with an empty tree so connects to it succeed.
    pub fn add_authority(&self, authority: Authority) {
        self.inner
            .trees
            .borrow_mut()
            .entry(authority)
            .or_default();
    }

    /// Add a directory (and its ancestors) at `path`.
    pub fn add_dir(&self, path: &HdfsPath) {
        self.insert(path, true);
    }

    /// Add a file (and its ancestor directories) at `path`.
    pub fn add_file(&self, path: &HdfsPath) {
        self.insert(path, false);
    }

    /// Make every listing of `path` fail, as a remote call would.
    pub fn fail_list_on(&self, path: &HdfsPath) {
        *self.inner.fail_list.borrow_mut() = Some(key_of(path));
    }

    pub fn connect_count(&self) -> usize {
        self.inner.connects.get()
    }

    pub fn close_count(&self) -> usize {
        self.inner.closes.get()
    }

    pub fn list_count(&self) -> usize {
        self.inner.lists.get()
    }

    /// The working directory most recently set on any handle for `path`'s
    /// authority.
    pub fn last_working_directory(&self, path: &HdfsPath) -> Option<HdfsPath> {
        self.inner
            .last_cwd
            .borrow()
            .get(&authority_of(path))
            .cloned()
    }

    fn insert(&self, path: &HdfsPath, is_dir: bool) {
        let mut trees = self.inner.trees.borrow_mut();
        let tree = trees.entry(authority_of(path)).or_default();
        let mut tree = tree.borrow_mut();
        let segments = path.normalized_segments();
        if segments.is_empty() {
            // the root exists implicitly
            return;
        }
        for i in 1..segments.len() {
            tree.entries
                .insert(format!("/{}", segments[..i].join("/")), true);
        }
        tree.entries.insert(key_of(path), is_dir);
    }
}

impl Connect for MemoryFs {
    type Client = MemoryClient;

    fn connect(&self, authority: &Authority) -> Result<MemoryClient> {
        let trees = self.inner.trees.borrow();
        let tree = trees.get(authority).ok_or_else(|| HdfsPathError::Connection {
            authority: authority.to_string(),
            reason: "unknown authority".to_string(),
        })?;
        self.inner.connects.set(self.inner.connects.get() + 1);
        let cwd = HdfsPath::parse(&format!("{}/", authority)).map_err(|e| {
            HdfsPathError::Connection {
                authority: authority.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(MemoryClient {
            inner: Rc::clone(&self.inner),
            tree: Rc::clone(tree),
            authority: authority.clone(),
            cwd,
            closed: false,
        })
    }
}

/// Fake client handle bound to one authority's tree.
#[derive(Debug)]
pub struct MemoryClient {
    inner: Rc<Inner>,
    tree: Rc<RefCell<Tree>>,
    authority: Authority,
    cwd: HdfsPath,
    closed: bool,
}

impl FsClient for MemoryClient {
    fn working_directory(&self) -> HdfsPath {
        self.cwd.clone()
    }

    fn set_working_directory(&mut self, path: &HdfsPath) {
        self.cwd = path.clone();
        self.inner
            .last_cwd
            .borrow_mut()
            .insert(self.authority.clone(), path.clone());
    }

    fn list(&mut self, path: &HdfsPath) -> Result<Vec<DirEntry>> {
        self.inner.lists.set(self.inner.lists.get() + 1);
        let key = key_of(path);
        if self.inner.fail_list.borrow().as_deref() == Some(key.as_str()) {
            return Err(HdfsPathError::Connection {
                authority: self.authority.to_string(),
                reason: format!("listing {} failed", path),
            });
        }
        let tree = self.tree.borrow();
        Ok(tree
            .entries
            .iter()
            .filter_map(|(entry_key, &is_dir)| {
                let (parent, name) = split_key(entry_key);
                (parent == key).then(|| DirEntry::new(name, is_dir))
            })
            .collect())
    }

    fn is_directory(&mut self, path: &HdfsPath) -> Result<bool> {
        let key = key_of(path);
        if key == "/" {
            return Ok(true);
        }
        Ok(self.tree.borrow().entries.get(&key) == Some(&true))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.inner.closes.set(self.inner.closes.get() + 1);
        }
    }
}

fn authority_of(path: &HdfsPath) -> Authority {
    path.authority()
        .cloned()
        .unwrap_or_else(Authority::default_fs)
}

fn key_of(path: &HdfsPath) -> String {
    let segments = path.normalized_segments();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

fn split_key(key: &str) -> (&str, &str) {
    match key.rsplit_once('/') {
        Some(("", name)) => ("/", name),
        Some((parent, name)) => (parent, name),
        None => ("/", key),
    }
}
