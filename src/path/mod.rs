//! HDFS path values.
//!
//! [`HdfsPath`] is an immutable value representing a location in a remote,
//! authority-qualified namespace (`hdfs://host:port/seg/...`). All transforms
//! (joining, splitting, normalization) return new instances; nothing here
//! touches the network. Operations that need a live filesystem live on
//! [`FsSession`](crate::session::FsSession).

mod relative;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Div;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::{HdfsPathError, Result};

/// The host/port pair identifying which remote filesystem a path belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Authority {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Authority {
    /// Scheme used when none is given explicitly.
    pub const DEFAULT_SCHEME: &'static str = "hdfs";

    /// Create an authority with the default scheme.
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme: Self::DEFAULT_SCHEME.to_string(),
            host: host.into(),
            port,
        }
    }

    /// The default configured filesystem (`hdfs://default`).
    ///
    /// Paths without an explicit authority resolve against this, mirroring
    /// the libhdfs convention of connecting to host `"default"`.
    pub fn default_fs() -> Self {
        Self::new("default", None)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// An immutable path in a remote hierarchical namespace.
///
/// Conforms to `[scheme://][host[:port]]/seg1/seg2/...`. A path carrying an
/// authority is always absolute. Equality, ordering, and hashing are defined
/// on the normalized form, so `a/../b` equals `b`.
///
/// # Example
/// ```
/// use hdfs_path::HdfsPath;
///
/// let root = HdfsPath::parse("hdfs://host:1/")?;
/// let p = &root / "data" / "part-0.txt";
/// assert_eq!(p.to_string(), "hdfs://host:1/data/part-0.txt");
/// assert_eq!(p.file_name(), "part-0.txt");
/// assert_eq!(p.extension().as_deref(), Some("txt"));
/// # Ok::<(), hdfs_path::HdfsPathError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HdfsPath {
    authority: Option<Authority>,
    absolute: bool,
    segments: Vec<String>,
}

impl HdfsPath {
    /// The authority-less root path (`/`).
    pub fn root() -> Self {
        Self {
            authority: None,
            absolute: true,
            segments: Vec::new(),
        }
    }

    /// The relative "current directory" path (`.`).
    pub fn current() -> Self {
        Self {
            authority: None,
            absolute: false,
            segments: Vec::new(),
        }
    }

    /// Parse a path string.
    ///
    /// An authority is present iff the text contains `://`; the authority
    /// section runs up to the first `/` after it. An empty authority section
    /// (`hdfs:///x`) denotes the default filesystem. An empty remainder after
    /// an authority parses to that authority's root.
    ///
    /// Fails with [`HdfsPathError::InvalidPath`] on a malformed scheme or
    /// port.
    pub fn parse(text: &str) -> Result<Self> {
        let Some(idx) = text.find("://") else {
            let absolute = text.starts_with('/');
            return Ok(Self {
                authority: None,
                absolute,
                segments: split_segments(text),
            });
        };

        let scheme = &text[..idx];
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(HdfsPathError::InvalidPath(format!(
                "bad scheme in {:?}",
                text
            )));
        }

        let rest = &text[idx + 3..];
        let (auth_text, path_text) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        Ok(Self {
            authority: Some(parse_authority(scheme, auth_text, text)?),
            absolute: true,
            segments: split_segments(path_text),
        })
    }

    /// The authority, if this path carries one.
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Raw (pre-normalization) segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this path is anchored at a root. Paths with an authority are
    /// always absolute.
    pub fn is_absolute(&self) -> bool {
        self.absolute || self.authority.is_some()
    }

    /// Whether this path carries an explicit authority.
    pub fn is_full(&self) -> bool {
        self.authority.is_some()
    }

    /// Join path fragments onto this path, conventional-join style.
    ///
    /// An absolute right-hand fragment replaces the accumulated segments; a
    /// fragment with its own authority replaces the whole accumulated path.
    ///
    /// Fails with [`HdfsPathError::InvalidPath`] if a fragment's authority
    /// conflicts with an authority already established on the left — joining
    /// never silently drops or retargets an authority.
    pub fn join<I, S>(&self, fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut acc = self.clone();
        for fragment in fragments {
            acc = acc.join_path(&Self::parse(fragment.as_ref())?)?;
        }
        Ok(acc)
    }

    /// Join one already-parsed path onto this one. See [`HdfsPath::join`].
    pub fn join_path(&self, rhs: &Self) -> Result<Self> {
        if let Some(ra) = &rhs.authority {
            if let Some(la) = &self.authority {
                if la != ra {
                    return Err(HdfsPathError::InvalidPath(format!(
                        "cannot join paths on different authorities: {} and {}",
                        la, ra
                    )));
                }
            }
            return Ok(rhs.clone());
        }
        if rhs.absolute {
            return Ok(Self {
                authority: self.authority.clone(),
                absolute: true,
                segments: rhs.segments.clone(),
            });
        }
        let mut segments = self.segments.clone();
        segments.extend(rhs.segments.iter().cloned());
        Ok(Self {
            authority: self.authority.clone(),
            absolute: self.absolute,
            segments,
        })
    }

    /// Append one literal name as a new last segment.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self {
            authority: self.authority.clone(),
            absolute: self.absolute,
            segments,
        }
    }

    /// Split into `(parent, name)` over the normalized form.
    ///
    /// The root splits to `(root, "")`.
    pub fn split(&self) -> (Self, String) {
        let mut segments = self.normalized_segments();
        let name = match segments.pop() {
            Some(name) => name,
            None => String::new(),
        };
        let parent = Self {
            authority: self.authority.clone(),
            absolute: self.absolute,
            segments,
        };
        (parent, name)
    }

    /// The parent path (all but the last segment).
    pub fn parent(&self) -> Self {
        self.split().0
    }

    /// The last segment, or `""` at a root.
    pub fn file_name(&self) -> String {
        self.split().1
    }

    /// The last segment with its extension removed.
    pub fn name_base(&self) -> String {
        let name = self.file_name();
        match name.rfind('.') {
            Some(i) if i > 0 => name[..i].to_string(),
            _ => name,
        }
    }

    /// The extension of the last segment, without the dot.
    ///
    /// A leading-dot name with no further dot (`.bashrc`) has no extension.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(i) if i > 0 => Some(name[i + 1..].to_string()),
            _ => None,
        }
    }

    /// This path with the last segment's extension removed.
    pub fn strip_ext(&self) -> Self {
        let (parent, name) = self.split();
        if name.is_empty() {
            return self.clone();
        }
        match name.rfind('.') {
            Some(i) if i > 0 => parent.child(&name[..i]),
            _ => self.clone(),
        }
    }

    /// Collapse `.`, empty, and `..` segments.
    ///
    /// `..` at an established root is a no-op rather than an error
    /// (permissive policy); leading `..` on a relative path is preserved.
    /// Idempotent.
    pub fn normalize(&self) -> Self {
        Self {
            authority: self.authority.clone(),
            absolute: self.absolute,
            segments: self.normalized_segments(),
        }
    }

    pub(crate) fn normalized_segments(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for seg in &self.segments {
            match seg.as_str() {
                "" | "." => {}
                ".." => match out.last().map(|s| s.as_str()) {
                    Some(s) if s != ".." => {
                        out.pop();
                    }
                    _ => {
                        if !self.is_absolute() {
                            out.push("..".to_string());
                        }
                    }
                },
                other => out.push(other.to_string()),
            }
        }
        out
    }
}

fn split_segments(text: &str) -> Vec<String> {
    text.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_authority(scheme: &str, text: &str, full: &str) -> Result<Authority> {
    if text.is_empty() {
        return Ok(Authority {
            scheme: scheme.to_string(),
            host: "default".to_string(),
            port: None,
        });
    }
    let (host, port) = match text.rsplit_once(':') {
        Some((host, port_text)) => {
            let port = port_text.parse::<u16>().map_err(|_| {
                HdfsPathError::InvalidPath(format!("bad port in {:?}", full))
            })?;
            (host, Some(port))
        }
        None => (text, None),
    };
    if host.is_empty() {
        return Err(HdfsPathError::InvalidPath(format!(
            "empty host in {:?}",
            full
        )));
    }
    if host.contains(':') {
        return Err(HdfsPathError::InvalidPath(format!(
            "bad host {:?} in {:?}",
            host, full
        )));
    }
    Ok(Authority {
        scheme: scheme.to_string(),
        host: host.to_string(),
        port,
    })
}

impl fmt::Display for HdfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.segments.join("/");
        match &self.authority {
            Some(authority) => write!(f, "{}/{}", authority, joined),
            None if self.absolute => write!(f, "/{}", joined),
            None if joined.is_empty() => write!(f, "."),
            None => write!(f, "{}", joined),
        }
    }
}

impl FromStr for HdfsPath {
    type Err = HdfsPathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for HdfsPath {
    fn eq(&self, other: &Self) -> bool {
        self.authority == other.authority
            && self.is_absolute() == other.is_absolute()
            && self.normalized_segments() == other.normalized_segments()
    }
}

impl Eq for HdfsPath {}

impl PartialOrd for HdfsPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HdfsPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.authority
            .cmp(&other.authority)
            .then_with(|| self.is_absolute().cmp(&other.is_absolute()))
            .then_with(|| self.normalized_segments().cmp(&other.normalized_segments()))
    }
}

impl Hash for HdfsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.authority.hash(state);
        self.is_absolute().hash(state);
        self.normalized_segments().hash(state);
    }
}

/// Segment-level joining with `/`.
///
/// The right operand is a relative or root-anchored suffix; it is split on
/// `/` but never parsed for an authority, so this cannot fail. A rooted
/// suffix (`"/x"`) replaces the segments while keeping the authority.
impl Div<&str> for &HdfsPath {
    type Output = HdfsPath;

    fn div(self, rhs: &str) -> HdfsPath {
        if rhs.starts_with('/') {
            return HdfsPath {
                authority: self.authority.clone(),
                absolute: true,
                segments: split_segments(rhs),
            };
        }
        let mut segments = self.segments.clone();
        segments.extend(split_segments(rhs));
        HdfsPath {
            authority: self.authority.clone(),
            absolute: self.absolute,
            segments,
        }
    }
}

impl Div<&str> for HdfsPath {
    type Output = HdfsPath;

    fn div(self, rhs: &str) -> HdfsPath {
        &self / rhs
    }
}

impl Serialize for HdfsPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HdfsPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
