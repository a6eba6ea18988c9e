//! Relative path computation between two paths.

use super::HdfsPath;

impl HdfsPath {
    /// Compute a relative path from `self` to `destination`.
    ///
    /// When both paths are on the same authority (including both having
    /// none), the result walks up with `..` past every segment of `self`
    /// outside the longest common prefix, then down into `destination`.
    /// Identical paths give `.`.
    ///
    /// When the authorities differ — different host/port/scheme, or only one
    /// side carries one — the destination is unreachable via a relative
    /// expression and is returned unchanged, as an absolute path. This keeps
    /// the operation total: it never errors, at the cost of sometimes
    /// answering an absolute path where a relative one was asked for.
    ///
    /// # Example
    /// ```
    /// use hdfs_path::HdfsPath;
    ///
    /// let root = HdfsPath::parse("hdfs://host:1/")?;
    /// let c = &root / "b0" / "c";
    /// assert_eq!(root.relpath_to(&c).to_string(), "b0/c");
    /// assert_eq!(c.relpath_to(&root).to_string(), "../..");
    /// # Ok::<(), hdfs_path::HdfsPathError>(())
    /// ```
    pub fn relpath_to(&self, destination: &Self) -> Self {
        if self.authority() != destination.authority()
            || self.is_absolute() != destination.is_absolute()
        {
            return destination.clone();
        }

        let from = self.normalized_segments();
        let to = destination.normalized_segments();

        let common = from
            .iter()
            .zip(to.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<String> = Vec::with_capacity(from.len() - common + to.len() - common);
        segments.resize(from.len() - common, "..".to_string());
        segments.extend(to[common..].iter().cloned());

        Self {
            authority: None,
            absolute: false,
            segments,
        }
    }
}
