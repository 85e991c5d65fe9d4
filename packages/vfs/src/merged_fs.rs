//! MergedFs: a read-only union of two filesystems where the upper one wins.
//!
//! Lookups try the upper layer first and fall through to the lower layer
//! only when the upper layer has nothing at that path. Directory listings are
//! the union of both layers, with upper entries replacing same-named lower
//! entries.

use std::collections::BTreeMap;

use crate::{DirEntry, Error, FileSource, Node, Path};

/// Union of two [`FileSource`]s with total precedence for `upper`.
///
/// A file in the upper layer also hides everything the lower layer has
/// underneath the same path: if `upper` has a file `a`, then `a/b` is not
/// found even when `lower` has a directory `a` containing `b`.
///
/// # Example
///
/// ```rust
/// use swaggerui_vfs::{FileSource, MemFs, MergedFs, Mode, path};
///
/// let mut lower = MemFs::new();
/// lower.put(&path!("swagger-initializer.js"), "stock", Mode::FILE).unwrap();
/// lower.put(&path!("index.html"), "<html>", Mode::FILE).unwrap();
///
/// let mut upper = MemFs::new();
/// upper.put(&path!("swagger-initializer.js"), "custom", Mode::FILE).unwrap();
///
/// let merged = MergedFs::new(upper, lower);
/// assert_eq!(&merged.read_file(&path!("swagger-initializer.js")).unwrap()[..], b"custom");
/// assert_eq!(&merged.read_file(&path!("index.html")).unwrap()[..], b"<html>");
/// ```
#[derive(Debug, Clone)]
pub struct MergedFs<U, L> {
    upper: U,
    lower: L,
}

impl<U: FileSource, L: FileSource> MergedFs<U, L> {
    pub fn new(upper: U, lower: L) -> Self {
        Self { upper, lower }
    }

    /// The layer that wins on collisions.
    pub fn upper(&self) -> &U {
        &self.upper
    }

    /// The fallback layer.
    pub fn lower(&self) -> &L {
        &self.lower
    }

    /// True if a proper ancestor of `path` is a file in the upper layer.
    fn hidden_by_upper_file(&self, path: &Path) -> Result<bool, Error> {
        for ancestor in path.ancestors() {
            match self.upper.open(&ancestor) {
                Ok(Node::File(_)) => return Ok(true),
                Ok(Node::Dir { .. }) => continue,
                Err(e) if e.is_not_found() => return Ok(false),
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }
}

impl<U: FileSource, L: FileSource> FileSource for MergedFs<U, L> {
    fn open(&self, path: &Path) -> Result<Node, Error> {
        match self.upper.open(path) {
            Ok(node) => Ok(node),
            Err(e) if e.is_not_found() => {
                if self.hidden_by_upper_file(path)? {
                    return Err(e);
                }
                self.lower.open(path)
            }
            Err(e) => Err(e),
        }
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error> {
        match self.upper.open(dir) {
            Ok(Node::File(_)) => Err(Error::NotADirectory { path: dir.clone() }),
            Ok(Node::Dir { .. }) => {
                let mut merged: BTreeMap<String, DirEntry> = self
                    .upper
                    .list(dir)?
                    .into_iter()
                    .map(|entry| (entry.name.clone(), entry))
                    .collect();

                match self.lower.list(dir) {
                    Ok(entries) => {
                        for entry in entries {
                            merged.entry(entry.name.clone()).or_insert(entry);
                        }
                    }
                    // The lower layer may lack the directory or have a file there.
                    Err(Error::NotFound { .. }) | Err(Error::NotADirectory { .. }) => {}
                    Err(e) => return Err(e),
                }

                Ok(merged.into_values().collect())
            }
            Err(e) if e.is_not_found() => {
                if self.hidden_by_upper_file(dir)? {
                    return Err(e);
                }
                self.lower.list(dir)
            }
            Err(e) => Err(e),
        }
    }
}
