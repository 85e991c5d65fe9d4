//! In-memory writable filesystem, used as the overlay layer.

use bytes::Bytes;

use crate::path_trie::PathTrie;
use crate::{DirEntry, Error, FileSource, Mode, NamedFile, Node, Path, PathError};

/// An in-memory directory tree of named files.
///
/// Files are written with [`MemFs::put`]; intermediate directories are
/// created implicitly. There is no delete. Once populated, the tree is
/// read through [`FileSource`], which only needs `&self`.
///
/// # Example
///
/// ```rust
/// use swaggerui_vfs::{FileSource, MemFs, Mode, path};
///
/// let mut overlay = MemFs::new();
/// overlay.put(&path!("swagger.yaml"), "openapi: 3.0.0", Mode::FILE).unwrap();
///
/// let content = overlay.read_file(&path!("swagger.yaml")).unwrap();
/// assert_eq!(&content[..], b"openapi: 3.0.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    trie: PathTrie<NamedFile>,
}

impl MemFs {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the file at `path`.
    ///
    /// Fails if `path` is the root, if `path` is an existing directory, or
    /// if one of its ancestors is a file.
    pub fn put(
        &mut self,
        path: &Path,
        content: impl Into<Bytes>,
        mode: Mode,
    ) -> Result<(), Error> {
        let name = match path.file_name() {
            Some(name) => name.to_string(),
            None => {
                return Err(Error::Path(PathError::InvalidPath {
                    message: "cannot write a file at the root directory".to_string(),
                }))
            }
        };

        if let Some((_, suffix)) = self.trie.find_ancestor(path) {
            if !suffix.is_empty() {
                return Err(Error::NotADirectory {
                    path: path.slice(0, path.len() - suffix.len()),
                });
            }
        }

        if self
            .trie
            .get_subtrie(path)
            .is_some_and(|node| node.has_children())
        {
            return Err(Error::IsADirectory { path: path.clone() });
        }

        let content = content.into();
        log::debug!("overlay: writing {} ({} bytes, mode {})", path, content.len(), mode);
        self.trie.insert(path, NamedFile::new(name, content, mode));
        Ok(())
    }

    /// Number of files stored.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// True if no files are stored.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Iterate over all files with their full paths.
    pub fn files(&self) -> impl Iterator<Item = (Path, &NamedFile)> {
        self.trie.iter()
    }
}

impl FileSource for MemFs {
    fn open(&self, path: &Path) -> Result<Node, Error> {
        let node = self
            .trie
            .get_subtrie(path)
            .ok_or_else(|| Error::NotFound { path: path.clone() })?;

        match node.value() {
            Some(file) => Ok(Node::File(file.clone())),
            None => Ok(Node::dir(path.file_name().unwrap_or("."))),
        }
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error> {
        let node = self
            .trie
            .get_subtrie(dir)
            .ok_or_else(|| Error::NotFound { path: dir.clone() })?;

        if node.value().is_some() {
            return Err(Error::NotADirectory { path: dir.clone() });
        }

        Ok(node
            .children()
            .map(|(name, child)| match child.value() {
                Some(_) => DirEntry::file(name),
                None => DirEntry::dir(name),
            })
            .collect())
    }
}
