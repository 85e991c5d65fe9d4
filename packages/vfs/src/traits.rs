//! The file-lookup trait every layer implements.

use std::sync::Arc;

use bytes::Bytes;

use crate::{DirEntry, Error, Node, Path};

/// A read-only, hierarchical collection of named files.
///
/// This is the single lookup surface handed to the HTTP file server. All
/// methods take `&self`: once built, a source is never mutated, so it can be
/// shared across any number of concurrent readers.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn FileSource>`.
pub trait FileSource: Send + Sync {
    /// Open the node at a path.
    ///
    /// # Returns
    ///
    /// * `Ok(Node::File(_))` - A regular file.
    /// * `Ok(Node::Dir { .. })` - A directory. The root is always a directory.
    /// * `Err(Error::NotFound { .. })` - Nothing exists at the path.
    fn open(&self, path: &Path) -> Result<Node, Error>;

    /// List the entries of a directory, sorted by name.
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error>;

    /// Read the whole content of a regular file.
    fn read_file(&self, path: &Path) -> Result<Bytes, Error> {
        match self.open(path)? {
            Node::File(file) => Ok(file.into_content()),
            Node::Dir { .. } => Err(Error::IsADirectory { path: path.clone() }),
        }
    }
}

// Blanket implementations for references and smart pointers

impl<T: FileSource + ?Sized> FileSource for &T {
    fn open(&self, path: &Path) -> Result<Node, Error> {
        (**self).open(path)
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error> {
        (**self).list(dir)
    }
}

impl<T: FileSource + ?Sized> FileSource for Box<T> {
    fn open(&self, path: &Path) -> Result<Node, Error> {
        self.as_ref().open(path)
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error> {
        self.as_ref().list(dir)
    }
}

impl<T: FileSource + ?Sized> FileSource for Arc<T> {
    fn open(&self, path: &Path) -> Result<Node, Error> {
        self.as_ref().open(path)
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error> {
        self.as_ref().list(dir)
    }
}
