//! Read-only filesystem over a directory tree embedded in the binary.

use std::path::PathBuf;

use bytes::Bytes;
use include_dir::{Dir, DirEntry as EmbeddedEntry};

use crate::{DirEntry, Error, FileSource, Mode, NamedFile, Node, Path};

/// A view of a `'static` embedded directory, optionally rooted at a sub-tree.
///
/// The embedded tree lives for the whole process, so a `BundleFs` is `Copy`
/// and every handler can hold its own without sharing any state.
///
/// ```rust,ignore
/// use include_dir::{include_dir, Dir};
/// use swaggerui_vfs::BundleFs;
///
/// static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");
///
/// let dist = BundleFs::sub(&ASSETS, "swagger-ui/dist")?;
/// ```
#[derive(Clone, Copy)]
pub struct BundleFs {
    dir: &'static Dir<'static>,
}

impl BundleFs {
    /// View the whole embedded tree.
    pub fn new(root: &'static Dir<'static>) -> Self {
        Self { dir: root }
    }

    /// View the sub-tree of `root` at `prefix`.
    ///
    /// Fails with `NotFound` if `prefix` does not exist and with
    /// `NotADirectory` if it names a file.
    pub fn sub(root: &'static Dir<'static>, prefix: &str) -> Result<Self, Error> {
        let prefix = Path::parse(prefix)?;
        let bundle = Self::new(root);
        if prefix.is_empty() {
            return Ok(bundle);
        }

        match bundle.entry(&prefix) {
            Some(EmbeddedEntry::Dir(dir)) => Ok(Self { dir }),
            Some(EmbeddedEntry::File(_)) => Err(Error::NotADirectory { path: prefix }),
            None => Err(Error::NotFound { path: prefix }),
        }
    }

    /// Embedded entries are addressed by their path from the embedding root.
    fn embedded_path(&self, path: &Path) -> PathBuf {
        let mut full = self.dir.path().to_path_buf();
        for component in path.iter() {
            full.push(component);
        }
        full
    }

    fn entry(&self, path: &Path) -> Option<&'static EmbeddedEntry<'static>> {
        self.dir.get_entry(self.embedded_path(path))
    }

    fn entries_of(&self, dir: &Path) -> Result<&'static [EmbeddedEntry<'static>], Error> {
        if dir.is_empty() {
            return Ok(self.dir.entries());
        }
        match self.entry(dir) {
            Some(EmbeddedEntry::Dir(d)) => Ok(d.entries()),
            Some(EmbeddedEntry::File(_)) => Err(Error::NotADirectory { path: dir.clone() }),
            None => Err(Error::NotFound { path: dir.clone() }),
        }
    }
}

impl std::fmt::Debug for BundleFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleFs")
            .field("root", &self.dir.path())
            .finish()
    }
}

impl FileSource for BundleFs {
    fn open(&self, path: &Path) -> Result<Node, Error> {
        let name = match path.file_name() {
            Some(name) => name,
            None => return Ok(Node::dir(".")),
        };

        match self.entry(path) {
            Some(EmbeddedEntry::File(file)) => Ok(Node::File(NamedFile::new(
                name,
                Bytes::from_static(file.contents()),
                Mode::READ_ONLY,
            ))),
            Some(EmbeddedEntry::Dir(_)) => Ok(Node::dir(name)),
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, Error> {
        let mut entries: Vec<DirEntry> = self
            .entries_of(dir)?
            .iter()
            .filter_map(|entry| {
                let name = entry.path().file_name()?.to_str()?.to_string();
                Some(match entry {
                    EmbeddedEntry::Dir(_) => DirEntry::dir(name),
                    EmbeddedEntry::File(_) => DirEntry::file(name),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
