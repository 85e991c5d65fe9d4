//! File and directory node types shared by all layers.

use std::fmt;

use bytes::Bytes;

/// Unix permission bits of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mode(pub u32);

impl Mode {
    /// `rw-r--r--`, used for files written into an overlay.
    pub const FILE: Mode = Mode(0o644);

    /// `r--r--r--`, used for files in an embedded bundle.
    pub const READ_ONLY: Mode = Mode(0o444);

    /// `rwxr-xr-x`, used for directories.
    pub const DIR: Mode = Mode(0o755);

    /// The raw permission bits.
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::FILE
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// A regular file: a base name, its bytes, and permission bits.
///
/// Created once and never modified. Cloning is cheap since the content is
/// reference counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedFile {
    name: String,
    content: Bytes,
    mode: Mode,
}

impl NamedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            mode,
        }
    }

    /// Base name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The result of opening a path: either a file or a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    File(NamedFile),
    Dir { name: String, mode: Mode },
}

impl Node {
    /// A directory node; the root is named `.`.
    pub fn dir(name: impl Into<String>) -> Self {
        Node::Dir {
            name: name.into(),
            mode: Mode::DIR,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => file.name(),
            Node::Dir { name, .. } => name,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Node::File(file) => file.mode(),
            Node::Dir { mode, .. } => *mode,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn as_file(&self) -> Option<&NamedFile> {
        match self {
            Node::File(file) => Some(file),
            Node::Dir { .. } => None,
        }
    }

    pub fn into_file(self) -> Option<NamedFile> {
        match self {
            Node::File(file) => Some(file),
            Node::Dir { .. } => None,
        }
    }
}

/// Kind of a directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
}

/// One name in a directory listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}
