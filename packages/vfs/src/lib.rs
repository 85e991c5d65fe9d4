//! Virtual filesystem layers for serving a bundled web UI.
//!
//! Everything here is read through one trait, [`FileSource`]:
//! - [`MemFs`]: a small writable in-memory tree, filled once and then only read
//! - [`BundleFs`]: a `'static` directory tree embedded with `include_dir`
//! - [`MergedFs`]: a union of two sources where the upper one always wins
//!
//! Paths are [`Path`] values: slash-separated, relative, and unable to
//! escape the root they are resolved against.
//!
//! # Example
//!
//! ```rust
//! use swaggerui_vfs::{FileSource, MemFs, MergedFs, Mode, path};
//!
//! let mut overlay = MemFs::new();
//! overlay.put(&path!("swagger.yaml"), "openapi: 3.0.0", Mode::FILE).unwrap();
//!
//! let merged = MergedFs::new(overlay, MemFs::new());
//! assert!(merged.open(&path!("swagger.yaml")).unwrap().is_file());
//! ```

pub use bytes::Bytes;

mod bundle_fs;
mod error;
mod file;
mod mem_fs;
mod merged_fs;
mod path;
mod path_trie;
mod traits;

pub use bundle_fs::BundleFs;
pub use error::Error;
pub use file::{DirEntry, EntryKind, Mode, NamedFile, Node};
pub use mem_fs::MemFs;
pub use merged_fs::MergedFs;
pub use path::{Path, PathError};
pub use path_trie::{PathTrie, PathTrieIter};
pub use traits::FileSource;
