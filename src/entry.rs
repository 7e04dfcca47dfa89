use std::path::{Path, PathBuf};

/// A single item emitted by a traversal.
///
/// Entries are produced transiently and handed to the consumer; the engine
/// keeps no reference to them after emission. `path` is the root path joined
/// with every name listed on the way down, so it is absolute only when the
/// root was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// How deep in the traversal this entry was found. Root = 0.
    pub depth: usize,
}

impl Entry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// The kind of a traversed entry.
///
/// Determined without following symbolic links: a link to a directory is a
/// `Symlink`, and the traversal never descends through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    /// Map a `std::fs::FileType` (from `symlink_metadata`) onto an entry kind.
    pub fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else if ft.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}
