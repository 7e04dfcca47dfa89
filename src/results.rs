use std::path::PathBuf;

use crate::entry::{Entry, EntryKind};

/// Every path under a root, bucketed by kind.
///
/// Within each bucket, paths keep the order in which the traversal emitted
/// them. Symbolic links and special files land in `others`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaddirResult {
    /// Regular files.
    pub files: Vec<PathBuf>,

    /// Directories, the root included when it is one.
    pub dirs: Vec<PathBuf>,

    /// Symbolic links, devices, pipes, sockets.
    pub others: Vec<PathBuf>,
}

impl ReaddirResult {
    pub(crate) fn push(&mut self, entry: Entry) {
        let bucket = match entry.kind {
            EntryKind::File => &mut self.files,
            EntryKind::Dir => &mut self.dirs,
            EntryKind::Symlink | EntryKind::Other => &mut self.others,
        };
        bucket.push(entry.path);
    }

    /// Total number of paths across all three buckets.
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
