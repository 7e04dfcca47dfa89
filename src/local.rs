//! The real filesystem, through `std::fs` and `tokio::fs`.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::entry::EntryKind;
use crate::traits::{AsyncFileSystem, FileSystem};

/// Local filesystem backend.
///
/// Implements both [`FileSystem`] and [`AsyncFileSystem`]. Kinds come from
/// `symlink_metadata`, so symbolic links are reported as links and never
/// followed. Listings are returned in the order the OS produces them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = std::fs::symlink_metadata(path)?;
        Ok(EntryKind::from_file_type(meta.file_type()))
    }

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }
}

#[async_trait]
impl AsyncFileSystem for LocalFs {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = fs::symlink_metadata(path).await?;
        Ok(EntryKind::from_file_type(meta.file_type()))
    }

    async fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        let mut dir = fs::read_dir(path).await?;

        while let Some(entry) = dir.next_entry().await? {
            names.push(entry.file_name());
        }

        Ok(names)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path).await
    }
}
