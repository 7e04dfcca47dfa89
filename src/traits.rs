use std::ffi::OsString;
use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::entry::EntryKind;

/// Blocking filesystem capability consumed by the traversal engine.
///
/// Implement this to walk anything shaped like a directory tree: the real
/// filesystem ([`LocalFs`](crate::LocalFs)), an in-memory tree, an archive.
/// The engine only ever calls these four primitives.
///
/// # Contract
///
/// - `stat` reports the kind of `path` without following a final symlink.
///   A missing path must fail with [`io::ErrorKind::NotFound`]; the engine
///   turns that into an empty traversal when it happens at the root.
/// - `list` returns child *names* (not paths), in whatever order the
///   backend produces them.
/// - `remove_dir` is only ever called on a directory whose children have all
///   been removed already.
pub trait FileSystem {
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Whether `path` exists. Errors other than `NotFound` are propagated.
    fn exists(&self, path: &Path) -> io::Result<bool> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).stat(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        (**self).remove_dir(path)
    }
}

/// Non-blocking counterpart of [`FileSystem`], with the same contract.
///
/// Each call is a suspension point: the walk hands control back to the
/// executor while the operation is in flight.
#[async_trait]
pub trait AsyncFileSystem: Send + Sync {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    async fn list(&self, path: &Path) -> io::Result<Vec<OsString>>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    async fn remove_dir(&self, path: &Path) -> io::Result<()>;

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        match self.stat(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<F: AsyncFileSystem + ?Sized> AsyncFileSystem for &F {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).stat(path).await
    }

    async fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path).await
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        (**self).remove_dir(path).await
    }
}
