use std::future::Future;
use std::path::Path;

use crate::aggregate;
use crate::entry::Entry;
use crate::error::WalkError;
use crate::options::WalkOptions;
use crate::results::ReaddirResult;
use crate::traits::{AsyncFileSystem, FileSystem};
use crate::walk::{Walk, WalkStream};

/// Every traversal operation, bound to one filesystem capability.
///
/// The crate-level functions ([`walk_sync`](crate::walk_sync),
/// [`readdir_deep`](crate::readdir_deep), ...) are shorthands for a
/// `Walker<LocalFs>`. Build your own `Walker` to traverse anything else that
/// implements [`FileSystem`] (blocking methods, `*_sync`) or
/// [`AsyncFileSystem`] (async methods).
///
/// # Example
///
/// ```rust
/// use deepwalk::{LocalFs, Walker, WalkOptions};
///
/// let walker = Walker::new(LocalFs);
/// let result = walker
///     .readdir_deep_sync("./does-not-exist", &WalkOptions::default())
///     .unwrap();
/// assert!(result.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Walker<F> {
    fs: F,
}

impl<F> Walker<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn into_inner(self) -> F {
        self.fs
    }
}

// ── Blocking ──────────────────────────────────────────────────────────────

impl<F: FileSystem> Walker<F> {
    /// Lazily traverse `root`. See [`Walk`].
    pub fn walk_sync(&self, root: impl AsRef<Path>, options: &WalkOptions) -> Walk<&F> {
        Walk::new(&self.fs, root.as_ref(), options)
    }

    /// Collect every path under `root`, bucketed by kind.
    pub fn readdir_deep_sync(
        &self,
        root: impl AsRef<Path>,
        options: &WalkOptions,
    ) -> Result<ReaddirResult, WalkError> {
        aggregate::readdir_deep_sync(&self.fs, root.as_ref(), options)
    }

    /// Apply `f` to every entry, collecting the results in emission order.
    pub fn map_path_sync<M, R>(
        &self,
        root: impl AsRef<Path>,
        f: M,
        options: &WalkOptions,
    ) -> Result<Vec<R>, WalkError>
    where
        M: FnMut(&Entry) -> R,
    {
        aggregate::map_path_sync(&self.fs, root.as_ref(), f, options)
    }

    /// Remove `root` and everything beneath it. A missing root is a no-op.
    ///
    /// Entries are removed children-first, so a directory is only removed
    /// once it is empty. A failure stops the deletion where it is.
    pub fn delete_deep_sync(&self, root: impl AsRef<Path>) -> Result<(), WalkError> {
        aggregate::delete_deep_sync(&self.fs, root.as_ref())
    }

    #[deprecated(note = "use `walk_sync` with `SearchOrder::Dfs`")]
    pub fn for_each_path_sync<C>(
        &self,
        root: impl AsRef<Path>,
        callback: C,
        options: &WalkOptions,
    ) -> Result<(), WalkError>
    where
        C: FnMut(&Entry),
    {
        aggregate::for_each_path_sync(&self.fs, root.as_ref(), callback, options)
    }
}

// ── Non-blocking ──────────────────────────────────────────────────────────

impl<F: AsyncFileSystem> Walker<F> {
    /// Lazily traverse `root`. See [`WalkStream`].
    pub fn walk(&self, root: impl AsRef<Path>, options: &WalkOptions) -> WalkStream<&F> {
        WalkStream::new(&self.fs, root.as_ref(), options)
    }

    pub async fn readdir_deep(
        &self,
        root: impl AsRef<Path>,
        options: &WalkOptions,
    ) -> Result<ReaddirResult, WalkError> {
        aggregate::readdir_deep(&self.fs, root.as_ref(), options).await
    }

    /// Start `f(entry)` for every entry as it is emitted; the futures run
    /// concurrently and their outputs come back in emission order.
    pub async fn map_path<M, Fut, R>(
        &self,
        root: impl AsRef<Path>,
        f: M,
        options: &WalkOptions,
    ) -> Result<Vec<R>, WalkError>
    where
        M: FnMut(Entry) -> Fut,
        Fut: Future<Output = R>,
    {
        aggregate::map_path(&self.fs, root.as_ref(), f, options).await
    }

    pub async fn delete_deep(&self, root: impl AsRef<Path>) -> Result<(), WalkError> {
        aggregate::delete_deep(&self.fs, root.as_ref()).await
    }

    /// Legacy callback walk. Sibling subtrees are visited concurrently; a
    /// directory's callback runs after all of its descendants' callbacks.
    #[deprecated(note = "use `walk` with `SearchOrder::Dfs`")]
    pub async fn for_each_path<C, Fut>(
        &self,
        root: impl AsRef<Path>,
        callback: C,
        options: &WalkOptions,
    ) -> Result<(), WalkError>
    where
        C: Fn(Entry) -> Fut + Sync,
        Fut: Future<Output = ()> + Send,
    {
        aggregate::for_each_path(&self.fs, root.as_ref(), callback, options).await
    }
}
