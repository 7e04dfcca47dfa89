//! # deepwalk
//!
//! Directory-tree traversal: breadth-first or post-order depth-first, blocking
//! or async, with regex include/exclude filters and an optional sibling order.
//!
//! deepwalk owns the traversal engine, the filter, and a few operations built
//! on top of it ([`readdir_deep`], [`map_path`], [`delete_deep`]). It does
//! **not** own filesystem access: the engine consumes a [`FileSystem`] or
//! [`AsyncFileSystem`] capability. [`LocalFs`] is the real filesystem, and the
//! crate-level functions use it.
//!
//! # Quick Start
//!
//! ```rust
//! use deepwalk::{EntryKind, SearchOrder};
//!
//! let opts = deepwalk::options()
//!     .exclude("node_modules|target")
//!     .order(|a, b| a.cmp(b))
//!     .search_order(SearchOrder::Bfs)
//!     .build()
//!     .unwrap();
//!
//! for entry in deepwalk::walk_sync("src", &opts) {
//!     let entry = entry.unwrap();
//!     if entry.kind == EntryKind::File {
//!         println!("{} (depth {})", entry.path.display(), entry.depth);
//!     }
//! }
//! ```
//!
//! # Ordering
//!
//! - [`SearchOrder::Bfs`] (default): the root, then every entry at depth 1,
//!   then depth 2, and so on.
//! - [`SearchOrder::Dfs`]: post-order. Every entry comes before its parent
//!   directory and the root comes last, which is what [`delete_deep`] needs.
//!
//! Within a directory, children follow the filesystem's listing order unless
//! a comparator is set with [`OptionsBuilder::order`].
//!
//! # Filtering
//!
//! Every candidate path, the root included, is tested before it is stat'ed:
//! a path matching `exclude`, or not matching `include`, is skipped along
//! with everything beneath it.
//!
//! # Custom filesystems
//!
//! Implement [`FileSystem`] or [`AsyncFileSystem`] and wrap it in a
//! [`Walker`]:
//!
//! ```rust
//! use std::ffi::OsString;
//! use std::io;
//! use std::path::Path;
//! use deepwalk::{EntryKind, FileSystem, Walker, WalkOptions};
//!
//! /// A single empty directory.
//! struct Empty;
//!
//! impl FileSystem for Empty {
//!     fn stat(&self, _path: &Path) -> io::Result<EntryKind> { Ok(EntryKind::Dir) }
//!     fn list(&self, _path: &Path) -> io::Result<Vec<OsString>> { Ok(Vec::new()) }
//!     fn remove_file(&self, _path: &Path) -> io::Result<()> { Ok(()) }
//!     fn remove_dir(&self, _path: &Path) -> io::Result<()> { Ok(()) }
//! }
//!
//! let walker = Walker::new(Empty);
//! let paths: Vec<_> = walker.walk_sync("/", &WalkOptions::default()).collect();
//! assert_eq!(paths.len(), 1);
//! ```

#![forbid(unsafe_code)]

mod aggregate;
mod builder;
mod engine;
mod entry;
mod error;
mod filter;
mod local;
mod options;
mod results;
mod traits;
mod walk;
mod walker;

use std::future::Future;
use std::path::Path;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::OptionsBuilder;
pub use entry::{Entry, EntryKind};
pub use error::WalkError;
pub use filter::Filter;
pub use local::LocalFs;
pub use options::{OrderFn, SearchOrder, WalkOptions};
pub use results::ReaddirResult;
pub use traits::{AsyncFileSystem, FileSystem};
pub use walk::{Walk, WalkStream};
pub use walker::Walker;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`OptionsBuilder`] to configure a traversal.
///
/// # Example
///
/// ```rust
/// let opts = deepwalk::options().include(r"\.txt$").dfs().build().unwrap();
/// assert!(opts.passes(std::path::Path::new("notes.txt")));
/// ```
pub fn options() -> OptionsBuilder {
    OptionsBuilder::default()
}

/// Lazily traverse `root` on the local filesystem, blocking.
///
/// A missing root yields nothing.
///
/// ```rust
/// let opts = deepwalk::WalkOptions::default();
/// assert_eq!(deepwalk::walk_sync("./does-not-exist", &opts).count(), 0);
/// ```
pub fn walk_sync(root: impl AsRef<Path>, options: &WalkOptions) -> Walk<LocalFs> {
    Walk::new(LocalFs, root.as_ref(), options)
}

/// Lazily traverse `root` on the local filesystem, async.
pub fn walk(root: impl AsRef<Path>, options: &WalkOptions) -> WalkStream<LocalFs> {
    WalkStream::new(LocalFs, root.as_ref(), options)
}

/// Collect every path under `root`, bucketed into files, dirs and others.
pub fn readdir_deep_sync(
    root: impl AsRef<Path>,
    options: &WalkOptions,
) -> Result<ReaddirResult, WalkError> {
    aggregate::readdir_deep_sync(LocalFs, root.as_ref(), options)
}

/// Async form of [`readdir_deep_sync`].
pub async fn readdir_deep(
    root: impl AsRef<Path>,
    options: &WalkOptions,
) -> Result<ReaddirResult, WalkError> {
    aggregate::readdir_deep(LocalFs, root.as_ref(), options).await
}

/// Apply `f` to every entry under `root`, in emission order.
pub fn map_path_sync<M, R>(
    root: impl AsRef<Path>,
    f: M,
    options: &WalkOptions,
) -> Result<Vec<R>, WalkError>
where
    M: FnMut(&Entry) -> R,
{
    aggregate::map_path_sync(LocalFs, root.as_ref(), f, options)
}

/// Async form of [`map_path_sync`]. Each `f(entry)` future starts as its
/// entry is emitted; outputs are returned in emission order.
pub async fn map_path<M, Fut, R>(
    root: impl AsRef<Path>,
    f: M,
    options: &WalkOptions,
) -> Result<Vec<R>, WalkError>
where
    M: FnMut(Entry) -> Fut,
    Fut: Future<Output = R>,
{
    aggregate::map_path(LocalFs, root.as_ref(), f, options).await
}

/// Remove `root` and everything beneath it, children first.
///
/// A missing root is a no-op. Symbolic links are removed, never followed.
/// There is no rollback: a failure leaves whatever was already removed gone.
pub fn delete_deep_sync(root: impl AsRef<Path>) -> Result<(), WalkError> {
    aggregate::delete_deep_sync(LocalFs, root.as_ref())
}

/// Async form of [`delete_deep_sync`].
pub async fn delete_deep(root: impl AsRef<Path>) -> Result<(), WalkError> {
    aggregate::delete_deep(LocalFs, root.as_ref()).await
}

/// Call `callback` for every entry under `root`, children before parents.
#[deprecated(note = "use `walk_sync` with `SearchOrder::Dfs`")]
pub fn for_each_path_sync<C>(
    root: impl AsRef<Path>,
    callback: C,
    options: &WalkOptions,
) -> Result<(), WalkError>
where
    C: FnMut(&Entry),
{
    aggregate::for_each_path_sync(LocalFs, root.as_ref(), callback, options)
}

/// Async form of [`for_each_path_sync`]. Sibling subtrees are visited
/// concurrently; a directory's callback runs after all of its descendants'.
#[deprecated(note = "use `walk` with `SearchOrder::Dfs`")]
pub async fn for_each_path<C, Fut>(
    root: impl AsRef<Path>,
    callback: C,
    options: &WalkOptions,
) -> Result<(), WalkError>
where
    C: Fn(Entry) -> Fut + Sync,
    Fut: Future<Output = ()> + Send,
{
    aggregate::for_each_path(LocalFs, root.as_ref(), callback, options).await
}
