//! Operations built on top of a traversal: collect, map, delete, and the
//! legacy callback walk.

use std::future::Future;
use std::path::{Path, PathBuf};

use futures::future::{self, BoxFuture, Either, FutureExt};
use futures::stream::{FuturesOrdered, StreamExt};
use tracing::{debug, trace};

use crate::engine::is_missing_root;
use crate::entry::{Entry, EntryKind};
use crate::error::WalkError;
use crate::options::{SearchOrder, WalkOptions};
use crate::results::ReaddirResult;
use crate::traits::{AsyncFileSystem, FileSystem};
use crate::walk::{Walk, WalkStream};

// ---------------------------------------------------------------------------
// readdir_deep
// ---------------------------------------------------------------------------

#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) fn readdir_deep_sync<F: FileSystem>(
    fs: F,
    root: &Path,
    options: &WalkOptions,
) -> Result<ReaddirResult, WalkError> {
    let mut result = ReaddirResult::default();
    for entry in Walk::new(fs, root, options) {
        result.push(entry?);
    }
    debug!(files = result.files.len(), dirs = result.dirs.len(), others = result.others.len(), "collected");
    Ok(result)
}

#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) async fn readdir_deep<F: AsyncFileSystem>(
    fs: F,
    root: &Path,
    options: &WalkOptions,
) -> Result<ReaddirResult, WalkError> {
    let mut result = ReaddirResult::default();
    let mut walk = WalkStream::new(fs, root, options);
    while let Some(entry) = walk.next().await {
        result.push(entry?);
    }
    debug!(files = result.files.len(), dirs = result.dirs.len(), others = result.others.len(), "collected");
    Ok(result)
}

// ---------------------------------------------------------------------------
// map_path
// ---------------------------------------------------------------------------

#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) fn map_path_sync<F, M, R>(
    fs: F,
    root: &Path,
    mut f: M,
    options: &WalkOptions,
) -> Result<Vec<R>, WalkError>
where
    F: FileSystem,
    M: FnMut(&Entry) -> R,
{
    Walk::new(fs, root, options)
        .map(|entry| entry.map(|e| f(&e)))
        .collect()
}

/// Each entry's future is started as soon as the entry is emitted and runs
/// alongside the rest of the traversal. Results come back in emission order.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) async fn map_path<F, M, Fut, R>(
    fs: F,
    root: &Path,
    mut f: M,
    options: &WalkOptions,
) -> Result<Vec<R>, WalkError>
where
    F: AsyncFileSystem,
    M: FnMut(Entry) -> Fut,
    Fut: Future<Output = R>,
{
    let mut walk = WalkStream::new(fs, root, options);
    let mut pending = FuturesOrdered::new();
    let mut results = Vec::new();

    loop {
        let step = walk.next();
        futures::pin_mut!(step);

        // Poll dispatched callbacks while the next entry is being produced.
        let item = loop {
            if pending.is_empty() {
                break step.as_mut().await;
            }
            match future::select(step.as_mut(), pending.next()).await {
                Either::Left((item, _)) => break item,
                Either::Right((Some(value), _)) => results.push(value),
                Either::Right((None, _)) => {}
            }
        };

        match item {
            Some(Ok(entry)) => pending.push_back(f(entry)),
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }

    results.extend(pending.collect::<Vec<_>>().await);
    debug!(count = results.len(), "mapped");
    Ok(results)
}

// ---------------------------------------------------------------------------
// delete_deep
// ---------------------------------------------------------------------------

/// Unfiltered post-order: a directory is only reached after everything in it.
fn delete_options() -> WalkOptions {
    WalkOptions::default().with_search_order(SearchOrder::Dfs)
}

#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) fn delete_deep_sync<F: FileSystem>(fs: F, root: &Path) -> Result<(), WalkError> {
    let mut removed = 0usize;
    for entry in Walk::new(&fs, root, &delete_options()) {
        let entry = entry?;
        trace!(path = %entry.path.display(), kind = ?entry.kind, "remove");
        let result = match entry.kind {
            EntryKind::Dir => fs.remove_dir(&entry.path),
            _ => fs.remove_file(&entry.path),
        };
        result.map_err(|e| WalkError::from_io(&entry.path, e))?;
        removed += 1;
    }
    debug!(removed, "deleted");
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) async fn delete_deep<F: AsyncFileSystem>(fs: F, root: &Path) -> Result<(), WalkError> {
    let mut removed = 0usize;
    let mut walk = WalkStream::new(&fs, root, &delete_options());
    while let Some(entry) = walk.next().await {
        let entry = entry?;
        trace!(path = %entry.path.display(), kind = ?entry.kind, "remove");
        let result = match entry.kind {
            EntryKind::Dir => fs.remove_dir(&entry.path).await,
            _ => fs.remove_file(&entry.path).await,
        };
        result.map_err(|e| WalkError::from_io(&entry.path, e))?;
        removed += 1;
    }
    debug!(removed, "deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// for_each_path (legacy)
// ---------------------------------------------------------------------------

/// The legacy eager walk: post-order, root filtered like everything else.
/// Any configured search order is ignored.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) fn for_each_path_sync<F, C>(
    fs: F,
    root: &Path,
    mut callback: C,
    options: &WalkOptions,
) -> Result<(), WalkError>
where
    F: FileSystem,
    C: FnMut(&Entry),
{
    let options = options.with_search_order(SearchOrder::Dfs);
    for entry in Walk::new(fs, root, &options) {
        callback(&entry?);
    }
    Ok(())
}

/// Siblings are visited concurrently, in no particular relative order. A
/// directory's callback runs only after the callbacks of everything
/// beneath it have completed.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub(crate) async fn for_each_path<F, C, Fut>(
    fs: F,
    root: &Path,
    callback: C,
    options: &WalkOptions,
) -> Result<(), WalkError>
where
    F: AsyncFileSystem,
    C: Fn(Entry) -> Fut + Sync,
    Fut: Future<Output = ()> + Send,
{
    visit(&fs, root.to_path_buf(), 0, options, &callback).await
}

fn visit<'a, F, C, Fut>(
    fs: &'a F,
    path: PathBuf,
    depth: usize,
    options: &'a WalkOptions,
    callback: &'a C,
) -> BoxFuture<'a, Result<(), WalkError>>
where
    F: AsyncFileSystem,
    C: Fn(Entry) -> Fut + Sync,
    Fut: Future<Output = ()> + Send + 'a,
{
    async move {
        if !options.passes(&path) {
            return Ok(());
        }

        let kind = match fs.stat(&path).await {
            Ok(kind) => kind,
            Err(e) if depth == 0 && is_missing_root(&e) => return Ok(()),
            Err(e) => return Err(WalkError::from_io(&path, e)),
        };

        if kind == EntryKind::Dir {
            let mut names = fs.list(&path).await.map_err(|e| WalkError::from_io(&path, e))?;
            options.sort(&mut names);
            let children = names
                .into_iter()
                .map(|name| visit(fs, path.join(name), depth + 1, options, callback));
            future::try_join_all(children).await?;
        }

        callback(Entry { path, kind, depth }).await;
        Ok(())
    }
    .boxed()
}
