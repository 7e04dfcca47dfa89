use std::iter::FusedIterator;
use std::path::PathBuf;

use futures::stream::{self, Stream};

use crate::engine::{Engine, Step};
use crate::entry::Entry;
use crate::error::WalkError;
use crate::options::WalkOptions;
use crate::traits::{AsyncFileSystem, FileSystem};

// ---------------------------------------------------------------------------
// Walk (blocking)
// ---------------------------------------------------------------------------

/// A lazy, single-pass, blocking traversal.
///
/// Each call to `next()` performs just enough filesystem work to produce
/// one entry. Dropping the iterator abandons the traversal; nothing needs
/// cleaning up. After the first `Err`, the iterator is exhausted.
///
/// Created by [`walk_sync`](crate::walk_sync) or
/// [`Walker::walk_sync`](crate::Walker::walk_sync).
pub struct Walk<F> {
    fs:     F,
    engine: Engine,
}

impl<F: FileSystem> Walk<F> {
    pub(crate) fn new(fs: F, root: impl Into<PathBuf>, options: &WalkOptions) -> Self {
        Self {
            fs,
            engine: Engine::new(root.into(), options),
        }
    }
}

impl<F: FileSystem> Iterator for Walk<F> {
    type Item = Result<Entry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.engine.is_done() {
            return None;
        }
        loop {
            match self.engine.step() {
                Step::Io(op) => {
                    let result = op.run(&self.fs);
                    if let Err(e) = self.engine.complete(result) {
                        return Some(Err(e));
                    }
                }
                Step::Yield(entry) => return Some(Ok(entry)),
                Step::Done => return None,
            }
        }
    }
}

impl<F: FileSystem> FusedIterator for Walk<F> {}

// ---------------------------------------------------------------------------
// WalkStream (non-blocking)
// ---------------------------------------------------------------------------

/// A lazy, single-pass, non-blocking traversal.
///
/// Pull entries with [`next()`](WalkStream::next), or turn it into a
/// [`Stream`] with [`into_stream()`](WalkStream::into_stream). Exactly one
/// filesystem operation is in flight at a time, so emission order is the
/// same as the blocking [`Walk`] over the same tree.
///
/// A `next()` future may be dropped before it resolves; the interrupted
/// operation is issued again on the following call.
pub struct WalkStream<F> {
    fs:     F,
    engine: Engine,
}

impl<F: AsyncFileSystem> WalkStream<F> {
    pub(crate) fn new(fs: F, root: impl Into<PathBuf>, options: &WalkOptions) -> Self {
        Self {
            fs,
            engine: Engine::new(root.into(), options),
        }
    }

    /// The next entry, `None` once the traversal is over.
    pub async fn next(&mut self) -> Option<Result<Entry, WalkError>> {
        if self.engine.is_done() {
            return None;
        }
        loop {
            match self.engine.step() {
                Step::Io(op) => {
                    let result = op.run_async(&self.fs).await;
                    if let Err(e) = self.engine.complete(result) {
                        return Some(Err(e));
                    }
                }
                Step::Yield(entry) => return Some(Ok(entry)),
                Step::Done => return None,
            }
        }
    }

    /// Drain the traversal, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<Entry>, WalkError> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next().await {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// Adapt into a [`futures::Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<Entry, WalkError>> {
        stream::unfold(self, |mut walk| async move {
            let item = walk.next().await?;
            Some((item, walk))
        })
    }
}
