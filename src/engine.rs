//! The traversal engine.
//!
//! Both search orders are written once, as state machines that never touch
//! the filesystem themselves. Each [`Engine::step`] either hands out an entry,
//! reports completion, or asks the driver to perform one filesystem
//! operation ([`Op`]). The driver performs it (blocking in
//! [`Walk`](crate::Walk), awaiting in [`WalkStream`](crate::WalkStream)) and
//! feeds the result back through [`Engine::complete`].
//!
//! All working state (the BFS queue, the DFS frame stack) lives on the heap,
//! so tree depth never turns into call-stack depth.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::entry::{Entry, EntryKind};
use crate::error::WalkError;
use crate::options::{SearchOrder, WalkOptions};
use crate::traits::{AsyncFileSystem, FileSystem};

mod bfs;
mod dfs;

use bfs::Bfs;
use dfs::Dfs;

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// A filesystem operation the engine needs performed before it can go on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Stat(PathBuf),
    List(PathBuf),
}

impl Op {
    pub fn path(&self) -> &Path {
        match self {
            Self::Stat(p) | Self::List(p) => p,
        }
    }

    fn into_path(self) -> PathBuf {
        match self {
            Self::Stat(p) | Self::List(p) => p,
        }
    }

    /// Perform the operation, blocking the calling thread.
    pub fn run<F: FileSystem>(&self, fs: &F) -> io::Result<Outcome> {
        match self {
            Self::Stat(p) => fs.stat(p).map(Outcome::Stat),
            Self::List(p) => fs.list(p).map(Outcome::List),
        }
    }

    /// Perform the operation as a suspension point.
    pub async fn run_async<F: AsyncFileSystem>(&self, fs: &F) -> io::Result<Outcome> {
        match self {
            Self::Stat(p) => fs.stat(p).await.map(Outcome::Stat),
            Self::List(p) => fs.list(p).await.map(Outcome::List),
        }
    }
}

/// The successful result of an [`Op`].
#[derive(Debug)]
pub(crate) enum Outcome {
    Stat(EntryKind),
    List(Vec<OsString>),
}

/// What the driver should do next.
#[derive(Debug)]
pub(crate) enum Step {
    /// Perform this operation, then call [`Engine::complete`].
    Io(Op),
    /// Hand this entry to the consumer.
    Yield(Entry),
    /// The traversal is over.
    Done,
}

// ---------------------------------------------------------------------------
// Search strategies
// ---------------------------------------------------------------------------

/// The part of a traversal that differs between search orders.
///
/// The engine handles the root (filtering, the missing-root case) and only
/// then seeds the strategy with it.
trait Strategy {
    /// Take over the stat'ed root entry.
    fn seed(&mut self, root: Entry);

    /// Next request or emission. Only called when no request is in flight.
    fn advance(&mut self) -> Step;

    /// Feed back the result of the last request returned by `advance`.
    fn resolve(&mut self, op: Op, outcome: Outcome, options: &WalkOptions);
}

enum Search {
    Bfs(Bfs),
    Dfs(Dfs),
}

impl Search {
    fn new(order: SearchOrder) -> Self {
        match order {
            SearchOrder::Bfs => Self::Bfs(Bfs::default()),
            SearchOrder::Dfs => Self::Dfs(Dfs::default()),
        }
    }

    fn as_strategy(&mut self) -> &mut dyn Strategy {
        match self {
            Self::Bfs(s) => s,
            Self::Dfs(s) => s,
        }
    }
}

/// Whether a failed root stat means there is simply nothing to walk.
///
/// Besides `NotFound`, a path running through a regular file
/// (`a.txt/child`) cannot exist either, and reports `NotADirectory`.
pub(crate) fn is_missing_root(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

/// Children of `dir` that survive sorting and filtering, as full paths.
fn expand(dir: &Path, mut names: Vec<OsString>, options: &WalkOptions) -> Vec<PathBuf> {
    options.sort(&mut names);
    names
        .into_iter()
        .map(|name| dir.join(name))
        .filter(|path| {
            let keep = options.passes(path);
            if !keep {
                trace!(path = %path.display(), "filtered out");
            }
            keep
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

enum State {
    /// Root not requested yet.
    Start(PathBuf),
    /// Root stat in flight.
    Root,
    Running,
    Done,
}

/// One traversal's complete working state. Single-pass: once `Done`, it
/// stays done.
pub(crate) struct Engine {
    options:   WalkOptions,
    search:    Search,
    state:     State,
    in_flight: Option<Op>,
    emitted:   usize,
}

impl Engine {
    pub fn new(root: PathBuf, options: &WalkOptions) -> Self {
        debug!(root = %root.display(), order = ?options.search_order(), "traversal started");
        Self {
            search:    Search::new(options.search_order()),
            options:   options.clone(),
            state:     State::Start(root),
            in_flight: None,
            emitted:   0,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Advance the traversal.
    ///
    /// While a request is in flight, the same request is returned again.
    /// A driver that dropped an unfinished async step simply re-issues it.
    pub fn step(&mut self) -> Step {
        if self.is_done() {
            return Step::Done;
        }
        if let Some(op) = &self.in_flight {
            return Step::Io(op.clone());
        }

        let step = match std::mem::replace(&mut self.state, State::Running) {
            State::Start(root) => {
                if !self.options.passes(&root) {
                    trace!(root = %root.display(), "root filtered out");
                    Step::Done
                } else {
                    self.state = State::Root;
                    Step::Io(Op::Stat(root))
                }
            }
            State::Running => self.search.as_strategy().advance(),
            State::Root | State::Done => Step::Done,
        };

        match &step {
            Step::Io(op) => {
                trace!(?op, "request");
                self.in_flight = Some(op.clone());
            }
            Step::Done => self.finish(),
            Step::Yield(_) => self.emitted += 1,
        }
        step
    }

    /// Feed back the result of the request last returned by [`step`](Self::step).
    ///
    /// A missing root ends the traversal quietly. Any other failure ends it
    /// and is returned to the caller.
    pub fn complete(&mut self, result: io::Result<Outcome>) -> Result<(), WalkError> {
        let Some(op) = self.in_flight.take() else {
            return Ok(());
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                let at_root = matches!(self.state, State::Root);
                if at_root && is_missing_root(&err) {
                    trace!(root = %op.path().display(), "root does not exist");
                    self.finish();
                    return Ok(());
                }
                self.state = State::Done;
                debug!(path = %op.path().display(), error = %err, "traversal failed");
                return Err(WalkError::from_io(op.path(), err));
            }
        };

        match self.state {
            State::Root => {
                if let Outcome::Stat(kind) = outcome {
                    let root = Entry {
                        path: op.into_path(),
                        kind,
                        depth: 0,
                    };
                    self.search.as_strategy().seed(root);
                }
                self.state = State::Running;
            }
            State::Running => self.search.as_strategy().resolve(op, outcome, &self.options),
            State::Start(_) | State::Done => {}
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.state = State::Done;
        debug!(entries = self.emitted, "traversal finished");
    }
}
