use std::collections::VecDeque;
use std::path::PathBuf;

use super::{expand, Op, Outcome, Step, Strategy};
use crate::entry::{Entry, EntryKind};
use crate::options::WalkOptions;

/// Breadth-first search over a FIFO queue of directories.
///
/// A directory is listed only once it reaches the front of the queue, and
/// its passing children are stat'ed and emitted in listing order, each child
/// directory joining the back of the queue as it is emitted.
#[derive(Default)]
pub(super) struct Bfs {
    /// Directories waiting to be listed, with their depth.
    queue: VecDeque<(PathBuf, usize)>,
    /// Children of the last listed directory still waiting for a stat.
    candidates: VecDeque<PathBuf>,
    /// Depth of every path in `candidates`.
    depth: usize,
    ready: Option<Entry>,
}

impl Bfs {
    fn accept(&mut self, entry: Entry) {
        if entry.kind == EntryKind::Dir {
            self.queue.push_back((entry.path.clone(), entry.depth));
        }
        self.ready = Some(entry);
    }
}

impl Strategy for Bfs {
    fn seed(&mut self, root: Entry) {
        self.accept(root);
    }

    fn advance(&mut self) -> Step {
        if let Some(entry) = self.ready.take() {
            return Step::Yield(entry);
        }

        if let Some(path) = self.candidates.pop_front() {
            return Step::Io(Op::Stat(path));
        }

        match self.queue.pop_front() {
            Some((dir, depth)) => {
                self.depth = depth + 1;
                Step::Io(Op::List(dir))
            }
            None => Step::Done,
        }
    }

    fn resolve(&mut self, op: Op, outcome: Outcome, options: &WalkOptions) {
        match outcome {
            Outcome::Stat(kind) => {
                let entry = Entry {
                    path: op.into_path(),
                    kind,
                    depth: self.depth,
                };
                self.accept(entry);
            }
            Outcome::List(names) => {
                self.candidates = expand(op.path(), names, options).into();
            }
        }
    }
}
