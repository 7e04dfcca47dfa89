use std::collections::VecDeque;
use std::path::PathBuf;

use super::{expand, Op, Outcome, Step, Strategy};
use crate::entry::{Entry, EntryKind};
use crate::options::WalkOptions;

/// A directory on the current descent path.
struct Frame {
    dir: Entry,
    /// `None` until the directory has been listed.
    children: Option<VecDeque<PathBuf>>,
}

/// Post-order depth-first search over an explicit stack of frames.
///
/// The top frame is the directory being explored. A child directory gets
/// its own frame as soon as it is stat'ed; a directory is emitted when its
/// frame runs out of children, which is after everything beneath it.
#[derive(Default)]
pub(super) struct Dfs {
    frames: Vec<Frame>,
    ready: Option<Entry>,
}

impl Dfs {
    fn accept(&mut self, entry: Entry) {
        if entry.kind == EntryKind::Dir {
            self.frames.push(Frame {
                dir: entry,
                children: None,
            });
        } else {
            self.ready = Some(entry);
        }
    }
}

impl Strategy for Dfs {
    fn seed(&mut self, root: Entry) {
        self.accept(root);
    }

    fn advance(&mut self) -> Step {
        if let Some(entry) = self.ready.take() {
            return Step::Yield(entry);
        }

        let next = match self.frames.last_mut() {
            None => return Step::Done,
            Some(Frame { dir, children: None }) => return Step::Io(Op::List(dir.path.clone())),
            Some(Frame { children: Some(children), .. }) => children.pop_front(),
        };

        match next {
            Some(path) => Step::Io(Op::Stat(path)),
            None => match self.frames.pop() {
                Some(frame) => Step::Yield(frame.dir),
                None => Step::Done,
            },
        }
    }

    fn resolve(&mut self, op: Op, outcome: Outcome, options: &WalkOptions) {
        match outcome {
            Outcome::Stat(kind) => {
                let depth = self.frames.last().map_or(0, |f| f.dir.depth + 1);
                let entry = Entry {
                    path: op.into_path(),
                    kind,
                    depth,
                };
                self.accept(entry);
            }
            Outcome::List(names) => {
                let children = expand(op.path(), names, options);
                if let Some(frame) = self.frames.last_mut() {
                    frame.children = Some(children.into());
                }
            }
        }
    }
}
