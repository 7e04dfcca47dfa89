#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use deepwalk::{AsyncFileSystem, EntryKind, FileSystem};

// ---------------------------------------------------------------------------
// Real trees
// ---------------------------------------------------------------------------

/// A two-level tree: one file at the top, two in a subdirectory.
///
/// Structure:
/// ```
/// tmp/
///   root/
///     a.txt
///     sub/
///       b.txt
///       c.txt
/// ```
pub fn small_tree() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/b.txt"), "b").unwrap();
    fs::write(root.join("sub/c.txt"), "c").unwrap();
    (dir, root)
}

/// A wider tree with a `node_modules` directory and mixed extensions.
///
/// Structure:
/// ```
/// tmp/
///   project/
///     README.md
///     notes.txt
///     src/
///       main.rs
///       lib.rs
///       util/
///         strings.rs
///         todo.txt
///     node_modules/
///       left-pad/
///         index.js
///         notes.txt
///     empty/
/// ```
pub fn project_tree() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");

    fs::create_dir_all(root.join("src/util")).unwrap();
    fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();

    fs::write(root.join("README.md"), "# project").unwrap();
    fs::write(root.join("notes.txt"), "notes").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/lib.rs"), "").unwrap();
    fs::write(root.join("src/util/strings.rs"), "").unwrap();
    fs::write(root.join("src/util/todo.txt"), "").unwrap();
    fs::write(root.join("node_modules/left-pad/index.js"), "").unwrap();
    fs::write(root.join("node_modules/left-pad/notes.txt"), "").unwrap();

    (dir, root)
}

/// Every path under `root` (root included), via walkdir.
pub fn walkdir_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<_> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap().into_path())
        .collect();
    paths.sort();
    paths
}

pub fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

// ---------------------------------------------------------------------------
// In-memory tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Stat(PathBuf),
    List(PathBuf),
    RemoveFile(PathBuf),
    RemoveDir(PathBuf),
}

enum Node {
    File,
    Symlink,
    /// Child names in insertion order, which is also listing order.
    Dir(Vec<OsString>),
}

#[derive(Default)]
struct Inner {
    nodes: BTreeMap<PathBuf, Node>,
    failures: HashMap<PathBuf, io::ErrorKind>,
    calls: Vec<Call>,
}

/// An in-memory filesystem that records every call made against it.
///
/// `remove_dir` refuses non-empty directories, like the real thing.
#[derive(Default)]
pub struct MemoryFs {
    inner: Mutex<Inner>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(self, path: &str) -> Self {
        self.insert(path, Node::Dir(Vec::new()))
    }

    pub fn file(self, path: &str) -> Self {
        self.insert(path, Node::File)
    }

    pub fn symlink(self, path: &str) -> Self {
        self.insert(path, Node::Symlink)
    }

    /// Make every call against `path` fail with `kind`.
    pub fn fail_on(self, path: &str, kind: io::ErrorKind) -> Self {
        self.inner.lock().unwrap().failures.insert(PathBuf::from(path), kind);
        self
    }

    fn insert(self, path: &str, node: Node) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let path = PathBuf::from(path);
            if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
                if let Some(Node::Dir(children)) = inner.nodes.get_mut(parent) {
                    children.push(name.to_os_string());
                }
            }
            inner.nodes.insert(path, node);
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.inner.lock().unwrap().nodes.contains_key(Path::new(path))
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().nodes.len()
    }

    fn with<T>(&self, call: Call, path: &Path, f: impl FnOnce(&mut Inner) -> io::Result<T>) -> io::Result<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if let Some(kind) = inner.failures.get(path) {
            return Err(io::Error::from(*kind));
        }
        f(&mut inner)
    }

    fn detach(inner: &mut Inner, path: &Path) {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(Node::Dir(children)) = inner.nodes.get_mut(parent) {
                children.retain(|c| c != name);
            }
        }
    }
}

fn not_found() -> io::Error {
    io::Error::from(io::ErrorKind::NotFound)
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.with(Call::Stat(path.to_path_buf()), path, |inner| {
            match inner.nodes.get(path) {
                Some(Node::File) => Ok(EntryKind::File),
                Some(Node::Symlink) => Ok(EntryKind::Symlink),
                Some(Node::Dir(_)) => Ok(EntryKind::Dir),
                None => Err(not_found()),
            }
        })
    }

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.with(Call::List(path.to_path_buf()), path, |inner| {
            match inner.nodes.get(path) {
                Some(Node::Dir(children)) => Ok(children.clone()),
                Some(_) => Err(io::Error::other("not a directory")),
                None => Err(not_found()),
            }
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.with(Call::RemoveFile(path.to_path_buf()), path, |inner| {
            match inner.nodes.get(path) {
                Some(Node::Dir(_)) => Err(io::Error::other("is a directory")),
                Some(_) => {
                    inner.nodes.remove(path);
                    Self::detach(inner, path);
                    Ok(())
                }
                None => Err(not_found()),
            }
        })
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.with(Call::RemoveDir(path.to_path_buf()), path, |inner| {
            match inner.nodes.get(path) {
                Some(Node::Dir(children)) if children.is_empty() => {
                    inner.nodes.remove(path);
                    Self::detach(inner, path);
                    Ok(())
                }
                Some(Node::Dir(_)) => Err(io::Error::other("directory not empty")),
                Some(_) => Err(io::Error::other("not a directory")),
                None => Err(not_found()),
            }
        })
    }
}

#[async_trait]
impl AsyncFileSystem for MemoryFs {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        tokio::task::yield_now().await;
        FileSystem::stat(self, path)
    }

    async fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        tokio::task::yield_now().await;
        FileSystem::list(self, path)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        FileSystem::remove_file(self, path)
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        FileSystem::remove_dir(self, path)
    }
}

/// The two-level tree from `small_tree`, in memory.
pub fn small_memory_tree() -> MemoryFs {
    MemoryFs::new()
        .dir("root")
        .file("root/a.txt")
        .dir("root/sub")
        .file("root/sub/b.txt")
        .file("root/sub/c.txt")
}

/// Three levels, several directories per level, listed out of name order.
pub fn deep_memory_tree() -> MemoryFs {
    MemoryFs::new()
        .dir("r")
        .dir("r/z")
        .file("r/f1")
        .dir("r/a")
        .dir("r/z/y")
        .file("r/z/f2")
        .dir("r/a/b")
        .file("r/a/f3")
        .file("r/z/y/f4")
        .dir("r/a/b/c")
        .symlink("r/a/b/link")
        .file("r/a/b/c/f5")
}

pub fn strs(paths: impl IntoIterator<Item = PathBuf>) -> Vec<String> {
    paths
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}
