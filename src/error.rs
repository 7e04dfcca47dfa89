use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Config
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl WalkError {
    /// Wrap a failed filesystem call made against `path`.
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Failed: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p) | Self::Io { path: p, .. } => Some(p),
            Self::InvalidPattern(_) => None,
        }
    }

    /// Whether the underlying filesystem reported the path as missing.
    ///
    /// A missing traversal root is not an error; this only shows up when an
    /// entry vanished between being listed and being stat'ed or removed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
