use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures surfaced by a traversal, attributed to the path that caused them.
///
/// There are no retries: a filesystem error is reported at the exact position
/// in the output sequence where the affected path would have contributed, and
/// batches yielded before it remain valid.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("{}: no such file or directory", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: not a directory", path.display())]
    NotADirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: permission denied", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Follow-symlinks was requested but the link target is missing or the
    /// link chain is cyclic.
    #[error("{}: cannot resolve symbolic link", path.display())]
    SymlinkResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// Classify an io error raised while operating on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => WalkError::NotFound { path, source },
            io::ErrorKind::NotADirectory => WalkError::NotADirectory { path, source },
            io::ErrorKind::PermissionDenied => WalkError::PermissionDenied { path, source },
            _ => WalkError::Io { path, source },
        }
    }

    /// The path this error is attributed to.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::NotFound { path, .. }
            | WalkError::NotADirectory { path, .. }
            | WalkError::PermissionDenied { path, .. }
            | WalkError::SymlinkResolution { path, .. }
            | WalkError::Io { path, .. } => path,
        }
    }
}
