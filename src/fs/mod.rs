mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::{FsCall, MockFileSystem};

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::WalkError;
use crate::models::{DirChild, Entry, EntryKind};

/// The two OS primitives the traversal core consumes, plus the following
/// stat variant needed by the follow-symlinks policy.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Classify the node at `path` without dereferencing symlinks.
    async fn stat_no_follow(&self, path: &Path) -> io::Result<EntryKind>;

    /// Classify the target `path` ultimately points at. Fails when the
    /// target is missing or the link chain is cyclic.
    async fn stat_follow(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the children of `dir`. Kind hints are optional per record.
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirChild>>;
}

/// Resolve a path to an [`Entry`] with a no-dereference stat.
pub async fn resolve<F>(fs: &F, path: PathBuf) -> Result<Entry, WalkError>
where
    F: FileSystem + ?Sized,
{
    match fs.stat_no_follow(&path).await {
        Ok(kind) => Ok(Entry::new(path, kind)),
        Err(source) => Err(WalkError::from_io(path, source)),
    }
}
