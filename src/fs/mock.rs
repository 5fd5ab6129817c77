use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::{DirChild, EntryKind};

use super::FileSystem;

/// One recorded call against the mock, in issue order. Tests assert on these
/// to check laziness and syscall counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FsCall {
    StatNoFollow(PathBuf),
    StatFollow(PathBuf),
    ReadDir(PathBuf),
}

#[derive(Clone, Debug)]
enum Response<T> {
    Ok(T),
    Err(io::ErrorKind),
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    stats: HashMap<PathBuf, Response<EntryKind>>,
    targets: HashMap<PathBuf, Response<EntryKind>>,
    listings: HashMap<PathBuf, Response<Vec<DirChild>>>,
    calls: Vec<FsCall>,
}

impl MockFileSystem {
    /// Register the no-dereference kind of `path`.
    pub fn set_entry(&self, path: impl Into<PathBuf>, kind: EntryKind) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.stats.insert(path.into(), Response::Ok(kind));
    }

    pub fn set_stat_error(&self, path: impl Into<PathBuf>, kind: io::ErrorKind) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.stats.insert(path.into(), Response::Err(kind));
    }

    /// Register the resolved target kind of a symlink at `path`.
    pub fn set_target(&self, path: impl Into<PathBuf>, kind: EntryKind) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.targets.insert(path.into(), Response::Ok(kind));
    }

    pub fn set_target_error(&self, path: impl Into<PathBuf>, kind: io::ErrorKind) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.targets.insert(path.into(), Response::Err(kind));
    }

    /// Register a directory listing. Also registers `dir` itself as a
    /// directory so single-path setups stay short.
    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, children: Vec<DirChild>) {
        let dir = dir.into();
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .stats
            .insert(dir.clone(), Response::Ok(EntryKind::Directory));
        inner.listings.insert(dir, Response::Ok(children));
    }

    pub fn set_dir_error(&self, dir: impl Into<PathBuf>, kind: io::ErrorKind) {
        let dir = dir.into();
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .stats
            .entry(dir.clone())
            .or_insert(Response::Ok(EntryKind::Directory));
        inner.listings.insert(dir, Response::Err(kind));
    }

    pub fn calls(&self) -> Vec<FsCall> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    pub fn read_dir_calls(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FsCall::ReadDir(path) => Some(path),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn stat_no_follow(&self, path: &Path) -> io::Result<EntryKind> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(FsCall::StatNoFollow(path.to_path_buf()));

        match inner.stats.get(path) {
            Some(Response::Ok(kind)) => Ok(*kind),
            Some(Response::Err(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    async fn stat_follow(&self, path: &Path) -> io::Result<EntryKind> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(FsCall::StatFollow(path.to_path_buf()));

        if let Some(response) = inner.targets.get(path) {
            return match response {
                Response::Ok(kind) => Ok(*kind),
                Response::Err(kind) => Err(io::Error::from(*kind)),
            };
        }
        // A non-symlink node resolves to itself.
        match inner.stats.get(path) {
            Some(Response::Ok(kind)) if *kind != EntryKind::Symlink => Ok(*kind),
            Some(Response::Err(kind)) => Err(io::Error::from(*kind)),
            _ => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirChild>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(FsCall::ReadDir(dir.to_path_buf()));

        match inner.listings.get(dir) {
            Some(Response::Ok(children)) => Ok(children.clone()),
            Some(Response::Err(kind)) => Err(io::Error::from(*kind)),
            None => match inner.stats.get(dir) {
                Some(Response::Ok(kind)) if *kind != EntryKind::Directory => {
                    Err(io::Error::from(io::ErrorKind::NotADirectory))
                }
                _ => Err(io::Error::from(io::ErrorKind::NotFound)),
            },
        }
    }
}
