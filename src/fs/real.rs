use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::task;

use crate::models::{DirChild, EntryKind};

use super::FileSystem;

pub struct RealFileSystem;

fn kind_of(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn stat_no_follow(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = tokio::fs::symlink_metadata(path).await?;
        Ok(kind_of(metadata.file_type()))
    }

    async fn stat_follow(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(kind_of(metadata.file_type()))
    }

    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirChild>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let mut children = Vec::new();
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                // file_type() is free on most platforms; fall back to an
                // untyped record when it is not available.
                let kind = entry.file_type().ok().map(kind_of);
                children.push(DirChild {
                    name: entry.file_name(),
                    kind,
                });
            }
            Ok(children)
        })
        .await
        .map_err(io::Error::other)?
    }
}
