//! Recursively enumerate filesystem subtrees and group the resulting files by
//! their containing directory, one lazily produced batch per directory.
//!
//! [`files_by_directory`] is the path-oriented entry point: it deduplicates
//! overlapping input paths, resolves each survivor, walks directories
//! recursively, and yields each directory's files as one batch of paths as
//! soon as that directory's listing is known. The consumer pulls batches one
//! at a time via [`seq::Sequence`]; no filesystem call happens before the
//! pull that needs it, and dropping the sequence cancels all remaining work.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dirbatch::seq::Sequence;
//!
//! # async fn demo() -> Result<(), dirbatch::WalkError> {
//! let fs = Arc::new(dirbatch::fs::RealFileSystem);
//! let mut batches =
//!     dirbatch::files_by_directory(fs, ["./fixtures"], dirbatch::WalkOptions::default());
//! while let Some(batch) = batches.next().await {
//!     for path in batch? {
//!         println!("{}", path.display());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod fs;
pub mod models;
pub mod seq;

use std::path::PathBuf;
use std::sync::Arc;

pub use crate::core::{Batch, WalkOptions, Walker};
pub use crate::error::WalkError;
pub use crate::models::{DirChild, Entry, EntryKind};

use crate::fs::FileSystem;
use crate::seq::Sequence;

/// Traverse `paths` and yield one batch of file paths per directory.
///
/// Duplicate inputs and inputs that are descendants of another input are
/// dropped first, so `[p, p]` and `[a, a/b]` both traverse like their
/// single-path equivalents. Loose file inputs sharing a parent directory are
/// grouped into one batch per distinct parent after all inputs have been
/// classified; directory inputs stream their batches immediately. A failure
/// on one input surfaces at the position that input would have contributed
/// and ends the sequence; batches already yielded stay valid.
pub fn files_by_directory<F, I, P>(
    fs: Arc<F>,
    paths: I,
    options: WalkOptions,
) -> impl Sequence<Item = Result<Vec<PathBuf>, WalkError>>
where
    F: FileSystem + 'static,
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
    let roots = crate::core::select_unique_non_descendant(&paths);
    let walker = Walker::new(fs, options);
    seq::map(walker.files_by_directory_from_paths(roots), |item| {
        item.map(|batch| batch.into_iter().map(|entry| entry.path).collect())
    })
}
