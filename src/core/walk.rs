use std::collections::VecDeque;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::vec;

use crate::error::WalkError;
use crate::fs::{self, FileSystem};
use crate::models::{Entry, EntryKind};
use crate::seq::{self, BoxFuture, BoxSequence, Sequence};

/// Traversal options. Constructed once per traversal and passed down
/// immutably through every recursive step.
#[derive(Clone, Copy, Debug)]
pub struct WalkOptions {
    /// Drop symbolic-link entries from the results entirely.
    pub exclude_symlinks: bool,
    /// Recurse into sub-directories before yielding a directory's own files,
    /// instead of after.
    pub directories_first: bool,
    /// Prefix each batch with the entry of the directory that owns it.
    pub show_directories: bool,
    /// Classify symbolic links by their resolved target instead of the link
    /// itself; traversability then follows the target.
    pub follow_symlinks: bool,
    /// Directories with no qualifying files produce no batch of their own.
    pub skip_empty_directories: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exclude_symlinks: false,
            directories_first: false,
            show_directories: false,
            follow_symlinks: false,
            skip_empty_directories: true,
        }
    }
}

/// One group of entries sharing a parent directory, emitted as a unit.
pub type Batch = Vec<Entry>;

/// Recursive traversal engine: yields one batch per directory, lazily.
pub struct Walker<F> {
    fs: Arc<F>,
    options: WalkOptions,
}

impl<F: FileSystem + 'static> Walker<F> {
    pub fn new(fs: Arc<F>, options: WalkOptions) -> Self {
        Walker { fs, options }
    }

    /// Walk a single resolved entry.
    ///
    /// A directory yields one batch per directory with qualifying files, in
    /// the order configured by `directories_first`; anything else yields a
    /// one-element batch containing itself. The first error ends the
    /// sequence.
    pub fn files_by_directory(&self, entry: Entry) -> BoxSequence<Result<Batch, WalkError>> {
        seq::boxed(seq::stop_on_error(seq::defer(walk_entry(
            Arc::clone(&self.fs),
            self.options,
            entry,
        ))))
    }

    /// Walk multiple root paths.
    ///
    /// Roots are classified strictly in the order given. Directory roots
    /// stream their batches immediately; loose file roots are grouped by
    /// parent directory and flushed as one batch per distinct parent once
    /// every root has been classified.
    pub fn files_by_directory_from_paths(
        &self,
        paths: Vec<PathBuf>,
    ) -> BoxSequence<Result<Batch, WalkError>> {
        seq::boxed(seq::stop_on_error(MultiRoot {
            fs: Arc::clone(&self.fs),
            options: self.options,
            pending: paths.into(),
            current: None,
            groups: Vec::new(),
            flush: None,
        }))
    }
}

/// Parent directory of `path` for grouping purposes; a bare file name groups
/// under `.`.
fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The parent prefix entry used when `show_directories` has to name a
/// directory that was never listed. The parent of an existing node is a
/// directory by construction, so no stat is needed.
fn parent_entry(path: &Path) -> Entry {
    Entry::new(parent_of(path), EntryKind::Directory)
}

/// Classify a symlink by its target, keeping the link's own path.
async fn follow_link<F>(fs: &F, entry: Entry) -> Result<Entry, WalkError>
where
    F: FileSystem + ?Sized,
{
    match fs.stat_follow(&entry.path).await {
        Ok(kind) => Ok(Entry::new(entry.path, kind)),
        Err(source) => Err(WalkError::SymlinkResolution {
            path: entry.path,
            source,
        }),
    }
}

/// List and classify the children of `dir`, in listing order.
///
/// Hint-less listing records cost one follow-up no-dereference stat each.
/// Symlink policy is applied here: exclusion first, then follow resolution.
async fn children_of<F>(
    fs: &F,
    options: &WalkOptions,
    dir: &Entry,
) -> Result<Vec<Entry>, WalkError>
where
    F: FileSystem + ?Sized,
{
    let listing = fs
        .read_dir(&dir.path)
        .await
        .map_err(|source| WalkError::from_io(dir.path.clone(), source))?;

    let mut resolved = Vec::with_capacity(listing.len());
    for child in listing {
        let path = dir.path.join(&child.name);
        let kind = match child.kind {
            Some(kind) => kind,
            None => fs
                .stat_no_follow(&path)
                .await
                .map_err(|source| WalkError::from_io(path.clone(), source))?,
        };
        resolved.push(Entry::new(path, kind));
    }

    if options.exclude_symlinks {
        resolved.retain(|child| !child.is_symbolic_link());
    }

    if !options.follow_symlinks {
        return Ok(resolved);
    }
    let mut followed = Vec::with_capacity(resolved.len());
    for entry in resolved {
        if entry.is_symbolic_link() {
            followed.push(follow_link(fs, entry).await?);
        } else {
            followed.push(entry);
        }
    }
    Ok(followed)
}

/// Build the lazy batch sequence for one entry.
///
/// The returned future does no filesystem work until polled, and the
/// sub-sequences it composes defer each directory listing to the pull that
/// needs it, so abandoning the iteration abandons all remaining work.
fn walk_entry<F: FileSystem + 'static>(
    fs: Arc<F>,
    options: WalkOptions,
    entry: Entry,
) -> BoxFuture<BoxSequence<Result<Batch, WalkError>>> {
    Box::pin(async move {
        if !entry.is_directory() {
            let batch = if options.show_directories {
                vec![parent_entry(&entry.path), entry]
            } else {
                vec![entry]
            };
            return seq::boxed(seq::once(Ok(batch)));
        }

        let children = match children_of(fs.as_ref(), &options, &entry).await {
            Ok(children) => children,
            Err(err) => return seq::boxed(seq::once(Err(err))),
        };

        let mut files = Vec::new();
        let mut directories = Vec::new();
        for child in children {
            if child.is_directory() {
                directories.push(child);
            } else {
                files.push(child);
            }
        }

        // A directory with zero qualifying files yields no batch of its own,
        // but its sub-directories are still visited.
        let own = if files.is_empty() && options.skip_empty_directories {
            None
        } else {
            let mut batch = files;
            if options.show_directories {
                batch.insert(0, entry.clone());
            }
            Some(Ok(batch))
        };

        let subdirectories = seq::flat_map(seq::iter(directories), move |dir| {
            seq::defer(walk_entry(Arc::clone(&fs), options, dir))
        });

        if options.directories_first {
            seq::boxed(seq::chain(subdirectories, seq::iter(own)))
        } else {
            seq::boxed(seq::chain(seq::iter(own), subdirectories))
        }
    })
}

/// Driver for multiple root paths; see
/// [`Walker::files_by_directory_from_paths`].
///
/// Loose-file grouping preserves first-seen parent order. The flush iterator
/// is created only after the last root's branch is exhausted, which is what
/// lets a later directory root's batches surface before an earlier loose
/// file's group.
struct MultiRoot<F> {
    fs: Arc<F>,
    options: WalkOptions,
    pending: VecDeque<PathBuf>,
    current: Option<BoxSequence<Result<Batch, WalkError>>>,
    groups: Vec<(PathBuf, Vec<Entry>)>,
    flush: Option<vec::IntoIter<(PathBuf, Vec<Entry>)>>,
}

impl<F> MultiRoot<F> {
    fn push_group(&mut self, entry: Entry) {
        let parent = parent_of(&entry.path);
        match self.groups.iter_mut().find(|(path, _)| *path == parent) {
            Some((_, files)) => files.push(entry),
            None => self.groups.push((parent, vec![entry])),
        }
    }
}

fn group_batch(options: &WalkOptions, parent: PathBuf, files: Vec<Entry>) -> Batch {
    if options.show_directories {
        let mut batch = Vec::with_capacity(files.len() + 1);
        batch.push(Entry::new(parent, EntryKind::Directory));
        batch.extend(files);
        batch
    } else {
        files
    }
}

#[async_trait::async_trait]
impl<F: FileSystem + 'static> Sequence for MultiRoot<F> {
    type Item = Result<Batch, WalkError>;

    async fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(item) = current.next().await {
                    return Some(item);
                }
                self.current = None;
            }

            if let Some(flush) = self.flush.as_mut() {
                let group = flush.next();
                return group.map(|(parent, files)| Ok(group_batch(&self.options, parent, files)));
            }

            let Some(path) = self.pending.pop_front() else {
                self.flush = Some(mem::take(&mut self.groups).into_iter());
                continue;
            };

            let entry = match fs::resolve(self.fs.as_ref(), path).await {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };
            if self.options.exclude_symlinks && entry.is_symbolic_link() {
                continue;
            }
            let entry = if self.options.follow_symlinks && entry.is_symbolic_link() {
                match follow_link(self.fs.as_ref(), entry).await {
                    Ok(entry) => entry,
                    Err(err) => return Some(Err(err)),
                }
            } else {
                entry
            };

            if entry.is_directory() {
                self.current = Some(seq::boxed(seq::defer(walk_entry(
                    Arc::clone(&self.fs),
                    self.options,
                    entry,
                ))));
            } else {
                self.push_group(entry);
            }
        }
    }
}
