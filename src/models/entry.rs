use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// One filesystem node at traversal time. Immutable after creation.
///
/// The kind reflects a no-dereference stat: a symlink to a directory is a
/// symlink, never a traversable directory, unless follow-symlinks resolution
/// replaced the kind with the target's kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Entry {
            path: path.into(),
            kind,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symbolic_link(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// One record of a directory listing.
///
/// The kind hint is optional: listings that already know each child's type
/// carry it here, saving the walker a stat per child; a `None` hint means the
/// child still needs a no-dereference stat on the joined path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirChild {
    pub name: OsString,
    pub kind: Option<EntryKind>,
}

impl DirChild {
    pub fn typed(name: impl Into<OsString>, kind: EntryKind) -> Self {
        DirChild {
            name: name.into(),
            kind: Some(kind),
        }
    }

    pub fn untyped(name: impl Into<OsString>) -> Self {
        DirChild {
            name: name.into(),
            kind: None,
        }
    }
}
