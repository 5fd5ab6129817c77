mod entry;

pub use entry::{DirChild, Entry, EntryKind};
