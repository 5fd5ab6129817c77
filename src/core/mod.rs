mod paths;
mod render;
mod walk;

pub use paths::{is_ancestor, is_descendant, select_unique_non_descendant};
pub use render::write_batch;
pub use walk::{Batch, WalkOptions, Walker};
