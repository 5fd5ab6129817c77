//! Pure path-hierarchy relations, computed lexically. No filesystem access
//! and no dependence on the current working directory: an absolute and a
//! relative path are never related.

use std::path::{Component, Path, PathBuf};

/// Normalize lexically: drop `.`, fold `x/..` pairs. Leading `..` segments
/// that cannot be folded are kept, and `/..` stays at the root.
fn lexical_components(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts
}

fn is_anchored(parts: &[Component<'_>]) -> bool {
    matches!(
        parts.first(),
        Some(Component::RootDir | Component::Prefix(_))
    )
}

/// Whether `ancestor` is a proper ancestor directory of `descendant`.
///
/// Identical paths are not ancestors of each other, and paths on divergent
/// branches are unrelated. Anchoring must match: `.` (which normalizes to no
/// components at all) is an ancestor of relative children, never of absolute
/// paths. The first component past the shared prefix must be a plain name,
/// so `.` is not an ancestor of `..`.
pub fn is_ancestor(ancestor: &Path, descendant: &Path) -> bool {
    let ancestor = lexical_components(ancestor);
    let descendant = lexical_components(descendant);
    is_anchored(&ancestor) == is_anchored(&descendant)
        && descendant.len() > ancestor.len()
        && descendant.starts_with(&ancestor)
        && matches!(descendant[ancestor.len()], Component::Normal(_))
}

pub fn is_descendant(descendant: &Path, ancestor: &Path) -> bool {
    is_ancestor(ancestor, descendant)
}

/// Keep a path only if it is the first occurrence of that literal path and no
/// path anywhere in the list is a strict ancestor of it. Ancestor-ship is
/// checked against the full list, so a later ancestor still drops an earlier
/// descendant.
pub fn select_unique_non_descendant(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .enumerate()
        .filter(|(index, path)| {
            paths.iter().position(|other| other == *path) == Some(*index)
                && !paths.iter().any(|other| is_ancestor(other, path))
        })
        .map(|(_, path)| path.clone())
        .collect()
}
