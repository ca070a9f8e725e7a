//! Path helpers for mirroring files between the modules, tests and reference trees.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Resolve `path` to an absolute, canonical form.
///
/// Paths that cannot be canonicalized (for example because they do not exist yet)
/// are made absolute against the current directory so callers can still report them.
pub fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Join the normal components of `relative` with `.`, dropping the final extension.
pub fn dotted_name(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Replace the file name of `relative` and re-root it under `root`.
pub fn rerooted_with_name(root: &Path, relative: &Path, file_name: &str) -> PathBuf {
    root.join(relative.with_file_name(file_name))
}

/// Replace the extension of `relative` and re-root it under `root`.
pub fn rerooted_with_extension(root: &Path, relative: &Path, extension: &str) -> PathBuf {
    root.join(relative.with_extension(extension))
}
