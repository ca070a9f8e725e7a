//! File system helpers shared by the checker: tree walking and small read/write utilities.

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Recursively collect every file under `root` whose path satisfies `keep`.
///
/// Symlinks to files are included; symlinked directories are not descended into.
/// A missing root yields an empty list. The result is sorted so callers get
/// deterministic ordering across platforms.
pub fn walk_files(root: &Path, keep: impl Fn(&Path) -> bool) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_files_inner(root, &keep, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk_files_inner(
    dir: &Path,
    keep: &impl Fn(&Path) -> bool,
    out: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let ty = entry.file_type()?;
        if ty.is_dir() {
            walk_files_inner(&path, keep, out)?;
            continue;
        }
        if (ty.is_file() || (ty.is_symlink() && path.is_file())) && keep(&path) {
            out.push(path);
        }
    }

    Ok(())
}

/// Returns true if the file name of `path` has the given extension (without dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

/// Returns the file name of `path` as UTF-8, if it has one.
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(OsStr::to_str)
}

/// Read only the first line of a UTF-8 text file, including its line terminator.
///
/// An empty file yields an empty string.
pub fn read_first_line(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// Write `content` to `path`, creating missing parent directories first.
pub fn write_with_parents(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content.as_bytes())
}

/// List the immediate subdirectories of `dir`, sorted.
pub fn subdirectories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
