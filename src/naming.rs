//! Pure helpers for deriving paths and names from resource names
//!
//! Resource names use `/` as their separator regardless of platform, since
//! bundled namespaces and archive entries are always `/`-separated. A `\`
//! is accepted as well so Windows-style paths split the same way.
//!
//! ## Examples
//!
//! ```rust
//! use locus::naming;
//!
//! assert_eq!(naming::split("icons/app/logo.png"), ("icons/app", "logo.png"));
//! assert_eq!(naming::split("logo.png"), ("", "logo.png"));
//! assert_eq!(naming::file_stem("icons/app/logo.png"), "logo");
//! assert_eq!(naming::strip_extension("icons/app/logo.png"), "icons/app/logo");
//! assert_eq!(naming::extension("icons/app/logo.png"), Some("png"));
//! ```

use std::io;
use std::path::{Path, PathBuf};

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Split a name into its directory part and its leaf
///
/// A name without any separator has an empty directory part. The separator
/// itself belongs to neither half.
pub fn split(name: &str) -> (&str, &str) {
    match name.rfind(is_separator) {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => ("", name),
    }
}

/// The leaf of a name
pub fn leaf(name: &str) -> &str {
    split(name).1
}

/// The extension of the leaf, without the dot
///
/// Dotfiles such as `.gitignore` have no extension, and a dot inside the
/// directory part is never taken as one.
pub fn extension(name: &str) -> Option<&str> {
    let leaf = leaf(name);
    match leaf.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&leaf[idx + 1..]),
    }
}

/// The leaf without its extension
pub fn file_stem(name: &str) -> &str {
    let leaf = leaf(name);
    match extension(leaf) {
        Some(ext) => &leaf[..leaf.len() - ext.len() - 1],
        None => leaf,
    }
}

/// The whole name without its extension, directory part kept
pub fn strip_extension(name: &str) -> &str {
    match extension(name) {
        Some(ext) => &name[..name.len() - ext.len() - 1],
        None => name,
    }
}

/// Create the directories a path needs and return the path
///
/// A leaf containing a `.` is taken to be a file, so only its parent chain
/// is created. A leaf without one is taken to be a directory and created
/// itself. Existing directories are left alone.
pub fn create_with_dirs(path: &Path) -> io::Result<PathBuf> {
    let is_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains('.'));

    let dir = if is_file { path.parent() } else { Some(path) };
    if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    Ok(path.to_path_buf())
}
