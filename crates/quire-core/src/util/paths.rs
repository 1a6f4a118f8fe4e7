//! Path resolution utilities.
//!
//! Helpers for locating a site root and normalising user-supplied paths.

use std::path::{Path, PathBuf};

/// Maximum number of parent directories to walk when searching for a marker.
pub const MAX_WALK_LEVELS: usize = 10;

/// Files that identify the root of a site checkout.
pub const SITE_MARKERS: &[&str] = &["quire.toml", "pelicanconf.py"];

/// Walks up the directory tree from `start` looking for a directory containing `marker`.
///
/// Returns the directory containing the marker file/directory, or None if not found
/// within [`MAX_WALK_LEVELS`] iterations.
pub fn find_dir_with_marker<P: AsRef<Path>>(start: P, marker: &str) -> Option<PathBuf> {
    let mut current = start.as_ref().to_path_buf();

    for _ in 0..MAX_WALK_LEVELS {
        if current.join(marker).exists() {
            return Some(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

/// Finds the nearest ancestor of `start` holding any of [`SITE_MARKERS`].
pub fn find_site_root<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    SITE_MARKERS
        .iter()
        .filter_map(|marker| find_dir_with_marker(start.as_ref(), marker))
        // The deepest match is the nearest site.
        .max_by_key(|dir| dir.components().count())
}

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use quire_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/blog/content");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve_against<P: AsRef<Path>>(base: &Path, path: P) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
