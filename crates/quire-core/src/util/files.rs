//! Async file utilities for content discovery.
//!
//! Provides the file discovery and reading operations the content reader
//! and corpus loader are built on.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering content files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extension to match (without dot), e.g., "md"
    pub extension: Option<&'static str>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
    /// Directories whose contents are skipped.
    pub exclude: Vec<PathBuf>,
    /// Include dotfiles and files inside dot-directories.
    pub include_hidden: bool,
}

impl FindOptions {
    /// Create options for finding markdown files.
    pub fn markdown() -> Self {
        Self {
            extension: Some("md"),
            ..Self::default()
        }
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Skip everything under `dir`.
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exclude.push(dir.into());
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|dir| path.starts_with(dir))
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory.
///
/// Results are sorted by relative path so that callers see a stable order
/// regardless of how the filesystem enumerates entries.
///
/// # Example
///
/// ```no_run
/// # use quire_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let content = Path::new("content");
/// let files = find_all_files(
///     content,
///     FindOptions::markdown().excluding(content.join("pages")),
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "Content directory {} does not exist",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(|e| {
            Error::operation(format!("Failed to walk {}: {e}", base_path.display()))
        })?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if options.is_excluded(&path) {
            continue;
        }

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        if !options.include_hidden && is_hidden(&relative_path) {
            continue;
        }

        if let Some(max_depth) = options.max_depth {
            if relative_path.components().count() > max_depth {
                continue;
            }
        }

        if let Some(ext) = options.extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        files.push(FileInfo {
            path: path.to_path_buf(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("Found {} file(s) under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

fn is_hidden(relative: &Path) -> bool {
    relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|s| s.starts_with('.') && s != "." && s != "..")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_find_all_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.md"), "# One")
            .await
            .unwrap();
        fs::write(temp.path().join("two.md"), "# Two")
            .await
            .unwrap();
        fs::write(temp.path().join("skip.txt"), "skip")
            .await
            .unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].stem, "one");
        assert_eq!(files[1].stem, "two");
    }

    #[tokio::test]
    async fn test_find_all_files_nested() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("root.md"), "root")
            .await
            .unwrap();
        let subdir = temp.path().join("2021");
        fs::create_dir(&subdir).await.unwrap();
        fs::write(subdir.join("nested.md"), "nested").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative_path, PathBuf::from("2021/nested.md"));
        assert_eq!(files[1].relative_path, PathBuf::from("root.md"));
    }

    #[tokio::test]
    async fn test_find_all_files_max_depth() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("root.md"), "root")
            .await
            .unwrap();
        let level1 = temp.path().join("level1");
        fs::create_dir(&level1).await.unwrap();
        fs::write(level1.join("file1.md"), "l1").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown().with_max_depth(1))
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem, "root");
    }

    #[tokio::test]
    async fn test_find_all_files_excluding() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("article.md"), "a").await.unwrap();
        let pages = temp.path().join("pages");
        fs::create_dir(&pages).await.unwrap();
        fs::write(pages.join("about.md"), "about").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown().excluding(&pages))
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem, "article");
    }

    #[tokio::test]
    async fn test_find_all_files_skips_hidden() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("visible.md"), "v").await.unwrap();
        fs::write(temp.path().join(".draft.md"), "h").await.unwrap();
        let git = temp.path().join(".git");
        fs::create_dir(&git).await.unwrap();
        fs::write(git.join("notes.md"), "g").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();
        assert_eq!(files.len(), 1);

        let mut options = FindOptions::markdown();
        options.include_hidden = true;
        let files = find_all_files(temp.path(), options).await.unwrap();
        assert_eq!(files.len(), 3);
    }

    #[tokio::test]
    async fn test_find_all_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = find_all_files(&temp.path().join("nope"), FindOptions::markdown()).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("post.md");
        fs::write(&file_path, "Title: Hello\n\nBody").await.unwrap();

        assert_eq!(read_file(&file_path).await.unwrap(), "Title: Hello\n\nBody");
    }

    #[tokio::test]
    async fn test_read_file_not_found() {
        let temp = TempDir::new().unwrap();
        let result = read_file(&temp.path().join("nonexistent.md")).await;
        assert!(result.unwrap_err().to_string().contains("nonexistent.md"));
    }

    #[tokio::test]
    async fn test_exists() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("exists.md");
        fs::write(&file_path, "content").await.unwrap();

        assert!(exists(&file_path).await);
        assert!(exists(temp.path()).await);
        assert!(!exists(&temp.path().join("nonexistent.md")).await);
    }

    #[test]
    fn test_find_options_default() {
        let opts = FindOptions::default();
        assert!(opts.extension.is_none());
        assert!(opts.max_depth.is_none());
        assert!(opts.exclude.is_empty());
        assert!(!opts.include_hidden);
    }
}
