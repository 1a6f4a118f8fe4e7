//! Reading a single document from disk.

use std::path::Path;

use quire_core::util::files::read_file;
use quire_core::Result;

use crate::frontmatter::parse_front_matter;
use crate::post::{DocumentKind, Post, PostDefaults};

/// Read `path` and build a [`Post`] from it.
///
/// # Errors
///
/// Returns an I/O error (with the path) when the file cannot be read, and
/// the errors of [`Post::from_front_matter`] for bad metadata.
pub async fn read_document(path: &Path, kind: DocumentKind, defaults: &PostDefaults) -> Result<Post> {
    log::debug!("Reading {kind} {}", path.display());
    let text = read_file(path).await?;
    parse_document(&text, path, kind, defaults)
}

/// Build a [`Post`] from text already in memory; `path` is recorded as its source.
pub fn parse_document(
    text: &str,
    path: &Path,
    kind: DocumentKind,
    defaults: &PostDefaults,
) -> Result<Post> {
    Post::from_front_matter(parse_front_matter(text), kind, path, defaults)
}
