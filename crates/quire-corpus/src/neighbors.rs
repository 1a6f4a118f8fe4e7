//! Previous/next navigation between published articles.

use quire_content::Post;

use crate::corpus::Corpus;

/// The articles adjacent to one article in publication order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors<'a> {
    /// The next article published after this one.
    pub newer: Option<&'a Post>,
    /// The article published just before this one.
    pub older: Option<&'a Post>,
}

/// Neighbours of the published article `slug`.
///
/// Returns None when `slug` is not a published article (drafts and pages
/// have no neighbours).
pub fn neighbors<'a>(corpus: &'a Corpus, slug: &str) -> Option<Neighbors<'a>> {
    let published: Vec<&Post> = corpus.published_articles().collect();
    let pos = published.iter().position(|p| p.slug == slug)?;

    Some(Neighbors {
        newer: pos.checked_sub(1).map(|i| published[i]),
        older: published.get(pos + 1).copied(),
    })
}
