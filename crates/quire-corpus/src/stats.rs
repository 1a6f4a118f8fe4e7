//! Corpus statistics and taxonomies.
//!
//! Provides counts and distributions over the corpus, plus the tag and
//! category indexes (term → articles) used for listings.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use quire_content::{slugify, Post};
use serde::Serialize;

use crate::corpus::Corpus;

// ============================================================================
// Types
// ============================================================================

/// Summary statistics for a corpus.
#[derive(Clone, Debug, Serialize)]
pub struct CorpusStats {
    /// Number of articles (any status).
    pub article_count: usize,
    /// Number of pages (any status).
    pub page_count: usize,
    /// Number of published articles.
    pub published_count: usize,
    /// Number of drafts of either kind.
    pub draft_count: usize,
    /// Words of prose across all documents.
    pub total_words: usize,
    /// Published articles per tag.
    pub tag_distribution: BTreeMap<String, usize>,
    /// Published articles per category.
    pub category_distribution: BTreeMap<String, usize>,
    /// Articles per author.
    pub author_distribution: BTreeMap<String, usize>,
    /// Date of the oldest published article.
    pub earliest: Option<NaiveDateTime>,
    /// Date of the newest published article.
    pub latest: Option<NaiveDateTime>,
}

/// One tag or category and the articles filed under it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Display name (first spelling seen).
    pub name: String,
    /// URL-safe form of the name; also the index key.
    pub slug: String,
    /// Slugs of published articles, newest first.
    pub posts: Vec<String>,
}

impl Term {
    /// Number of articles filed under this term.
    pub fn count(&self) -> usize {
        self.posts.len()
    }
}

/// Terms keyed by slug.
pub type TaxonomyIndex = BTreeMap<String, Term>;

// ============================================================================
// Functions
// ============================================================================

/// Compute statistics for a corpus.
pub fn compute_stats(corpus: &Corpus) -> CorpusStats {
    let published: Vec<&Post> = corpus.published_articles().collect();

    let mut author_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for post in corpus.articles() {
        *author_distribution.entry(post.author.clone()).or_insert(0) += 1;
    }

    let tag_distribution = tag_index(corpus)
        .into_values()
        .map(|t| (t.name, t.posts.len()))
        .collect();
    let category_distribution = category_index(corpus)
        .into_values()
        .map(|t| (t.name, t.posts.len()))
        .collect();

    CorpusStats {
        article_count: corpus.articles().len(),
        page_count: corpus.pages().len(),
        published_count: published.len(),
        draft_count: corpus.drafts().count(),
        total_words: corpus.posts().map(Post::word_count).sum(),
        tag_distribution,
        category_distribution,
        author_distribution,
        earliest: published.iter().filter_map(|p| p.date).min(),
        latest: published.iter().filter_map(|p| p.date).max(),
    }
}

/// Tags of published articles.
pub fn tag_index(corpus: &Corpus) -> TaxonomyIndex {
    let mut index = TaxonomyIndex::new();
    for post in corpus.published_articles() {
        for tag in &post.tags {
            file_under(&mut index, tag, &post.slug);
        }
    }
    index
}

/// Categories of published articles.
pub fn category_index(corpus: &Corpus) -> TaxonomyIndex {
    let mut index = TaxonomyIndex::new();
    for post in corpus.published_articles() {
        if let Some(category) = &post.category {
            file_under(&mut index, category, &post.slug);
        }
    }
    index
}

fn file_under(index: &mut TaxonomyIndex, name: &str, post_slug: &str) {
    let slug = slugify(name);
    if slug.is_empty() {
        return;
    }
    let term = index.entry(slug.clone()).or_insert_with(|| Term {
        name: name.to_string(),
        slug,
        posts: Vec::new(),
    });
    if !term.posts.iter().any(|p| p == post_slug) {
        term.posts.push(post_slug.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_support::*;

    fn corpus() -> Corpus {
        Corpus::from_posts(vec![
            article("ilp", "2021-03-14", "optimization, Python", "Math"),
            article("floats", "2021-05-02", "python, ieee754", "Programming"),
            article("monkeypatching", "2022-02-01", "python, testing", "Programming"),
            draft("wip", "2023-01-01"),
            page("about", "About"),
        ])
    }

    #[test]
    fn test_compute_stats_counts() {
        let stats = compute_stats(&corpus());
        assert_eq!(stats.article_count, 4);
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.published_count, 3);
        assert_eq!(stats.draft_count, 1);
        assert_eq!(stats.author_distribution.get("Tester"), Some(&4));
        // "Some words here." in four articles plus "Page body." once.
        assert_eq!(stats.total_words, 14);
    }

    #[test]
    fn test_compute_stats_dates_ignore_drafts() {
        let stats = compute_stats(&corpus());
        assert_eq!(stats.earliest.unwrap().to_string(), "2021-03-14 00:00:00");
        assert_eq!(stats.latest.unwrap().to_string(), "2022-02-01 00:00:00");
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&Corpus::default());
        assert_eq!(stats.article_count, 0);
        assert!(stats.earliest.is_none());
        assert!(stats.tag_distribution.is_empty());
    }

    #[test]
    fn test_tag_index_groups_spellings() {
        let index = tag_index(&corpus());
        let python = index.get("python").unwrap();
        // Newest article first; first spelling seen wins.
        assert_eq!(python.name, "python");
        assert_eq!(python.posts, vec!["monkeypatching", "floats", "ilp"]);
        assert_eq!(python.count(), 3);
        assert!(!index.contains_key("wip"));
    }

    #[test]
    fn test_category_index() {
        let index = category_index(&corpus());
        assert_eq!(index.len(), 2);
        assert_eq!(index["programming"].posts, vec!["monkeypatching", "floats"]);
        assert_eq!(index["math"].name, "Math");
    }

    #[test]
    fn test_distributions_use_display_names() {
        let stats = compute_stats(&corpus());
        assert_eq!(stats.tag_distribution.get("python"), Some(&3));
        assert_eq!(stats.category_distribution.get("Programming"), Some(&2));
    }
}
