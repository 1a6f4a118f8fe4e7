//! Loading a content tree into a [`Corpus`].
//!
//! Every `*.md` file below the content directory is a document. Files inside
//! the pages directory are pages; everything else is an article. A document
//! that fails to load is reported in [`LoadReport::failures`] instead of
//! aborting the whole load.

use std::path::{Path, PathBuf};

use quire_content::{read_document, DocumentKind, Post, PostDefaults};
use quire_core::util::files::{exists, find_all_files, FindOptions};
use quire_core::Result;
use serde::Serialize;

/// Default name of the pages directory inside the content root.
pub const DEFAULT_PAGES_DIR: &str = "pages";

/// Options controlling how a content tree is loaded.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Pages directory, relative to the content root.
    pub pages_dir: PathBuf,
    /// Site-wide fallbacks for missing metadata.
    pub defaults: PostDefaults,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            defaults: PostDefaults::default(),
        }
    }
}

/// A document that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// File that failed.
    pub path: PathBuf,
    /// Whether it was read as an article or a page.
    pub kind: DocumentKind,
    /// Error description.
    pub message: String,
}

/// Result of loading a content tree.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Documents that loaded successfully.
    pub corpus: Corpus,
    /// Documents that did not.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Number of files examined.
    pub fn files_seen(&self) -> usize {
        self.corpus.len() + self.failures.len()
    }
}

/// All documents of a site.
///
/// Articles are kept newest first (ties broken by slug); pages are ordered by
/// title.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    articles: Vec<Post>,
    pages: Vec<Post>,
}

impl Corpus {
    /// Load every document under `content_dir`.
    ///
    /// # Errors
    ///
    /// Fails only when the content directory itself cannot be walked.
    /// Per-document problems are collected in [`LoadReport::failures`].
    pub async fn load(content_dir: &Path, options: &LoadOptions) -> Result<LoadReport> {
        let pages_dir = content_dir.join(&options.pages_dir);
        let mut posts = Vec::new();
        let mut failures = Vec::new();

        let article_files = find_all_files(
            content_dir,
            FindOptions::markdown().excluding(pages_dir.clone()),
        )
        .await?;

        let page_files = if exists(&pages_dir).await {
            find_all_files(&pages_dir, FindOptions::markdown()).await?
        } else {
            log::debug!("No pages directory at {}", pages_dir.display());
            Vec::new()
        };

        let files = article_files
            .into_iter()
            .map(|f| (f.path, DocumentKind::Article))
            .chain(page_files.into_iter().map(|f| (f.path, DocumentKind::Page)));

        for (path, kind) in files {
            match read_document(&path, kind, &options.defaults).await {
                Ok(post) => posts.push(post),
                Err(e) => {
                    log::warn!("Skipping {}: {e}", path.display());
                    failures.push(LoadFailure {
                        path,
                        kind,
                        message: e.to_string(),
                    });
                }
            }
        }

        let corpus = Self::from_posts(posts);
        log::info!(
            "Loaded {} article(s) and {} page(s) from {} ({} failure(s))",
            corpus.articles.len(),
            corpus.pages.len(),
            content_dir.display(),
            failures.len()
        );

        Ok(LoadReport { corpus, failures })
    }

    /// Build a corpus from already-parsed posts.
    pub fn from_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let (mut articles, mut pages): (Vec<Post>, Vec<Post>) =
            posts.into_iter().partition(Post::is_article);

        articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        pages.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)));

        Self { articles, pages }
    }

    /// Articles, newest first.
    pub fn articles(&self) -> &[Post] {
        &self.articles
    }

    /// Pages, by title.
    pub fn pages(&self) -> &[Post] {
        &self.pages
    }

    /// Every document: articles first, then pages.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.articles.iter().chain(self.pages.iter())
    }

    /// Published articles, newest first.
    pub fn published_articles(&self) -> impl Iterator<Item = &Post> {
        self.articles.iter().filter(|p| p.is_published())
    }

    /// Drafts of either kind.
    pub fn drafts(&self) -> impl Iterator<Item = &Post> {
        self.posts().filter(|p| p.is_draft())
    }

    /// Documents of one kind, in their listing order.
    pub fn of_kind(&self, kind: DocumentKind) -> &[Post] {
        match kind {
            DocumentKind::Article => &self.articles,
            DocumentKind::Page => &self.pages,
        }
    }

    /// Look a document up by slug, preferring articles over pages.
    pub fn by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts().find(|p| p.slug == slug)
    }

    /// Look a document of one kind up by slug.
    ///
    /// Articles and pages have separate slug spaces, so this reaches a page
    /// that shares its slug with an article.
    pub fn find(&self, kind: DocumentKind, slug: &str) -> Option<&Post> {
        self.of_kind(kind).iter().find(|p| p.slug == slug)
    }

    /// Published articles carrying `tag` (matched by slug).
    pub fn by_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a Post> + use<'a> {
        let tag = tag.to_string();
        self.published_articles().filter(move |p| p.has_tag(&tag))
    }

    /// Published articles in `category` (matched by slug).
    pub fn by_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a Post> + use<'a> {
        let category = category.to_string();
        self.published_articles()
            .filter(move |p| p.in_category(&category))
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.articles.len() + self.pages.len()
    }

    /// True when there are no documents.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty() && self.pages.is_empty()
    }
}
