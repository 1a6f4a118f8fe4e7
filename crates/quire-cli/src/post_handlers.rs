//! Handler functions for the content commands.
//!
//! These functions implement `check`, `list`, `show`, `render`, `stats`,
//! `tags` and `categories`. Each one loads the corpus from the paths the
//! config provider reports and prints to stdout.

use std::path::{Path, PathBuf};

use quire_content::dates::localize;
use quire_content::{DocumentKind, Post, Status};
use quire_core::traits::{ConfigProvider, ARTICLES, PAGES};
use quire_core::{Error, Result};
use quire_corpus::{
    category_index, compute_stats, neighbors, tag_index, validate_corpus, Corpus, LoadOptions,
    LoadReport, TaxonomyIndex, ValidationIssue,
};
use serde::Serialize;

use crate::config::SiteOptions;

// ============================================================================
// Option types
// ============================================================================

/// Options for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only documents with this tag (compared by slug).
    pub tag: Option<String>,
    /// Only documents in this category (compared by slug).
    pub category: Option<String>,
    /// Include drafts and hidden pages.
    pub drafts: bool,
    /// List pages instead of articles.
    pub pages: bool,
    /// Emit JSON.
    pub json: bool,
}

// ============================================================================
// Output types
// ============================================================================

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    date: Option<String>,
    slug: &'a str,
    title: &'a str,
    kind: DocumentKind,
    status: Status,
    url: String,
}

#[derive(Debug, Serialize)]
struct PostDetails<'a> {
    #[serde(flatten)]
    post: &'a Post,
    local_date: Option<String>,
    local_modified: Option<String>,
    permalink: String,
    word_count: usize,
    reading_time_minutes: usize,
    newer: Option<&'a str>,
    older: Option<&'a str>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Load options for the provider's layout.
///
/// `LoadOptions::pages_dir` is relative to the content root, so the
/// provider's pages path is stripped of that prefix. A pages directory
/// outside the content root stays as given.
fn load_options<C: ConfigProvider>(
    config: &C,
    site: &SiteOptions,
) -> Result<(PathBuf, LoadOptions)> {
    let content_dir = config.content_path(ARTICLES)?;
    let pages = config.content_path(PAGES)?;
    let pages_dir = pages
        .strip_prefix(&content_dir)
        .map(Path::to_path_buf)
        .unwrap_or(pages);
    let options = LoadOptions {
        pages_dir,
        defaults: site.defaults.clone(),
    };
    Ok((content_dir, options))
}

/// Load the corpus from the provider's article and page directories.
async fn load_report<C: ConfigProvider>(config: &C, site: &SiteOptions) -> Result<LoadReport> {
    let (content_dir, options) = load_options(config, site)?;
    Corpus::load(&content_dir, &options).await
}

/// Find `slug`, among pages only when `page` is set, else preferring articles.
fn find_post<'a>(corpus: &'a Corpus, slug: &str, page: bool) -> Result<&'a Post> {
    let found = if page {
        corpus.find(DocumentKind::Page, slug)
    } else {
        corpus.by_slug(slug)
    };
    found.ok_or_else(|| {
        let noun = if page { "page" } else { "document" };
        Error::not_found(format!("no {noun} with slug '{slug}'"))
    })
}

/// The documents `list` prints, in listing order.
///
/// Drafts and hidden documents are left out unless `options.drafts` is set.
/// Tag and category filters compare slugs.
pub fn select_posts<'a>(corpus: &'a Corpus, options: &ListOptions) -> Vec<&'a Post> {
    let kind = if options.pages {
        DocumentKind::Page
    } else {
        DocumentKind::Article
    };
    corpus
        .of_kind(kind)
        .iter()
        .filter(|p| options.drafts || p.is_published())
        .filter(|p| options.tag.as_deref().is_none_or(|t| p.has_tag(t)))
        .filter(|p| options.category.as_deref().is_none_or(|c| p.in_category(c)))
        .collect()
}

fn local_date(site: &SiteOptions, date: Option<chrono::NaiveDateTime>) -> Result<Option<String>> {
    date.map(|d| localize(&d, site.timezone).map(|l| l.to_rfc3339()))
        .transpose()
}

fn print_issue(label: &str, issue: &ValidationIssue) {
    println!("  {label} [{}]: {}", issue.code, issue.message);
    for doc in &issue.documents {
        println!("    - {doc}");
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// Load and validate every document.
///
/// Fails when the corpus has errors, or warnings too when `strict` is set.
pub async fn handle_check<C: ConfigProvider>(
    config: &C,
    site: &SiteOptions,
    strict: bool,
) -> Result<()> {
    let report = load_report(config, site).await?;
    let result = validate_corpus(&report);

    println!(
        "Checked {} document(s) in {}",
        report.files_seen(),
        config.content_path(ARTICLES)?.display()
    );

    for error in &result.errors {
        print_issue("ERROR", error);
    }
    for warning in &result.warnings {
        print_issue("WARN ", warning);
    }
    for info in &result.info {
        print_issue("INFO ", info);
    }

    println!(
        "\nSummary: {} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    );

    if !result.valid {
        return Err(Error::validation(format!(
            "{} error(s) found",
            result.errors.len()
        )));
    }
    if strict && !result.warnings.is_empty() {
        return Err(Error::validation(format!(
            "{} warning(s) found (strict mode)",
            result.warnings.len()
        )));
    }
    Ok(())
}

/// List documents, newest first.
pub async fn handle_list<C: ConfigProvider>(
    config: &C,
    site: &SiteOptions,
    options: ListOptions,
) -> Result<()> {
    let report = load_report(config, site).await?;
    let selected = select_posts(&report.corpus, &options);

    if options.json {
        let entries = selected
            .iter()
            .map(|p| {
                Ok(ListEntry {
                    date: p.date.map(|d| d.format("%Y-%m-%d").to_string()),
                    slug: &p.slug,
                    title: &p.title,
                    kind: p.kind,
                    status: p.status,
                    url: site.urls.permalink(p)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", to_json(&entries)?);
        return Ok(());
    }

    for post in &selected {
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let marker = match post.status {
            Status::Published => String::new(),
            other => format!(" [{other}]"),
        };
        println!("{date}  {:<32}  {}{marker}", post.slug, post.title);
    }
    println!("\n{} document(s)", selected.len());
    Ok(())
}

/// Show one document's metadata.
pub async fn handle_show<C: ConfigProvider>(
    config: &C,
    site: &SiteOptions,
    slug: &str,
    page: bool,
    json: bool,
) -> Result<()> {
    let report = load_report(config, site).await?;
    let post = find_post(&report.corpus, slug, page)?;
    let around = if post.is_article() {
        neighbors(&report.corpus, slug)
    } else {
        None
    };

    let details = PostDetails {
        post,
        local_date: local_date(site, post.date)?,
        local_modified: local_date(site, post.modified)?,
        permalink: site.urls.permalink(post)?,
        word_count: post.word_count(),
        reading_time_minutes: post.reading_time_minutes(),
        newer: around.and_then(|n| n.newer).map(|p| p.slug.as_str()),
        older: around.and_then(|n| n.older).map(|p| p.slug.as_str()),
    };

    if json {
        println!("{}", to_json(&details)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!("{}", "=".repeat(post.title.chars().count()));
    println!("Slug:       {}", post.slug);
    println!("Kind:       {}", post.kind);
    println!("Status:     {}", post.status);
    if let Some(date) = &details.local_date {
        println!("Date:       {date}");
    }
    if let Some(modified) = &details.local_modified {
        println!("Modified:   {modified}");
    }
    if !post.author.is_empty() {
        println!("Author:     {}", post.author);
    }
    if let Some(category) = &post.category {
        println!("Category:   {category}");
    }
    if !post.tags.is_empty() {
        println!("Tags:       {}", post.tags.join(", "));
    }
    if let Some(cover) = &post.cover {
        println!("Cover:      {cover}");
    }
    println!("Permalink:  {}", details.permalink);
    println!(
        "Length:     {} word(s), {} min read",
        details.word_count, details.reading_time_minutes
    );
    if let Some(newer) = details.newer {
        println!("Newer:      {newer}");
    }
    if let Some(older) = details.older {
        println!("Older:      {older}");
    }
    let derived = if post.summary_derived { " (derived)" } else { "" };
    println!("\nSummary{derived}: {}", post.summary);
    println!("Source: {}", post.source.display());

    Ok(())
}

/// Render a document body to HTML, on stdout or into `output`.
pub async fn handle_render<C: ConfigProvider>(
    config: &C,
    site: &SiteOptions,
    slug: &str,
    page: bool,
    output: Option<String>,
) -> Result<()> {
    let report = load_report(config, site).await?;
    let html = find_post(&report.corpus, slug, page)?.render_html();

    match output {
        Some(path) => {
            let path = PathBuf::from(path);
            tokio::fs::write(&path, html)
                .await
                .map_err(|e| Error::io_with_path(e, &path))?;
            log::info!("Rendered '{slug}' to {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// Show corpus statistics.
pub async fn handle_stats<C: ConfigProvider>(
    config: &C,
    site: &SiteOptions,
    json: bool,
) -> Result<()> {
    let report = load_report(config, site).await?;
    let stats = compute_stats(&report.corpus);

    if json {
        println!("{}", to_json(&stats)?);
        return Ok(());
    }

    println!("Corpus Statistics");
    println!("=================");
    println!("Articles:     {}", stats.article_count);
    println!("  Published:  {}", stats.published_count);
    println!("Pages:        {}", stats.page_count);
    println!("Drafts:       {}", stats.draft_count);
    println!("Total words:  {}", stats.total_words);
    if let (Some(earliest), Some(latest)) = (stats.earliest, stats.latest) {
        println!(
            "Published:    {} to {}",
            earliest.format("%Y-%m-%d"),
            latest.format("%Y-%m-%d")
        );
    }
    if !report.failures.is_empty() {
        println!("Unreadable:   {}", report.failures.len());
    }

    for (heading, distribution) in [
        ("Categories", &stats.category_distribution),
        ("Tags", &stats.tag_distribution),
        ("Authors", &stats.author_distribution),
    ] {
        if distribution.is_empty() {
            continue;
        }
        println!("\n{heading}:");
        let mut entries: Vec<_> = distribution.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (name, count) in entries {
            println!("  {name}: {count}");
        }
    }

    Ok(())
}

/// List tags with article counts and listing URLs.
pub async fn handle_tags<C: ConfigProvider>(config: &C, site: &SiteOptions) -> Result<()> {
    let report = load_report(config, site).await?;
    let index = tag_index(&report.corpus);
    print_taxonomy("tag", &index, |name| site.urls.tag_url(name))
}

/// List categories with article counts and listing URLs.
pub async fn handle_categories<C: ConfigProvider>(config: &C, site: &SiteOptions) -> Result<()> {
    let report = load_report(config, site).await?;
    let index = category_index(&report.corpus);
    print_taxonomy("category", &index, |name| site.urls.category_url(name))
}

fn print_taxonomy(
    noun: &str,
    index: &TaxonomyIndex,
    url: impl Fn(&str) -> Result<String>,
) -> Result<()> {
    let mut terms: Vec<_> = index.values().collect();
    terms.sort_by(|a, b| b.count().cmp(&a.count()).then_with(|| a.slug.cmp(&b.slug)));

    for term in &terms {
        println!("{:>4}  {:<28}  {}", term.count(), term.name, url(&term.name)?);
    }
    println!("\n{} {noun}(s)", terms.len());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
