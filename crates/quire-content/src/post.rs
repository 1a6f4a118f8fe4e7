//! The `Post` document model.
//!
//! A [`Post`] is built from parsed [`FrontMatter`] plus the body that follows
//! it. Articles are dated blog entries; pages are standalone documents such
//! as "About".

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use quire_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::frontmatter::FrontMatter;
use crate::markdown::{self, Heading};
use crate::slug::slugify;

/// Front-matter keys with a dedicated `Post` field.
pub const KNOWN_KEYS: &[&str] = &[
    "title", "date", "modified", "category", "tags", "slug", "author", "summary", "status",
    "cover",
];

/// Category given to articles that do not declare one.
pub const DEFAULT_CATEGORY: &str = "misc";

/// Word limit for summaries derived from the body.
pub const DEFAULT_SUMMARY_WORDS: usize = 50;

/// Publication status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Visible and listed.
    #[default]
    Published,
    /// Work in progress.
    Draft,
    /// Reachable by URL but left out of listings (pages only).
    Hidden,
}

impl Status {
    /// Lower-case name as written in front matter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            "hidden" => Ok(Self::Hidden),
            other => Err(Error::invalid_data(format!(
                "unknown status '{other}' (expected published, draft, or hidden)"
            ))),
        }
    }
}

/// Whether a document is a dated article or a standalone page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Dated blog entry.
    Article,
    /// Standalone page.
    Page,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Article => f.write_str("article"),
            Self::Page => f.write_str("page"),
        }
    }
}

/// Site-wide fallbacks applied while building posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDefaults {
    /// Author for documents without an `Author` key.
    pub default_author: Option<String>,
    /// Category for articles without a `Category` key.
    pub default_category: String,
    /// Word limit for derived summaries.
    pub summary_max_words: usize,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            default_author: None,
            default_category: DEFAULT_CATEGORY.to_string(),
            summary_max_words: DEFAULT_SUMMARY_WORDS,
        }
    }
}

/// A single document of the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Document title.
    pub title: String,
    /// Publication date; always present for articles.
    pub date: Option<NaiveDateTime>,
    /// Last revision date.
    pub modified: Option<NaiveDateTime>,
    /// Category; articles fall back to the default category.
    pub category: Option<String>,
    /// Tags in authored order, without duplicates.
    pub tags: Vec<String>,
    /// URL-safe identifier.
    pub slug: String,
    /// Author name.
    pub author: String,
    /// Short description.
    pub summary: String,
    /// True when `summary` was derived from the body.
    pub summary_derived: bool,
    /// Publication status.
    pub status: Status,
    /// Cover image URL.
    pub cover: Option<String>,
    /// Article or page.
    pub kind: DocumentKind,
    /// Unrecognised front-matter keys, lower-cased.
    pub extra: BTreeMap<String, String>,
    /// Raw Markdown body.
    #[serde(skip_serializing)]
    pub body: String,
    /// File the document was read from.
    pub source: PathBuf,
}

impl Post {
    /// Build a post from parsed front matter.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] when `Title` is absent, or when an article
    ///   lacks `Date` or has no `Author` and no default author is configured
    /// - [`Error::InvalidData`] for unparsable dates or status values, or a
    ///   title from which no slug can be derived
    pub fn from_front_matter(
        front: FrontMatter,
        kind: DocumentKind,
        source: &Path,
        defaults: &PostDefaults,
    ) -> Result<Self> {
        let title = front
            .get_non_empty("title")
            .map(|t| t.trim().to_string())
            .ok_or_else(|| Error::missing_field("Title", source))?;

        let date = match front.get_non_empty("date") {
            Some(raw) => Some(parse_date(raw).map_err(|e| in_document(e, "Date", source))?),
            None if kind == DocumentKind::Article => {
                return Err(Error::missing_field("Date", source));
            }
            None => None,
        };

        let modified = front
            .get_non_empty("modified")
            .map(|raw| parse_date(raw).map_err(|e| in_document(e, "Modified", source)))
            .transpose()?;

        let category = match front.get_non_empty("category") {
            Some(c) => Some(c.trim().to_string()),
            None if kind == DocumentKind::Article => Some(defaults.default_category.clone()),
            None => None,
        };

        let tags = front.get("tags").map(parse_tags).unwrap_or_default();

        let slug = match front.get_non_empty("slug") {
            Some(s) => s.trim().to_string(),
            None => {
                let derived = slugify(&title);
                if derived.is_empty() {
                    return Err(Error::invalid_data(format!(
                        "cannot derive a slug from title '{title}' in {}; add a Slug key",
                        source.display()
                    )));
                }
                derived
            }
        };

        let author = match front.get_non_empty("author") {
            Some(a) => a.trim().to_string(),
            None => match (&defaults.default_author, kind) {
                (Some(a), _) => a.clone(),
                (None, DocumentKind::Page) => String::new(),
                (None, DocumentKind::Article) => {
                    return Err(Error::missing_field("Author", source));
                }
            },
        };

        let status = front
            .get_non_empty("status")
            .map(|s| s.parse::<Status>().map_err(|e| in_document(e, "Status", source)))
            .transpose()?
            .unwrap_or_default();

        let cover = front.get_non_empty("cover").map(|c| c.trim().to_string());

        let extra = front
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let authored_summary = front.get_non_empty("summary").map(|s| s.trim().to_string());
        let body = front.into_body();
        let summary_derived = authored_summary.is_none();
        let summary = authored_summary.unwrap_or_else(|| {
            markdown::first_paragraph(&body)
                .map(|p| markdown::truncate_words(&p, defaults.summary_max_words))
                .unwrap_or_default()
        });

        Ok(Self {
            title,
            date,
            modified,
            category,
            tags,
            slug,
            author,
            summary,
            summary_derived,
            status,
            cover,
            kind,
            extra,
            body,
            source: source.to_path_buf(),
        })
    }

    /// True for published documents.
    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }

    /// True for drafts.
    pub fn is_draft(&self) -> bool {
        self.status == Status::Draft
    }

    /// True for articles.
    pub fn is_article(&self) -> bool {
        self.kind == DocumentKind::Article
    }

    /// True for pages.
    pub fn is_page(&self) -> bool {
        self.kind == DocumentKind::Page
    }

    /// Whether the post carries `tag` (compared by slug, so `Python` matches `python`).
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = slugify(tag);
        self.tags.iter().any(|t| slugify(t) == wanted)
    }

    /// Whether the post is filed under `category` (compared by slug).
    pub fn in_category(&self, category: &str) -> bool {
        let wanted = slugify(category);
        self.category.as_deref().is_some_and(|c| slugify(c) == wanted)
    }

    /// Number of words of prose in the body.
    pub fn word_count(&self) -> usize {
        markdown::word_count(&self.body)
    }

    /// Estimated reading time in minutes.
    pub fn reading_time_minutes(&self) -> usize {
        markdown::reading_time_minutes(self.word_count())
    }

    /// Body rendered to HTML.
    pub fn render_html(&self) -> String {
        markdown::render_html(&self.body)
    }

    /// Headings of the body.
    pub fn headings(&self) -> Vec<Heading> {
        markdown::extract_headings(&self.body)
    }
}

/// Split a comma-separated `Tags` value, trimming items and dropping blanks
/// and repeats.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn in_document(err: Error, field: &str, source: &Path) -> Error {
    match err {
        Error::InvalidData(msg) => {
            Error::invalid_data(format!("{field}: {msg} in {}", source.display()))
        }
        other => other,
    }
}
