//! Permalink layout.
//!
//! URL templates use `{slug}`, `{category}` and `{date:<strftime>}`
//! placeholders, e.g. `{date:%Y}/{date:%m}/{slug}.html`. Taxonomy templates
//! (category and tag) only accept `{slug}`.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use quire_content::{slugify, DocumentKind, Post};
use quire_core::{Error, Result};
use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("valid placeholder regex"));

/// Default article URL template.
pub const ARTICLE_URL: &str = "{date:%Y}/{date:%m}/{slug}.html";
/// Default page URL template.
pub const PAGE_URL: &str = "pages/{slug}/";
/// Default category URL template.
pub const CATEGORY_URL: &str = "category/{slug}";
/// Default tag URL template.
pub const TAG_URL: &str = "tag/{slug}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Slug,
    Category,
    Date(String),
}

fn parse_field(name: &str, template: &str, document: bool) -> Result<Field> {
    let field = match name {
        "slug" => Field::Slug,
        "category" if document => Field::Category,
        _ if document && name.starts_with("date:") => {
            let format = &name["date:".len()..];
            if format.is_empty()
                || StrftimeItems::new(format).any(|i| matches!(i, Item::Error))
                || format_date(&NaiveDateTime::default(), format).is_none()
            {
                return Err(Error::invalid_data(format!(
                    "bad date format '{format}' in URL template '{template}'"
                )));
            }
            Field::Date(format.to_string())
        }
        _ => {
            return Err(Error::invalid_data(format!(
                "unsupported placeholder '{{{name}}}' in URL template '{template}'"
            )));
        }
    };
    Ok(field)
}

/// Format a naive date, or None when `format` asks for something a naive
/// date does not carry (offsets and zone names).
fn format_date(date: &NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

fn check_template(template: &str, document: bool) -> Result<()> {
    for caps in PLACEHOLDER.captures_iter(template) {
        parse_field(&caps[1], template, document)?;
    }
    Ok(())
}

/// URL templates for documents and taxonomy listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlScheme {
    article: String,
    page: String,
    category: String,
    tag: String,
}

impl Default for UrlScheme {
    fn default() -> Self {
        Self {
            article: ARTICLE_URL.to_string(),
            page: PAGE_URL.to_string(),
            category: CATEGORY_URL.to_string(),
            tag: TAG_URL.to_string(),
        }
    }
}

impl UrlScheme {
    /// Build a scheme, checking every placeholder up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for unknown placeholders or invalid
    /// strftime formats.
    pub fn new(
        article: impl Into<String>,
        page: impl Into<String>,
        category: impl Into<String>,
        tag: impl Into<String>,
    ) -> Result<Self> {
        let scheme = Self {
            article: article.into(),
            page: page.into(),
            category: category.into(),
            tag: tag.into(),
        };
        check_template(&scheme.article, true)?;
        check_template(&scheme.page, true)?;
        check_template(&scheme.category, false)?;
        check_template(&scheme.tag, false)?;
        Ok(scheme)
    }

    /// URL of an article.
    pub fn article_url(&self, post: &Post) -> Result<String> {
        expand(&self.article, &post.slug, Some(post))
    }

    /// URL of a page.
    pub fn page_url(&self, post: &Post) -> Result<String> {
        expand(&self.page, &post.slug, Some(post))
    }

    /// URL of any document, chosen by its kind.
    pub fn permalink(&self, post: &Post) -> Result<String> {
        match post.kind {
            DocumentKind::Article => self.article_url(post),
            DocumentKind::Page => self.page_url(post),
        }
    }

    /// URL of a category listing.
    pub fn category_url(&self, name: &str) -> Result<String> {
        expand(&self.category, &slugify(name), None)
    }

    /// URL of a tag listing.
    pub fn tag_url(&self, name: &str) -> Result<String> {
        expand(&self.tag, &slugify(name), None)
    }
}

fn expand(template: &str, slug: &str, post: Option<&Post>) -> Result<String> {
    let mut out = String::with_capacity(template.len() + slug.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        match parse_field(&caps[1], template, post.is_some())? {
            Field::Slug => out.push_str(slug),
            Field::Category => {
                let category = post.and_then(|p| p.category.as_deref()).unwrap_or_default();
                out.push_str(&slugify(category));
            }
            Field::Date(format) => {
                let date = post.and_then(|p| p.date).ok_or_else(|| {
                    Error::invalid_data(format!(
                        "URL template '{template}' needs a date but '{slug}' has none"
                    ))
                })?;
                let formatted = format_date(&date, &format).ok_or_else(|| {
                    Error::invalid_data(format!(
                        "cannot format '{slug}' date with '{format}' in URL template '{template}'"
                    ))
                })?;
                out.push_str(&formatted);
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_support::*;

    #[test]
    fn test_default_article_url() {
        let post = article("floating-point", "2021-05-02", "t", "Programming");
        let url = UrlScheme::default().article_url(&post).unwrap();
        assert_eq!(url, "2021/05/floating-point.html");
    }

    #[test]
    fn test_default_page_url() {
        let post = page("about", "About");
        assert_eq!(UrlScheme::default().permalink(&post).unwrap(), "pages/about/");
    }

    #[test]
    fn test_taxonomy_urls_slugify_names() {
        let scheme = UrlScheme::default();
        assert_eq!(scheme.category_url("Machine Learning").unwrap(), "category/machine-learning");
        assert_eq!(scheme.tag_url("Python").unwrap(), "tag/python");
    }

    #[test]
    fn test_custom_scheme_with_category() {
        let scheme = UrlScheme::new(
            "{category}/{date:%Y-%m-%d}-{slug}/",
            PAGE_URL,
            CATEGORY_URL,
            TAG_URL,
        )
        .unwrap();
        let post = article("ilp", "2021-03-14", "t", "Operations Research");
        assert_eq!(
            scheme.permalink(&post).unwrap(),
            "operations-research/2021-03-14-ilp/"
        );
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = UrlScheme::new("{lang}/{slug}", PAGE_URL, CATEGORY_URL, TAG_URL).unwrap_err();
        assert!(err.to_string().contains("{lang}"));
    }

    #[test]
    fn test_taxonomy_template_cannot_use_date() {
        assert!(UrlScheme::new(ARTICLE_URL, PAGE_URL, "{date:%Y}/{slug}", TAG_URL).is_err());
    }

    #[test]
    fn test_bad_strftime_rejected() {
        assert!(UrlScheme::new("{date:%Q}/{slug}", PAGE_URL, CATEGORY_URL, TAG_URL).is_err());
        assert!(UrlScheme::new("{date:}/{slug}", PAGE_URL, CATEGORY_URL, TAG_URL).is_err());
    }

    #[test]
    fn test_offset_formats_rejected() {
        for template in ["{date:%Y%z}/{slug}.html", "{date:%:z}/{slug}", "{date:%Z}/{slug}"] {
            let err = UrlScheme::new(template, PAGE_URL, CATEGORY_URL, TAG_URL).unwrap_err();
            assert!(err.to_string().contains("bad date format"), "{template}: {err}");
        }
    }

    #[test]
    fn test_format_date_without_offset() {
        let date = quire_content::dates::parse_date("2021-03-14 10:20").unwrap();
        assert_eq!(format_date(&date, "%Y/%m/%d").as_deref(), Some("2021/03/14"));
        assert_eq!(format_date(&date, "%Y%z"), None);
    }

    #[test]
    fn test_page_template_with_date_needs_date() {
        let scheme =
            UrlScheme::new(ARTICLE_URL, "{date:%Y}/{slug}/", CATEGORY_URL, TAG_URL).unwrap();
        let err = scheme.page_url(&page("about", "About")).unwrap_err();
        assert!(err.to_string().contains("needs a date"));
    }
}
