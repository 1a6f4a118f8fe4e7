//! Corpus validation and integrity checking.
//!
//! Detects documents that failed to load, duplicate or malformed slugs, and
//! softer problems such as untagged articles or future-dated posts.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use quire_content::{is_url_safe, DocumentKind, Post};
use serde::{Deserialize, Serialize};

use crate::corpus::LoadReport;

// ============================================================================
// Types
// ============================================================================

/// Result of corpus validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the corpus is valid (no errors).
    pub valid: bool,
    /// Problems that must be fixed.
    pub errors: Vec<ValidationIssue>,
    /// Problems worth a look.
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add an error (marks the corpus as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Add an informational finding.
    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether an issue with `code` was reported at any level.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
            .any(|i| i.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the corpus.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue type/code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected documents, as `slug (path)` or a bare path.
    pub documents: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            documents: Vec::new(),
        }
    }

    /// Attach affected documents.
    pub fn with_documents(mut self, documents: Vec<String>) -> Self {
        self.documents = documents;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a loaded corpus against the current local time.
pub fn validate_corpus(report: &LoadReport) -> ValidationResult {
    validate_corpus_at(report, chrono::Local::now().naive_local())
}

/// Validate a loaded corpus, treating `now` as the present.
///
/// Errors: `PARSE_FAILURE`, `DUPLICATE_SLUG`, `INVALID_SLUG`.
/// Warnings: `MISSING_SUMMARY`, `NO_TAGS`, `FUTURE_DATE`, `MODIFIED_BEFORE_DATE`.
/// Info: `DRAFTS`.
pub fn validate_corpus_at(report: &LoadReport, now: NaiveDateTime) -> ValidationResult {
    let mut result = ValidationResult::new();
    let corpus = &report.corpus;

    check_load_failures(report, &mut result);
    check_duplicate_slugs(corpus.articles(), DocumentKind::Article, &mut result);
    check_duplicate_slugs(corpus.pages(), DocumentKind::Page, &mut result);
    check_slug_format(corpus.posts(), &mut result);
    check_summaries(corpus.posts(), &mut result);
    check_tags(corpus.articles(), &mut result);
    check_future_dates(corpus.articles(), now, &mut result);
    check_modified_dates(corpus.posts(), &mut result);
    report_drafts(corpus.posts(), &mut result);

    result
}

/// Quick check if the corpus has any validation errors.
pub fn is_valid(report: &LoadReport) -> bool {
    validate_corpus(report).valid
}

// ============================================================================
// Individual checks
// ============================================================================

fn describe(post: &Post) -> String {
    format!("{} ({})", post.slug, post.source.display())
}

fn check_load_failures(report: &LoadReport, result: &mut ValidationResult) {
    if report.failures.is_empty() {
        return;
    }
    let documents = report
        .failures
        .iter()
        .map(|f| format!("{}: {}", f.path.display(), f.message))
        .collect();
    result.add_error(
        ValidationIssue::new(
            "PARSE_FAILURE",
            format!("{} document(s) could not be loaded", report.failures.len()),
        )
        .with_documents(documents),
    );
}

/// Slugs must be unique among documents of the same kind.
fn check_duplicate_slugs(posts: &[Post], kind: DocumentKind, result: &mut ValidationResult) {
    let mut by_slug: BTreeMap<&str, Vec<&Post>> = BTreeMap::new();
    for post in posts {
        by_slug.entry(post.slug.as_str()).or_default().push(post);
    }

    for (slug, group) in by_slug.into_iter().filter(|(_, g)| g.len() > 1) {
        result.add_error(
            ValidationIssue::new(
                "DUPLICATE_SLUG",
                format!("{} {kind}s share the slug '{slug}'", group.len()),
            )
            .with_documents(group.into_iter().map(describe).collect()),
        );
    }
}

fn check_slug_format<'a>(posts: impl Iterator<Item = &'a Post>, result: &mut ValidationResult) {
    let invalid: Vec<String> = posts.filter(|p| !is_url_safe(&p.slug)).map(describe).collect();
    if !invalid.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "INVALID_SLUG",
                format!("{} slug(s) are not lowercase kebab-case", invalid.len()),
            )
            .with_documents(invalid),
        );
    }
}

fn check_summaries<'a>(posts: impl Iterator<Item = &'a Post>, result: &mut ValidationResult) {
    let derived: Vec<String> = posts
        .filter(|p| p.is_article() && p.summary_derived)
        .map(describe)
        .collect();
    if !derived.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "MISSING_SUMMARY",
                format!("{} article(s) have no Summary; one was derived from the body", derived.len()),
            )
            .with_documents(derived),
        );
    }
}

fn check_tags(articles: &[Post], result: &mut ValidationResult) {
    let untagged: Vec<String> = articles
        .iter()
        .filter(|p| p.tags.is_empty())
        .map(describe)
        .collect();
    if !untagged.is_empty() {
        result.add_warning(
            ValidationIssue::new("NO_TAGS", format!("{} article(s) have no tags", untagged.len()))
                .with_documents(untagged),
        );
    }
}

fn check_future_dates(articles: &[Post], now: NaiveDateTime, result: &mut ValidationResult) {
    let future: Vec<String> = articles
        .iter()
        .filter(|p| p.is_published() && p.date.is_some_and(|d| d > now))
        .map(describe)
        .collect();
    if !future.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "FUTURE_DATE",
                format!("{} published article(s) are dated in the future", future.len()),
            )
            .with_documents(future),
        );
    }
}

fn check_modified_dates<'a>(posts: impl Iterator<Item = &'a Post>, result: &mut ValidationResult) {
    let backwards: Vec<String> = posts
        .filter(|p| matches!((p.date, p.modified), (Some(d), Some(m)) if m < d))
        .map(describe)
        .collect();
    if !backwards.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "MODIFIED_BEFORE_DATE",
                format!("{} document(s) were modified before they were written", backwards.len()),
            )
            .with_documents(backwards),
        );
    }
}

fn report_drafts<'a>(posts: impl Iterator<Item = &'a Post>, result: &mut ValidationResult) {
    let drafts: Vec<String> = posts.filter(|p| p.is_draft()).map(describe).collect();
    if !drafts.is_empty() {
        result.add_info(
            ValidationIssue::new("DRAFTS", format!("{} draft(s)", drafts.len()))
                .with_documents(drafts),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_support::*;
    use crate::corpus::{Corpus, LoadFailure};
    use quire_content::dates::parse_date;
    use std::path::PathBuf;

    fn now() -> NaiveDateTime {
        parse_date("2024-01-01").unwrap()
    }

    fn report(posts: Vec<Post>) -> LoadReport {
        LoadReport {
            corpus: Corpus::from_posts(posts),
            failures: Vec::new(),
        }
    }

    fn valid_posts() -> Vec<Post> {
        vec![
            article("ilp", "2021-03-14", "optimization", "Math"),
            article("floats", "2021-05-02", "python", "Programming"),
            page("about", "About"),
        ]
    }

    #[test]
    fn test_validate_valid_corpus() {
        let result = validate_corpus_at(&report(valid_posts()), now());
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert!(result.info.is_empty());
    }

    #[test]
    fn test_validate_empty_corpus() {
        let result = validate_corpus_at(&LoadReport::default(), now());
        assert!(result.valid);
        assert_eq!(result.total_issues(), 0);
    }

    #[test]
    fn test_duplicate_article_slugs() {
        let mut posts = valid_posts();
        posts.push(article("floats", "2022-01-01", "python", "Programming"));
        let result = validate_corpus_at(&report(posts), now());

        assert!(!result.valid);
        let issue = &result.errors[0];
        assert_eq!(issue.code, "DUPLICATE_SLUG");
        assert_eq!(issue.documents.len(), 2);
        assert!(issue.message.contains("'floats'"));
    }

    #[test]
    fn test_article_and_page_may_share_slug() {
        let mut posts = valid_posts();
        posts.push(article("about", "2021-01-01", "meta", "misc"));
        let result = validate_corpus_at(&report(posts), now());
        assert!(result.valid);
    }

    #[test]
    fn test_duplicate_page_slugs() {
        let mut posts = valid_posts();
        posts.push(page("about", "About me"));
        let result = validate_corpus_at(&report(posts), now());
        assert!(!result.valid);
        assert!(result.errors[0].message.contains("pages"));
    }

    #[test]
    fn test_invalid_slug() {
        let mut posts = valid_posts();
        let mut bad = article("x", "2021-01-01", "t", "c");
        bad.slug = "Not_Safe".into();
        posts.push(bad);
        let result = validate_corpus_at(&report(posts), now());
        assert!(!result.valid);
        assert!(result.has_code("INVALID_SLUG"));
    }

    #[test]
    fn test_parse_failures_are_errors() {
        let mut report = report(valid_posts());
        report.failures.push(LoadFailure {
            path: PathBuf::from("content/broken.md"),
            kind: DocumentKind::Article,
            message: "Missing required field 'Title' in content/broken.md".into(),
        });
        let result = validate_corpus_at(&report, now());
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, "PARSE_FAILURE");
        assert!(result.errors[0].documents[0].contains("Title"));
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut untagged = article("untagged", "2021-01-01", "", "misc");
        untagged.summary_derived = true;
        let future = article("future", "2030-01-01", "t", "c");
        let mut backwards = article("backwards", "2021-06-01", "t", "c");
        backwards.modified = Some(parse_date("2021-01-01").unwrap());

        let result = validate_corpus_at(&report(vec![untagged, future, backwards]), now());
        assert!(result.valid);
        assert!(result.has_code("NO_TAGS"));
        assert!(result.has_code("MISSING_SUMMARY"));
        assert!(result.has_code("FUTURE_DATE"));
        assert!(result.has_code("MODIFIED_BEFORE_DATE"));
        assert_eq!(result.total_issues(), 4);
    }

    #[test]
    fn test_future_drafts_are_fine() {
        let result = validate_corpus_at(&report(vec![draft("wip", "2030-01-01")]), now());
        assert!(!result.has_code("FUTURE_DATE"));
        assert!(result.has_code("DRAFTS"));
        assert_eq!(result.info[0].documents.len(), 1);
    }

    #[test]
    fn test_validation_result_add_error() {
        let mut result = ValidationResult::new();
        assert!(result.valid);
        result.add_error(ValidationIssue::new("TEST", "boom"));
        assert!(!result.valid);
        assert_eq!(result.total_issues(), 1);
    }
}
