//! Front-matter extraction.
//!
//! Documents open with a block of `Key: value` lines ended by a blank line:
//!
//! ```text
//! Title: Solving puzzles with integer programming
//! Date: 2021-03-14 10:20
//! Tags: optimization, python
//! Summary: How a handful of linear constraints
//!     can describe a sudoku.
//!
//! The body starts here.
//! ```
//!
//! Keys are case-insensitive and stored lower-cased. Lines indented by four
//! or more spaces (or a tab) continue the previous value.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}([A-Za-z0-9_-]+):\s*(.*)$").expect("valid key regex")
});

static CONTINUATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?: {4,}|\t)\s*(.*)$").expect("valid continuation regex"));

/// Parsed front matter plus the body that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
    order: Vec<String>,
    body: String,
}

impl FrontMatter {
    /// Value for `key`, looked up case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Value for `key`, or None when it is missing or blank.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Whether `key` is present (even with an empty value).
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(&key.to_ascii_lowercase())
    }

    /// Keys in the order they first appeared.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Key/value pairs in the order the keys first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|k| self.fields.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the document has no header at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Markdown body following the header.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the front matter, returning the body.
    pub fn into_body(self) -> String {
        self.body
    }

    fn insert(&mut self, key: &str, value: String) {
        let key = key.to_ascii_lowercase();
        if self.fields.insert(key.clone(), value).is_some() {
            log::warn!("Front-matter key '{key}' repeated; keeping the last value");
        } else {
            self.order.push(key);
        }
    }

    fn append(&mut self, key: &str, more: &str) {
        if more.is_empty() {
            return;
        }
        if let Some(value) = self.fields.get_mut(key) {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(more);
        }
    }
}

/// Split `text` into its front matter and body.
///
/// Parsing never fails: a document without a header yields an empty
/// [`FrontMatter`] whose body is the entire text, and a header that is cut
/// short by a non-header line leaves that line at the start of the body.
pub fn parse_front_matter(text: &str) -> FrontMatter {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut front = FrontMatter::default();
    let mut last_key: Option<String> = None;
    let mut consumed = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);

        if trimmed.trim().is_empty() {
            if last_key.is_some() {
                consumed += line.len();
            }
            break;
        }

        if let Some(key) = &last_key {
            if let Some(caps) = CONTINUATION_LINE.captures(trimmed) {
                let more = caps.get(1).map_or("", |m| m.as_str()).trim();
                front.append(key, more);
                consumed += line.len();
                continue;
            }
        }

        match KEY_LINE.captures(trimmed) {
            Some(caps) => {
                let key = caps.get(1).map_or("", |m| m.as_str());
                let value = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                front.insert(key, value);
                last_key = Some(key.to_ascii_lowercase());
                consumed += line.len();
            }
            None => break,
        }
    }

    front.body = text[consumed..].to_string();
    front
}
