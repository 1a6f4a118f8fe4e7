//! Markdown rendering and text extraction.
//!
//! Bodies are CommonMark with the usual extensions (tables, footnotes,
//! strikethrough, task lists) plus `$inline$` and `$$display$$` math.
//! Math is emitted as `<span class="math math-inline">` and
//! `<span class="math math-display">` for a client-side typesetter.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::slug::slugify;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Suffix appended to text shortened by [`truncate_words`].
pub const ELLIPSIS: &str = "…";

/// A heading found in a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Heading text with inline markup removed.
    pub text: String,
    /// Explicit `{#id}` if given, otherwise the slugified text.
    pub anchor: String,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_MATH);
    options
}

/// Render a Markdown body to HTML.
///
/// ```
/// use quire_content::markdown::render_html;
///
/// let html = render_html("Euler: $e^{i\\pi} + 1 = 0$");
/// assert!(html.contains(r#"<span class="math math-inline">"#));
/// ```
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Collect the headings of a body in document order.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((level as u8, id.map(|id| id.to_string()), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, id, text)) = current.take() {
                    let text = text.trim().to_string();
                    let anchor = id.unwrap_or_else(|| slugify(&text));
                    headings.push(Heading {
                        level,
                        text,
                        anchor,
                    });
                }
            }
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Prose of a body with markup removed.
///
/// Paragraphs and other blocks are separated by blank lines. Code blocks and
/// raw HTML are left out; inline code and math are kept.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => out.push_str(&text),
            Event::Code(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                out.push_str(&text)
            }
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => {
                if !out.ends_with("\n\n") && !out.is_empty() {
                    out.push_str("\n\n");
                }
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Text of the first paragraph, or None when the body has none.
pub fn first_paragraph(markdown: &str) -> Option<String> {
    let mut buf: Option<String> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Paragraph) if buf.is_none() => buf = Some(String::new()),
            Event::End(TagEnd::Paragraph) => {
                if let Some(text) = buf.take() {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                if let Some(b) = buf.as_mut() {
                    b.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(b) = buf.as_mut() {
                    b.push(' ');
                }
            }
            _ => {}
        }
    }

    None
}

/// Keep at most `max` whitespace-separated words, appending [`ELLIPSIS`]
/// when anything was cut.
pub fn truncate_words(text: &str, max: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max {
        return words.join(" ");
    }
    let mut out = words[..max].join(" ");
    out.push_str(ELLIPSIS);
    out
}

/// Number of words of prose in a body.
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

/// Estimated reading time in whole minutes; never less than one.
pub fn reading_time_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
