//! Markdown parsing, front-matter extraction, and content utilities.
//!
//! This crate turns a single document (front matter plus Markdown body)
//! into a typed [`Post`].
//!
//! # Modules
//!
//! - [`frontmatter`]: `Key: value` header extraction
//! - [`post`]: The document model
//! - [`slug`]: Slug derivation and validation
//! - [`dates`]: Date parsing and timezone handling
//! - [`markdown`]: HTML rendering and text extraction
//! - [`reader`]: Reading documents from disk

#![doc = include_str!("../README.md")]

pub mod dates;
pub mod frontmatter;
pub mod markdown;
pub mod post;
pub mod reader;
pub mod slug;

pub use frontmatter::{parse_front_matter, FrontMatter};
pub use post::{DocumentKind, Post, PostDefaults, Status};
pub use reader::{parse_document, read_document};
pub use slug::{is_url_safe, slugify, validate_slug};
