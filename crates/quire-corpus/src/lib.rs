//! Corpus-level operations for Quire.
//!
//! Loads a whole content tree and answers questions about it: which
//! documents exist, whether they are consistent, how they are tagged, and
//! where each one lives on the site.
//!
//! # Modules
//!
//! - [`corpus`]: Loading and querying documents
//! - [`validation`]: Integrity checks (unique slugs, required keys, ...)
//! - [`stats`]: Statistics and tag/category indexes
//! - [`neighbors`]: Newer/older article navigation
//! - [`urls`]: Permalink templates

#![doc = include_str!("../README.md")]

pub mod corpus;
pub mod neighbors;
pub mod stats;
pub mod urls;
pub mod validation;

pub use corpus::{Corpus, LoadFailure, LoadOptions, LoadReport};
pub use neighbors::{neighbors, Neighbors};
pub use stats::{category_index, compute_stats, tag_index, CorpusStats, TaxonomyIndex, Term};
pub use urls::UrlScheme;
pub use validation::{
    is_valid, validate_corpus, validate_corpus_at, ValidationIssue, ValidationResult,
};
