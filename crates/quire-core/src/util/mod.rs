//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async content file discovery and reading
//! - [`paths`]: Site-root discovery and path normalisation

pub mod files;
pub mod paths;
