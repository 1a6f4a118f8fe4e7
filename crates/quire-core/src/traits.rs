//! Core traits for Quire.
//!
//! The primary trait is [`ConfigProvider`], which tells the rest of Quire
//! where a site's content lives without tying it to one config format.

use std::path::PathBuf;

use crate::Result;

/// Content type key for dated blog articles.
pub const ARTICLES: &str = "articles";

/// Content type key for standalone pages (e.g. "About").
pub const PAGES: &str = "pages";

/// Trait for site configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use quire_core::traits::{ConfigProvider, PAGES};
/// use quire_core::Result;
///
/// #[derive(Clone)]
/// struct BlogConfig {
///     site_dir: PathBuf,
/// }
///
/// impl ConfigProvider for BlogConfig {
///     fn project_name(&self) -> &str {
///         "blog"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.site_dir.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         let content = self.site_dir.join("content");
///         match content_type {
///             PAGES => Ok(content.join("pages")),
///             _ => Ok(content),
///         }
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Root directory of the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g., the
    /// current directory is unavailable).
    fn base_path(&self) -> Result<PathBuf>;

    /// Directory holding documents of the given content type.
    ///
    /// `content_type` is [`ARTICLES`] or [`PAGES`]. Articles are looked up
    /// recursively from the returned directory, so it is usually the content
    /// root itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}
