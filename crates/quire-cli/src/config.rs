//! Configuration for the Quire CLI.
//!
//! Provides the [`QuireConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `QUIRE_CONFIG` environment variable
//! 3. XDG default: `~/.config/quire/config.toml`
//! 4. Built-in defaults
//!
//! `QUIRE_*` environment variables are overlaid on whichever file is found.

use std::path::PathBuf;

use chrono_tz::Tz;
use confyg::{env, Confygery};
use quire_content::dates::parse_timezone;
use quire_content::post::{DEFAULT_CATEGORY, DEFAULT_SUMMARY_WORDS};
use quire_content::PostDefaults;
use quire_core::traits::{ConfigProvider, PAGES};
use quire_core::util::paths::{find_site_root, resolve_against};
use quire_core::{Error, Result};
use quire_corpus::corpus::DEFAULT_PAGES_DIR;
use quire_corpus::urls::{ARTICLE_URL, CATEGORY_URL, PAGE_URL, TAG_URL};
use quire_corpus::UrlScheme;
use serde::{Deserialize, Deserializer, Serialize};

/// Timezone of the site the defaults were taken from.
pub const DEFAULT_TIMEZONE: &str = "Europe/Warsaw";

/// Resolved, checked site settings that content commands run with.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Fallbacks for documents with missing metadata.
    pub defaults: PostDefaults,
    /// Permalink templates.
    pub urls: UrlScheme,
    /// Timezone document dates are written in.
    pub timezone: Tz,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            defaults: PostDefaults::default(),
            urls: UrlScheme::default(),
            timezone: chrono_tz::Europe::Warsaw,
        }
    }
}

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Quire CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuireConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Root of the site checkout.
    pub base_path: Option<String>,

    /// Where documents live.
    pub content: ContentConfig,

    /// Site-wide metadata defaults.
    pub site: SiteConfig,

    /// Permalink templates.
    pub urls: UrlConfig,
}

/// Content location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content directory, relative to the base path unless absolute.
    pub path: Option<String>,

    /// Pages directory, relative to the content directory.
    pub pages_dir: String,
}

/// Site metadata and fallbacks for documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name.
    pub name: Option<String>,

    /// Author for documents without an `Author` key.
    pub default_author: Option<String>,

    /// Category for articles without a `Category` key.
    pub default_category: String,

    /// IANA timezone that document dates are written in.
    pub timezone: String,

    /// Word limit for summaries derived from the body.
    ///
    /// Also accepts a numeric string, which is how `QUIRE_SITE_SUMMARY_MAX_WORDS`
    /// arrives from the environment.
    #[serde(deserialize_with = "usize_or_numeric_string")]
    pub summary_max_words: usize,
}

/// URL templates.
///
/// Document templates take `{slug}`, `{category}` and `{date:<strftime>}`;
/// taxonomy templates take `{slug}` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Article permalink template.
    pub article: String,

    /// Page permalink template.
    pub page: String,

    /// Category listing template.
    pub category: String,

    /// Tag listing template.
    pub tag: String,
}

/// Environment overlays arrive as strings; TOML files give integers.
fn usize_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text.trim().parse().map_err(|e| {
            serde::de::Error::custom(format!("expected a whole number, got '{text}': {e}"))
        }),
    }
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for QuireConfig {
    fn default() -> Self {
        Self {
            project_name: "quire".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            site: SiteConfig::default(),
            urls: UrlConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            pages_dir: DEFAULT_PAGES_DIR.to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: None,
            default_author: None,
            default_category: DEFAULT_CATEGORY.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            summary_max_words: DEFAULT_SUMMARY_WORDS,
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            article: ARTICLE_URL.to_string(),
            page: PAGE_URL.to_string(),
            category: CATEGORY_URL.to_string(),
            tag: TAG_URL.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl QuireConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("QUIRE");
        env_opts.add_section("content");
        env_opts.add_section("site");
        env_opts.add_section("urls");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("QUIRE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quire").join("config.toml"))
    }

    /// Replace the content directory (the `--content` flag).
    pub fn with_content_path(mut self, path: impl Into<String>) -> Self {
        self.content.path = Some(path.into());
        self
    }

    /// Fallbacks for documents with missing metadata.
    pub fn post_defaults(&self) -> PostDefaults {
        PostDefaults {
            default_author: self.site.default_author.clone(),
            default_category: self.site.default_category.clone(),
            summary_max_words: self.site.summary_max_words,
        }
    }

    /// Permalink templates, checked.
    pub fn url_scheme(&self) -> Result<UrlScheme> {
        UrlScheme::new(
            self.urls.article.as_str(),
            self.urls.page.as_str(),
            self.urls.category.as_str(),
            self.urls.tag.as_str(),
        )
    }

    /// The site timezone.
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.site.timezone)
    }

    /// Everything content commands need, checked up front.
    pub fn site_options(&self) -> Result<SiteOptions> {
        Ok(SiteOptions {
            defaults: self.post_defaults(),
            urls: self.url_scheme()?,
            timezone: self.timezone()?,
        })
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `QUIRE_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "QUIRE", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for QuireConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The configured base path (relative to the working directory), else
    /// the nearest site root above the working directory, else the working
    /// directory itself. Always absolute.
    fn base_path(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::config(format!("Could not determine base path: {e}")))?;
        match &self.base_path {
            Some(p) => Ok(resolve_against(&cwd, p)),
            None => Ok(find_site_root(&cwd).unwrap_or(cwd)),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        let root = match &self.content.path {
            Some(p) => resolve_against(&self.base_path()?, p),
            None => self.base_path()?.join("content"),
        };
        match content_type {
            PAGES => Ok(root.join(&self.content.pages_dir)),
            _ => Ok(root),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
