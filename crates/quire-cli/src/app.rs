//! The `quire` application.
//!
//! [`QuireCli`] ties parsed arguments, a [`ConfigProvider`] and the resolved
//! [`SiteOptions`] together and dispatches to the handlers.

use std::sync::Arc;

use quire_core::traits::ConfigProvider;
use quire_core::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::{BaseCommand, CliArgs};
use crate::config::{QuireConfig, SiteOptions};
use crate::config_handlers;
use crate::post_handlers::{self, ListOptions};

// ============================================================================
// QuireCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct QuireCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    site: SiteOptions,
    version: String,
}

impl QuireCli<QuireConfig> {
    /// Create from CLI args, loading config from file/env.
    ///
    /// `--content` replaces the configured content directory.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = QuireConfig::load(args.config.as_deref())?;
        if let Some(content) = &args.content {
            config = config.with_content_path(content.as_str());
        }
        let site = config.site_options()?;
        Ok(Self::new(name, config).with_site(site))
    }
}

impl<C: ConfigProvider> QuireCli<C> {
    /// Create a new CLI application with default site options.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            site: SiteOptions::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Replace the site options.
    pub fn with_site(mut self, site: SiteOptions) -> Self {
        self.site = site;
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Site options content commands run with.
    pub fn site(&self) -> &SiteOptions {
        &self.site
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// `log` records from the library crates are forwarded to the same
    /// subscriber.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        tracing::debug!(project = self.config.project_name(), command = ?args.command, "dispatching");

        let config = &*self.config;
        let site = &self.site;

        match args.command {
            Some(BaseCommand::Check { strict }) => {
                post_handlers::handle_check(config, site, strict).await
            }
            Some(BaseCommand::List {
                tag,
                category,
                drafts,
                pages,
                json,
            }) => {
                let options = ListOptions {
                    tag,
                    category,
                    drafts,
                    pages,
                    json,
                };
                post_handlers::handle_list(config, site, options).await
            }
            Some(BaseCommand::Show { slug, page, json }) => {
                post_handlers::handle_show(config, site, &slug, page, json).await
            }
            Some(BaseCommand::Render { slug, page, output }) => {
                post_handlers::handle_render(config, site, &slug, page, output).await
            }
            Some(BaseCommand::Stats { json }) => {
                post_handlers::handle_stats(config, site, json).await
            }
            Some(BaseCommand::Tags) => post_handlers::handle_tags(config, site).await,
            Some(BaseCommand::Categories) => post_handlers::handle_categories(config, site).await,
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(BaseCommand::Health) => self.health(),
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Report whether the content directory is reachable.
    fn health(&self) -> Result<()> {
        let content = self.config.content_path(quire_core::traits::ARTICLES)?;
        if content.is_dir() {
            println!("{}: healthy (content at {})", self.name, content.display());
        } else {
            println!(
                "{}: content directory {} not found",
                self.name,
                content.display()
            );
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use quire_core::traits::PAGES;
    use std::path::PathBuf;

    #[derive(Clone)]
    struct TestConfig {
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-blog"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, content_type: &str) -> Result<PathBuf> {
            match content_type {
                PAGES => Ok(self.base.join("pages")),
                _ => Ok(self.base.clone()),
            }
        }
    }

    fn site_with_post() -> (tempfile::TempDir, TestConfig) {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("hello.md"),
            "Title: Hello\nDate: 2021-01-01\nTags: misc\nAuthor: A\nSummary: s\n\nHi.\n",
        )
        .unwrap();
        let config = TestConfig {
            base: dir.path().to_path_buf(),
        };
        (dir, config)
    }

    #[test]
    fn test_quire_cli_new() {
        let (_dir, config) = site_with_post();
        let cli = QuireCli::new("quire", config).with_version("1.2.3");
        assert_eq!(cli.name, "quire");
        assert_eq!(cli.version, "1.2.3");
        assert_eq!(cli.config().project_name(), "test-blog");
        assert_eq!(cli.site().timezone, chrono_tz::Europe::Warsaw);
    }

    #[tokio::test]
    async fn test_run_info_commands() {
        let (_dir, config) = site_with_post();
        let cli = QuireCli::new("quire", config);
        for argv in [vec!["quire"], vec!["quire", "version"], vec!["quire", "health"]] {
            assert!(cli.run(CliArgs::parse_from(argv)).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_run_content_commands() {
        let (_dir, config) = site_with_post();
        let cli = QuireCli::new("quire", config);
        for argv in [
            vec!["quire", "check", "--strict"],
            vec!["quire", "list", "--json"],
            vec!["quire", "show", "hello"],
            vec!["quire", "render", "hello"],
            vec!["quire", "stats"],
            vec!["quire", "tags"],
            vec!["quire", "categories"],
        ] {
            let result = cli.run(CliArgs::parse_from(argv.clone())).await;
            assert!(result.is_ok(), "{argv:?}: {result:?}");
        }
    }

    #[tokio::test]
    async fn test_run_show_unknown_slug() {
        let (_dir, config) = site_with_post();
        let cli = QuireCli::new("quire", config);
        let result = cli.run(CliArgs::parse_from(["quire", "show", "nope"])).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_run_config_command_dispatch() {
        let (_dir, config) = site_with_post();
        let cli = QuireCli::new("quire", config);
        let args = CliArgs::parse_from(["quire", "--config", "/tmp/quire.toml", "config", "path"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        let (_dir, config) = site_with_post();
        let cli = QuireCli::new("quire", config);
        cli.init_logging(false, false);
        cli.init_logging(true, false);
        cli.init_logging(false, true);
    }

    // ------------------------------------------------------------------------
    // QuireConfig integration
    // ------------------------------------------------------------------------

    #[test]
    fn test_from_args_with_file_and_content_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "project_name = \"from-file\"\n[site]\ntimezone = \"UTC\"\n",
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "quire",
            "--config",
            path.to_str().unwrap(),
            "--content",
            "/srv/blog/content",
        ]);
        let cli = QuireCli::from_args("quire", &args).unwrap();
        assert_eq!(cli.config().project_name(), "from-file");
        assert_eq!(cli.site().timezone, chrono_tz::UTC);
        assert_eq!(
            cli.config()
                .content_path(quire_core::traits::ARTICLES)
                .unwrap(),
            PathBuf::from("/srv/blog/content")
        );
    }

    #[test]
    fn test_from_args_rejects_bad_timezone() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[site]\ntimezone = \"Atlantis/Capital\"\n").unwrap();

        let args = CliArgs::parse_from(["quire", "--config", path.to_str().unwrap()]);
        assert!(QuireCli::from_args("quire", &args).is_err());
    }
}
