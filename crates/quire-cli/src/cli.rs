//! CLI argument parsing and command definitions.
//!
//! Global flags (configuration, verbosity, content directory) plus the
//! `quire` subcommands: check, list, show, render, stats, tags, categories,
//! version, health and config.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "QUIRE_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Content directory (overrides the configured path).
    #[arg(long, global = true)]
    pub content: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Load and validate every document.
    Check {
        /// Treat warnings as failures.
        #[arg(long)]
        strict: bool,
    },

    /// List documents, newest first.
    List {
        /// Only documents with this tag.
        #[arg(short, long)]
        tag: Option<String>,

        /// Only documents in this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Include drafts and hidden pages.
        #[arg(long)]
        drafts: bool,

        /// List pages instead of articles.
        #[arg(long)]
        pages: bool,

        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one document's metadata.
    Show {
        /// Document slug.
        slug: String,

        /// Look the slug up among pages only.
        #[arg(long)]
        page: bool,

        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a document body to HTML.
    Render {
        /// Document slug.
        slug: String,

        /// Look the slug up among pages only.
        #[arg(long)]
        page: bool,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show corpus statistics.
    Stats {
        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },

    /// List tags with article counts.
    Tags,

    /// List categories with article counts.
    Categories,

    /// Print version information.
    Version,

    /// Check system health.
    Health,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "site.timezone").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "site.timezone").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["quire"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.content.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_flags() {
        let args = CliArgs::parse_from(["quire", "--verbose", "--config", "/tmp/q.toml"]);
        assert!(args.verbose);
        assert_eq!(args.config, Some("/tmp/q.toml".to_string()));
    }

    #[test]
    fn test_content_flag_after_subcommand() {
        let args = CliArgs::parse_from(["quire", "check", "--content", "site/content"]);
        assert_eq!(args.content.as_deref(), Some("site/content"));
        assert!(matches!(args.command, Some(BaseCommand::Check { strict: false })));
    }

    #[test]
    fn test_check_strict() {
        let args = CliArgs::parse_from(["quire", "check", "--strict"]);
        assert!(matches!(args.command, Some(BaseCommand::Check { strict: true })));
    }

    #[test]
    fn test_list_defaults() {
        let args = CliArgs::parse_from(["quire", "list"]);
        match args.command {
            Some(BaseCommand::List {
                tag,
                category,
                drafts,
                pages,
                json,
            }) => {
                assert!(tag.is_none());
                assert!(category.is_none());
                assert!(!drafts);
                assert!(!pages);
                assert!(!json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_filters() {
        let args = CliArgs::parse_from([
            "quire", "list", "--tag", "python", "--category", "Math", "--drafts", "--json",
        ]);
        match args.command {
            Some(BaseCommand::List {
                tag,
                category,
                drafts,
                json,
                ..
            }) => {
                assert_eq!(tag.as_deref(), Some("python"));
                assert_eq!(category.as_deref(), Some("Math"));
                assert!(drafts);
                assert!(json);
            }
            _ => panic!("Expected List command with filters"),
        }
    }

    #[test]
    fn test_show_command() {
        let args = CliArgs::parse_from(["quire", "show", "floating-point", "--json"]);
        match args.command {
            Some(BaseCommand::Show { slug, page, json }) => {
                assert_eq!(slug, "floating-point");
                assert!(!page);
                assert!(json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_render_command() {
        let args = CliArgs::parse_from(["quire", "render", "about", "--page", "-o", "about.html"]);
        match args.command {
            Some(BaseCommand::Render { slug, page, output }) => {
                assert_eq!(slug, "about");
                assert!(page);
                assert_eq!(output.as_deref(), Some("about.html"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_taxonomy_and_info_commands() {
        assert!(matches!(
            CliArgs::parse_from(["quire", "tags"]).command,
            Some(BaseCommand::Tags)
        ));
        assert!(matches!(
            CliArgs::parse_from(["quire", "categories"]).command,
            Some(BaseCommand::Categories)
        ));
        assert!(matches!(
            CliArgs::parse_from(["quire", "stats"]).command,
            Some(BaseCommand::Stats { json: false })
        ));
        assert!(matches!(
            CliArgs::parse_from(["quire", "version"]).command,
            Some(BaseCommand::Version)
        ));
        assert!(matches!(
            CliArgs::parse_from(["quire", "health"]).command,
            Some(BaseCommand::Health)
        ));
    }

    // ------------------------------------------------------------------------
    // Config command tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_get_command() {
        let args = CliArgs::parse_from(["quire", "config", "get", "site.timezone"]);
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Get { key },
            })) => assert_eq!(key, "site.timezone"),
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_config_set_command() {
        let args = CliArgs::parse_from(["quire", "config", "set", "site.summary_max_words", "30"]);
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Set { key, value },
            })) => {
                assert_eq!(key, "site.summary_max_words");
                assert_eq!(value, "30");
            }
            _ => panic!("Expected Config Set command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let args = CliArgs::parse_from(["quire", "config", "init", "--force"]);
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_config_export_docker_env() {
        let args = CliArgs::parse_from(["quire", "config", "export", "--docker-env"]);
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                command: ConfigAction::Export { docker_env },
            })) => assert!(docker_env),
            _ => panic!("Expected Config Export command"),
        }
    }
}
