//! Command-line interface for Quire.
//!
//! # Key Abstractions
//!
//! - [`QuireCli`]: The application, generic over a config provider
//! - [`QuireConfig`]: TOML/env configuration loaded with `confyg`
//! - [`CliArgs`]: clap argument definitions

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod post_handlers;

pub use app::QuireCli;
pub use cli::{BaseCommand, CliArgs, ConfigAction, ConfigCommand};
pub use config::{QuireConfig, SiteOptions};
