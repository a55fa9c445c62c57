//! Command-line interface for the Lumen site backend.
//!
//! - [`CliArgs`]: clap argument tree
//! - [`LumenConfig`]: file, env, and default configuration
//! - [`LumenCli`]: logging setup and command dispatch

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod post_handlers;

pub use app::LumenCli;
pub use cli::CliArgs;
pub use config::LumenConfig;

#[cfg(test)]
pub(crate) mod test_support;
