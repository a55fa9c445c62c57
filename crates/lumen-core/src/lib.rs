//! Shared errors, traits, and utilities for the Lumen crates.
//!
//! This crate provides the foundational types used across all Lumen crates.
//! It has no internal Lumen dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Core traits for configuration abstraction
//! - [`util`]: File, path, and HTML utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::html::escape_html;
