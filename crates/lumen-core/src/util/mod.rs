//! Utility modules for file operations, path handling, and common helpers.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery and reading utilities
//! - [`html`]: Minimal HTML escaping for interpolated user text
//! - [`paths`]: Path helpers (tilde expansion)

pub mod files;
pub mod html;
pub mod paths;
