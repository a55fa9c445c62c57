//! Blog corpus loading, frontmatter extraction, and related-post scoring.
//!
//! # Features
//!
//! - Frontmatter/body splitting behind the [`FrontmatterParser`] trait
//! - [`PostStore`]: file-backed, read-only post corpus
//! - [`related_to`]: deterministic related-post ranking

#![doc = include_str!("../README.md")]

pub mod frontmatter;
pub mod post;
pub mod provider;
pub mod related;
pub mod store;

pub use frontmatter::{FrontmatterParser, ParsedDocument, PostFrontmatter, YamlFrontmatter};
pub use post::{CategoryInfo, Post, PostMeta, estimate_read_time};
pub use provider::PostProvider;
pub use related::{DEFAULT_RELATED_LIMIT, related_to, score};
pub use store::PostStore;
