//! Post types.
//!
//! [`PostMeta`] is the list-level projection and never carries a body;
//! [`Post`] is the detail-level entity and always does.

use serde::{Deserialize, Serialize};

use crate::frontmatter::PostFrontmatter;

/// Words per minute used by [`estimate_read_time`].
pub const WORDS_PER_MINUTE: usize = 200;

/// Metadata for one post, without its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// Unique identifier, the file name minus its extension.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Publication date as written in the frontmatter.
    pub date: String,
    /// Author name.
    pub author: String,
    /// Classification tag.
    pub category: String,
    /// Free-form tags, in frontmatter order.
    pub tags: Vec<String>,
    /// Hero image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Thumbnail path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Reading time for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
}

impl PostMeta {
    /// Build metadata from a slug and parsed frontmatter, defaulting
    /// missing strings to empty and missing tags to an empty list.
    pub fn from_frontmatter(slug: impl Into<String>, fm: PostFrontmatter) -> Self {
        Self {
            slug: slug.into(),
            title: fm.title.unwrap_or_default(),
            description: fm.description.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            author: fm.author.unwrap_or_default(),
            category: fm.category.unwrap_or_default(),
            tags: fm.tags.unwrap_or_default(),
            image: fm.image,
            thumbnail: fm.thumbnail,
            read_time: fm.read_time,
        }
    }
}

/// A full post: metadata plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post metadata.
    #[serde(flatten)]
    pub meta: PostMeta,
    /// Raw MDX body.
    pub content: String,
}

impl Post {
    /// The post's slug.
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    /// Drop the body, keeping the list-level projection.
    pub fn into_meta(self) -> PostMeta {
        self.meta
    }
}

/// A category and how many posts it holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Category name as written in frontmatter.
    pub name: String,
    /// Number of posts in the category.
    pub count: usize,
}

/// Estimate reading time for a body at [`WORDS_PER_MINUTE`], never less
/// than one minute.
pub fn estimate_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
