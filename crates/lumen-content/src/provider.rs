//! The [`PostProvider`] trait.
//!
//! HTTP handlers and CLI commands depend on this trait rather than on the
//! file-backed [`PostStore`](crate::PostStore), so a different corpus
//! source can be swapped in without touching them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use lumen_core::Result;

use crate::post::{CategoryInfo, Post, PostMeta};
use crate::related::related_to;

/// Read-only access to the blog corpus.
///
/// Implementors provide [`list_all`](Self::list_all) and
/// [`get_one`](Self::get_one); filtering, category counts, and related-post
/// ranking are derived from those.
#[async_trait]
pub trait PostProvider: Send + Sync {
    /// All post metadata, newest first.
    ///
    /// A missing corpus is an empty list, not an error.
    async fn list_all(&self) -> Result<Vec<PostMeta>>;

    /// A single post with its body, or `None` when no post has this slug.
    async fn get_one(&self, slug: &str) -> Result<Option<Post>>;

    /// Posts whose category equals `category` exactly, newest first.
    async fn list_by_category(&self, category: &str) -> Result<Vec<PostMeta>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|post| post.category == category)
            .collect())
    }

    /// Non-empty categories with post counts, ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryInfo>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for post in self.list_all().await? {
            if !post.category.is_empty() {
                *counts.entry(post.category).or_insert(0) += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(name, count)| CategoryInfo { name, count })
            .collect())
    }

    /// Up to `limit` posts related to the post with `slug`, or `None` when
    /// that post does not exist.
    async fn related(&self, slug: &str, limit: usize) -> Result<Option<Vec<PostMeta>>> {
        let all = self.list_all().await?;
        let Some(subject) = all.iter().find(|post| post.slug == slug) else {
            return Ok(None);
        };
        Ok(Some(
            related_to(subject, &all, limit)
                .into_iter()
                .cloned()
                .collect(),
        ))
    }

    /// Total number of posts.
    async fn count(&self) -> Result<usize> {
        Ok(self.list_all().await?.len())
    }
}
