//! File-backed post corpus.
//!
//! One file per post directly under the corpus directory; the file name
//! minus its extension is the slug. Every call re-reads the directory, so
//! there is no cache to invalidate.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::traits::ConfigProvider;
use lumen_core::util::files::{FindOptions, exists, find_all_files, read_file};
use lumen_core::Result;

use crate::frontmatter::{FrontmatterParser, YamlFrontmatter};
use crate::post::{Post, PostMeta, estimate_read_time};
use crate::provider::PostProvider;

/// Content type key passed to [`ConfigProvider::content_path`].
pub const BLOG_CONTENT_TYPE: &str = "blog";

/// Default post file extension.
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Read-only blog corpus backed by a directory of frontmatter files.
#[derive(Clone)]
pub struct PostStore {
    dir: PathBuf,
    extension: String,
    parser: Arc<dyn FrontmatterParser>,
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStore")
            .field("dir", &self.dir)
            .field("extension", &self.extension)
            .field("parser", &self.parser.name())
            .finish()
    }
}

impl PostStore {
    /// Create a store over `dir` reading `.mdx` files with YAML frontmatter.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            parser: Arc::new(YamlFrontmatter),
        }
    }

    /// Create a store at the configured blog content path.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.content_path(BLOG_CONTENT_TYPE)?))
    }

    /// Use a different file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use a different frontmatter parser.
    pub fn with_parser(mut self, parser: Arc<dyn FrontmatterParser>) -> Self {
        self.parser = parser;
        self
    }

    /// The corpus directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.{}", self.extension))
    }

    async fn load_meta(&self, path: &Path, slug: &str) -> Result<PostMeta> {
        let text = read_file(path).await?;
        let doc = self.parser.parse(&text)?;
        Ok(PostMeta::from_frontmatter(slug, doc.metadata))
    }
}

/// A slug must name a file directly inside the corpus directory.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
}

#[async_trait]
impl PostProvider for PostStore {
    async fn list_all(&self) -> Result<Vec<PostMeta>> {
        if !exists(&self.dir).await {
            log::debug!("Blog directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let options = FindOptions::with_extension(self.extension.as_str()).with_max_depth(1);
        let files = find_all_files(&self.dir, options).await?;

        let mut posts = Vec::with_capacity(files.len());
        for file in files {
            match self.load_meta(&file.path, &file.stem).await {
                Ok(meta) => posts.push(meta),
                Err(e) => log::warn!("Skipping post {}: {e}", file.path.display()),
            }
        }

        // String comparison on purpose; ties keep file order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn get_one(&self, slug: &str) -> Result<Option<Post>> {
        if !is_valid_slug(slug) {
            log::debug!("Rejected post slug {slug:?}");
            return Ok(None);
        }

        let path = self.post_path(slug);
        if !exists(&path).await {
            return Ok(None);
        }

        let doc = match read_file(&path).await.and_then(|text| self.parser.parse(&text)) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Unreadable post {}: {e}", path.display());
                return Ok(None);
            }
        };

        let mut meta = PostMeta::from_frontmatter(slug, doc.metadata);
        if meta.read_time.is_none() {
            meta.read_time = Some(estimate_read_time(&doc.body));
        }

        Ok(Some(Post {
            meta,
            content: doc.body,
        }))
    }
}
