//! Async file utilities for the Lumen crates.
//!
//! Provides the file discovery and reading operations the content loaders
//! build on.

use async_walkdir::{Filtering, WalkDir};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extension to match (without dot), e.g., "mdx"
    pub extension: Option<String>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Match files with the given extension.
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: Some(extension.into()),
            max_depth: None,
        }
    }

    /// Options for MDX content files.
    pub fn mdx() -> Self {
        Self::with_extension("mdx")
    }

    /// Set maximum search depth. A depth of 1 means direct children only.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory.
///
/// Results are ordered by relative path so that repeated calls over the
/// same directory enumerate files identically.
///
/// # Example
///
/// ```no_run
/// # use lumen_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let posts = find_all_files(
///     Path::new("content/blog"),
///     FindOptions::mdx().with_max_depth(1),
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();
    let mut walker = walker(base_path, options.max_depth);

    while let Some(entry_result) = walker.next().await {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) if e.path() == Some(base_path) => {
                return Err(Error::io(std::io::Error::other(e.to_string())));
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        let path = entry.path();

        // Skip directories
        if path.is_dir() {
            continue;
        }

        // Check extension if specified
        if let Some(ext) = options.extension.as_deref() {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            log::debug!("Skipping file with non UTF-8 name: {}", path.display());
            continue;
        };

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        files.push(FileInfo {
            stem: stem.to_string(),
            path: path.to_path_buf(),
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

/// Walk `base_path`, never descending below `max_depth`.
fn walker(base_path: &Path, max_depth: Option<usize>) -> WalkDir {
    let walk = WalkDir::new(base_path);
    let Some(max_depth) = max_depth else {
        return walk;
    };

    let root = base_path.to_path_buf();
    walk.filter(move |entry| {
        let depth = entry
            .path()
            .strip_prefix(&root)
            .map(|p| p.components().count())
            .unwrap_or(0);
        async move {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if is_dir && depth >= max_depth {
                Filtering::IgnoreDir
            } else {
                Filtering::Continue
            }
        }
    })
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
