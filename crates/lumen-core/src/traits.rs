//! Core traits for Lumen configuration abstraction.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where the site's
//! data lives so that loaders and servers never read the environment
//! directly.

use std::path::PathBuf;

use crate::Result;

/// Trait for site configuration.
///
/// Implemented by the CLI's file/env-backed configuration and by test
/// fixtures that point at temporary directories.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use lumen_core::traits::ConfigProvider;
/// use lumen_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "lumen"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.root.join("content").join(content_type))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all site data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g., the working
    /// directory is unavailable).
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type.
    ///
    /// `content_type` is a corpus key such as `"blog"`. The implementation
    /// decides how to map it to a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}
