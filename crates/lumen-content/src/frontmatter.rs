//! Frontmatter extraction.
//!
//! A post file is a metadata block followed by body text. The split and the
//! metadata format are behind [`FrontmatterParser`] so the store does not
//! care whether the block is YAML or something else.

use lumen_core::{Error, Result};
use serde::Deserialize;

/// Metadata fields recognised in a post's frontmatter.
///
/// Every field is optional here; the store maps absences to defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostFrontmatter {
    /// Display title.
    pub title: Option<String>,
    /// Short summary.
    pub description: Option<String>,
    /// Publication date, usually `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Classification tag.
    pub category: Option<String>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Hero image path.
    pub image: Option<String>,
    /// Thumbnail path.
    pub thumbnail: Option<String>,
    /// Precomputed reading time, e.g. `"4 min read"`.
    #[serde(rename = "readTime")]
    pub read_time: Option<String>,
}

/// A file split into parsed metadata and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Parsed metadata block (defaults when the file has none).
    pub metadata: PostFrontmatter,
    /// Everything after the metadata block.
    pub body: String,
}

/// Splits a content file into metadata and body.
pub trait FrontmatterParser: Send + Sync {
    /// Parse the full text of a content file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when a metadata block is present but
    /// malformed.
    fn parse(&self, text: &str) -> Result<ParsedDocument>;

    /// Returns the name of this parser for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// YAML frontmatter delimited by `---` lines.
///
/// A file that does not open with `---` has no metadata; its whole text is
/// the body. An opening delimiter without a closing one is treated the same
/// way.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFrontmatter;

const DELIMITER: &str = "---";

impl YamlFrontmatter {
    /// Split `text` into `(yaml, body)` if it opens with a delimited block.
    fn split(text: &str) -> Option<(&str, &str)> {
        let rest = text.strip_prefix(DELIMITER)?;
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))?;

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                return Some((&rest[..offset], &rest[offset + line.len()..]));
            }
            offset += line.len();
        }
        None
    }
}

impl FrontmatterParser for YamlFrontmatter {
    fn parse(&self, text: &str) -> Result<ParsedDocument> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let Some((yaml, body)) = Self::split(text) else {
            return Ok(ParsedDocument {
                metadata: PostFrontmatter::default(),
                body: text.to_string(),
            });
        };

        let metadata = if yaml.trim().is_empty() {
            PostFrontmatter::default()
        } else {
            yaml_serde::from_str(yaml).map_err(|e| Error::parse(format!("frontmatter: {e}")))?
        };

        Ok(ParsedDocument {
            metadata,
            body: body.to_string(),
        })
    }

    fn name(&self) -> &str {
        "yaml"
    }
}
