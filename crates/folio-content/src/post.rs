//! Post records emitted by the content compiler.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::error::ContentError;
use crate::frontmatter::load_source_posts;
use crate::slug::slugify;

/// A compiled blog post. Read-only for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Stable identifier used in URLs
    pub slug: String,

    /// Display title
    pub title: String,

    /// Short summary shown in feeds
    pub summary: Option<String>,

    /// Publication date
    pub date: NaiveDate,

    /// Free-form tag labels
    pub tags: Vec<String>,

    /// Locale code (e.g. "en")
    pub language: String,

    /// Unpublished posts never appear in feeds
    pub draft: bool,
}

impl Post {
    /// Whether the post may be published.
    pub fn is_published(&self) -> bool {
        !self.draft
    }

    /// Whether any of the post's tags slugifies to `tag_slug`.
    pub fn has_tag_slug(&self, tag_slug: &str) -> bool {
        self.tags.iter().any(|t| slugify(t) == tag_slug)
    }

    /// Canonical slugs of every tag, in tag order.
    pub fn tag_slugs(&self) -> Vec<String> {
        self.tags.iter().map(|t| slugify(t)).collect()
    }
}

/// Record shape written by the content compiler's document index.
#[derive(Debug, Deserialize)]
struct CompiledRecord {
    title: String,
    date: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default, rename = "_raw")]
    raw: Option<RawMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    #[serde(default)]
    flattened_path: Option<String>,
}

impl CompiledRecord {
    fn into_post(self, default_locale: &str) -> Result<Post, ContentError> {
        let slug = match self.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => self
                .raw
                .and_then(|raw| raw.flattened_path)
                .and_then(|p| p.rsplit('/').next().map(str::to_string))
                .filter(|s| !s.is_empty())
                .ok_or(ContentError::MissingSlug)?,
        };

        Ok(Post {
            slug,
            title: self.title,
            summary: self.summary.filter(|s| !s.trim().is_empty()),
            date: parse_post_date(&self.date)?,
            tags: self.tags,
            language: self
                .language
                .unwrap_or_else(|| default_locale.to_string()),
            draft: self.draft,
        })
    }
}

/// Parse a post date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_post_date(value: &str) -> Result<NaiveDate, ContentError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }

    // Timestamps without an offset, e.g. "2024-01-01T00:00:00"
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .filter(|_| value.as_bytes().get(10) == Some(&b'T'))
        .ok_or_else(|| ContentError::InvalidDate(value.to_string()))
}

/// Load posts from the compiler's JSON document index.
///
/// A missing index is an empty collection.
pub fn load_compiled_posts(index: &Path, default_locale: &str) -> Result<Vec<Post>, ContentError> {
    if !index.exists() {
        tracing::info!("Compiled index {} not found, no posts loaded", index.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(index).map_err(|e| ContentError::read(index, e))?;
    let records: Vec<CompiledRecord> =
        serde_json::from_str(&content).map_err(|e| ContentError::parse(index, e))?;

    let posts = records
        .into_iter()
        .map(|r| r.into_post(default_locale))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ContentError::parse(index, e))?;

    tracing::info!("Loaded {} posts from {}", posts.len(), index.display());
    Ok(posts)
}

/// Load posts from the compiled index, falling back to Markdown sources.
pub fn load_posts(
    compiled_index: &Path,
    source_dir: &Path,
    default_locale: &str,
) -> Result<Vec<Post>, ContentError> {
    if compiled_index.exists() {
        return load_compiled_posts(compiled_index, default_locale);
    }

    if source_dir.exists() {
        tracing::info!(
            "Compiled index {} not found, reading sources from {}",
            compiled_index.display(),
            source_dir.display()
        );
        return load_source_posts(source_dir, default_locale);
    }

    tracing::info!(
        "Neither {} nor {} exists, no posts loaded",
        compiled_index.display(),
        source_dir.display()
    );
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        assert_eq!(parse_post_date("2024-03-01").unwrap(), date("2024-03-01"));
        assert_eq!(
            parse_post_date("2024-03-01T00:00:00.000Z").unwrap(),
            date("2024-03-01")
        );
        assert_eq!(
            parse_post_date("2024-03-01T10:30:00").unwrap(),
            date("2024-03-01")
        );
        assert!(matches!(
            parse_post_date("March 1st"),
            Err(ContentError::InvalidDate(_))
        ));
    }

    #[test]
    fn loads_compiled_index() {
        let temp = tempdir().unwrap();
        let index = temp.path().join("_index.json");
        fs::write(
            &index,
            r#"[
  {
    "title": "Hello",
    "date": "2024-01-01T00:00:00.000Z",
    "tags": ["Rust", "Web Development"],
    "summary": "First post",
    "language": "es",
    "slug": "hello",
    "_raw": { "flattenedPath": "blog/es/hello" }
  },
  {
    "title": "Draft",
    "date": "2024-02-01",
    "draft": true,
    "_raw": { "flattenedPath": "blog/en/draft-post" }
  }
]"#,
        )
        .unwrap();

        let posts = load_compiled_posts(&index, "en").unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "hello");
        assert_eq!(posts[0].language, "es");
        assert_eq!(posts[0].summary.as_deref(), Some("First post"));
        assert!(posts[0].has_tag_slug("web-development"));

        assert_eq!(posts[1].slug, "draft-post");
        assert_eq!(posts[1].language, "en");
        assert!(posts[1].tags.is_empty());
        assert!(!posts[1].is_published());
    }

    #[test]
    fn missing_index_is_empty() {
        let temp = tempdir().unwrap();
        let posts = load_compiled_posts(&temp.path().join("missing.json"), "en").unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn malformed_index_is_an_error() {
        let temp = tempdir().unwrap();
        let index = temp.path().join("_index.json");
        fs::write(&index, "{ not json").unwrap();

        let result = load_compiled_posts(&index, "en");

        assert!(matches!(result, Err(ContentError::Parse { .. })));
    }

    #[test]
    fn record_without_any_slug_is_rejected() {
        let temp = tempdir().unwrap();
        let index = temp.path().join("_index.json");
        fs::write(&index, r#"[{ "title": "x", "date": "2024-01-01" }]"#).unwrap();

        assert!(load_compiled_posts(&index, "en").is_err());
    }

    #[test]
    fn load_posts_falls_back_to_sources() {
        let temp = tempdir().unwrap();
        let sources = temp.path().join("data").join("blog");
        fs::create_dir_all(&sources).unwrap();
        fs::write(
            sources.join("from-source.mdx"),
            "---\ntitle: From Source\ndate: 2024-05-05\n---\nBody\n",
        )
        .unwrap();

        let posts = load_posts(&temp.path().join("missing.json"), &sources, "en").unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "from-source");
    }
}
