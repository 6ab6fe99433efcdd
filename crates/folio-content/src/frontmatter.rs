//! Frontmatter extraction for Markdown/MDX post sources.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ContentError;
use crate::post::{parse_post_date, Post};
use crate::walk::find_files;

/// Frontmatter fields of a blog post source.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct PostFrontmatter {
    /// Post title (required)
    pub title: String,

    /// Publication date, `YYYY-MM-DD` or RFC 3339
    pub date: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub draft: bool,

    /// Locale code; defaults to the site's default locale
    #[serde(default)]
    pub language: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,
}

const FENCE: &str = "---";

/// Parse the YAML block at the top of a post source.
///
/// The block opens on the first line and closes at the next line that is
/// exactly `---`; later fences in the body are ignored. Returns `None`
/// when the source does not open with a fence.
pub fn parse_post_frontmatter(source: &str) -> Result<Option<PostFrontmatter>, ContentError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.lines();

    if lines.next().map(str::trim_end) != Some(FENCE) {
        return Ok(None);
    }

    let mut yaml = String::new();
    for line in lines {
        if line.trim_end() == FENCE {
            let frontmatter = serde_yaml::from_str(&yaml)
                .map_err(|e| ContentError::InvalidFrontmatter(e.to_string()))?;
            return Ok(Some(frontmatter));
        }
        yaml.push_str(line);
        yaml.push('\n');
    }

    Err(ContentError::UnclosedFrontmatter)
}

/// Load every `.md`/`.mdx` post below `dir` from its frontmatter.
///
/// Files without frontmatter are skipped. Malformed frontmatter is an error.
pub fn load_source_posts(dir: &Path, default_locale: &str) -> Result<Vec<Post>, ContentError> {
    let files = find_files(dir, |path| {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("md") | Some("mdx")
        )
    });

    let mut posts = Vec::with_capacity(files.len());

    for path in files {
        let source = fs::read_to_string(&path).map_err(|e| ContentError::read(&path, e))?;
        let frontmatter =
            parse_post_frontmatter(&source).map_err(|e| ContentError::parse(&path, e))?;

        let Some(fm) = frontmatter else {
            tracing::warn!("Skipping {}: no frontmatter", path.display());
            continue;
        };

        let slug = match fm.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or(ContentError::MissingSlug)?,
        };

        posts.push(Post {
            slug,
            title: fm.title,
            summary: fm.summary.filter(|s| !s.trim().is_empty()),
            date: parse_post_date(&fm.date).map_err(|e| ContentError::parse(&path, e))?,
            tags: fm.tags,
            language: fm.language.unwrap_or_else(|| default_locale.to_string()),
            draft: fm.draft,
        });
    }

    tracing::info!("Loaded {} posts from {}", posts.len(), dir.display());
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_crlf_sources() {
        let source = "---\r\ntitle: Windows\r\ndate: 2024-05-01\r\ntags: [Rust]\r\n---\r\nBody\r\n";

        let fm = parse_post_frontmatter(source).unwrap().unwrap();

        assert_eq!(fm.title, "Windows");
        assert_eq!(fm.date, "2024-05-01");
        assert_eq!(fm.tags, vec!["Rust"]);
    }

    #[test]
    fn thematic_break_in_body_is_not_a_fence() {
        let source = "---\ntitle: Breaks\ndate: 2024-01-01\n---\nIntro\n\n---\n\nslug: not-frontmatter\n";

        let fm = parse_post_frontmatter(source).unwrap().unwrap();

        assert_eq!(fm.title, "Breaks");
        assert_eq!(fm.slug, None);
    }

    #[test]
    fn missing_date_is_invalid() {
        let source = "---\ntitle: Undated\n---\n";

        let err = parse_post_frontmatter(source).unwrap_err();

        assert!(matches!(err, ContentError::InvalidFrontmatter(ref m) if m.contains("date")));
    }

    #[test]
    fn body_only_source_has_no_frontmatter() {
        assert_eq!(parse_post_frontmatter("# Notes\n\n---\n").unwrap(), None);
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let source = "\u{feff}---\ntitle: Draft\ndate: 2024-01-01\n";

        assert!(matches!(
            parse_post_frontmatter(source),
            Err(ContentError::UnclosedFrontmatter)
        ));
    }

    #[test]
    fn loads_posts_from_sources() {
        let temp = tempdir().unwrap();
        let en = temp.path().join("en");
        fs::create_dir_all(&en).unwrap();
        fs::write(
            en.join("first-post.mdx"),
            "---\ntitle: First\ndate: 2024-01-01\ntags: [Rust]\n---\nBody\n",
        )
        .unwrap();
        fs::write(
            en.join("custom.md"),
            "---\ntitle: Custom\ndate: 2024-02-01\nslug: renamed\ndraft: true\nlanguage: es\n---\n",
        )
        .unwrap();
        fs::write(en.join("notes.md"), "no frontmatter").unwrap();
        fs::write(en.join("image.png"), "binary").unwrap();

        let posts = load_source_posts(temp.path(), "en").unwrap();

        assert_eq!(posts.len(), 2);
        let custom = posts.iter().find(|p| p.slug == "renamed").unwrap();
        assert!(custom.draft);
        assert_eq!(custom.language, "es");
        let first = posts.iter().find(|p| p.slug == "first-post").unwrap();
        assert_eq!(first.language, "en");
        assert_eq!(first.tags, vec!["Rust"]);
    }

    #[test]
    fn bad_date_names_the_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("broken.md"),
            "---\ntitle: Broken\ndate: yesterday\n---\n",
        )
        .unwrap();

        let err = load_source_posts(temp.path(), "en").unwrap_err();

        assert!(err.to_string().contains("broken.md"));
    }
}
