//! Feed generator.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use folio_content::{slugify, ContentError, Locales, Post, SiteConfig, TagTable};

use crate::templates::{ChannelContext, FeedTemplates, ItemContext};

/// Configuration for generating feeds.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Site metadata for channel and author fields
    pub site: SiteConfig,

    /// Supported locales and their routing
    pub locales: Locales,

    /// Directory feeds are written into
    pub public_dir: PathBuf,

    /// Tag frequency table (locale -> tag -> count)
    pub tag_data: PathBuf,

    /// Feed file name
    pub file_name: String,

    /// URL segment blog posts live under
    pub blog_path: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            locales: Locales::default(),
            public_dir: PathBuf::from("public"),
            tag_data: PathBuf::from("app/[locale]/tag-data.json"),
            file_name: "feed.xml".to_string(),
            blog_path: "blog".to_string(),
        }
    }
}

/// Result of a feed generation run.
#[derive(Debug, Default)]
pub struct FeedReport {
    /// Every feed file written, locale feeds before their tag feeds
    pub written: Vec<PathBuf>,

    /// Locales without any published post
    pub skipped_locales: Vec<String>,
}

/// Errors that can occur during feed generation.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Failed to load tag data: {0}")]
    TagData(#[from] ContentError),

    #[error("Failed to render feed: {0}")]
    Template(String),

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Posts of `locale` that may be published, newest first.
///
/// With `tag_slug`, only posts carrying a tag with that slug are kept.
/// Posts sharing a date keep their input order.
pub fn select_posts<'a>(posts: &'a [Post], locale: &str, tag_slug: Option<&str>) -> Vec<&'a Post> {
    let mut selected: Vec<&Post> = posts
        .iter()
        .filter(|p| p.language == locale)
        .filter(|p| p.is_published())
        .filter(|p| tag_slug.is_none_or(|tag| p.has_tag_slug(tag)))
        .collect();

    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

/// Format a calendar date as an RFC 2822 timestamp at midnight UTC.
pub fn rfc2822(date: NaiveDate) -> String {
    NaiveDateTime::new(date, NaiveTime::MIN).and_utc().to_rfc2822()
}

/// RSS feed generator.
pub struct FeedGenerator {
    config: FeedConfig,
    templates: FeedTemplates,
}

impl FeedGenerator {
    /// Create a new feed generator.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let templates = FeedTemplates::new().map_err(|e| FeedError::Template(e.to_string()))?;
        Ok(Self { config, templates })
    }

    /// Generate feeds for `locales` (all supported locales when empty).
    ///
    /// The tag table is loaded first; a missing or malformed table aborts
    /// the run before any file is written.
    pub fn generate(&self, posts: &[Post], locales: &[String]) -> Result<FeedReport, FeedError> {
        let tags = TagTable::load(&self.config.tag_data)?;
        self.generate_with_tags(posts, &tags, locales)
    }

    /// Generate feeds using an already loaded tag table.
    pub fn generate_with_tags(
        &self,
        posts: &[Post],
        tags: &TagTable,
        locales: &[String],
    ) -> Result<FeedReport, FeedError> {
        let mut report = FeedReport::default();

        for locale in self.config.locales.restrict(locales) {
            let selected = select_posts(posts, &locale, None);
            if selected.is_empty() {
                tracing::info!("No published posts for locale '{}', skipping feed", locale);
                report.skipped_locales.push(locale);
                continue;
            }

            report
                .written
                .push(self.write_feed(&locale, None, &selected)?);

            for tag in tags.tags(&locale) {
                let tag_slug = slugify(tag);
                let tagged = select_posts(posts, &locale, Some(&tag_slug));
                if tagged.is_empty() {
                    tracing::debug!("No published posts tagged '{}' in '{}'", tag_slug, locale);
                    continue;
                }
                report
                    .written
                    .push(self.write_feed(&locale, Some(&tag_slug), &tagged)?);
            }
        }

        tracing::info!("RSS feeds generated: {} files", report.written.len());
        Ok(report)
    }

    /// Render one feed document. `posts` must be sorted newest first and non-empty.
    pub fn render(
        &self,
        locale: &str,
        tag_slug: Option<&str>,
        posts: &[&Post],
    ) -> Result<String, FeedError> {
        let site = &self.config.site;
        let base = site.base_url();
        let prefix = self.config.locales.link_prefix(locale);
        let editor = site.editor();

        let link = match tag_slug {
            Some(tag) => format!("{}{}/tags/{}", base, prefix, tag),
            None => format!("{}{}/{}", base, prefix, self.config.blog_path),
        };

        let channel = ChannelContext {
            title: site.title_for(locale).to_string(),
            link,
            description: site.description_for(locale).to_string(),
            language: locale.to_string(),
            editor: editor.clone(),
            last_build_date: posts.first().map(|p| rfc2822(p.date)).unwrap_or_default(),
            self_link: format!(
                "{}/{}",
                base,
                self.config
                    .locales
                    .feed_href(locale, tag_slug, &self.config.file_name)
            ),
        };

        let items: Vec<ItemContext> = posts
            .iter()
            .map(|post| ItemContext {
                link: format!(
                    "{}{}/{}/{}",
                    base, prefix, self.config.blog_path, post.slug
                ),
                title: post.title.clone(),
                summary: post.summary.clone(),
                pub_date: Some(rfc2822(post.date)),
                author: editor.clone(),
                categories: post.tag_slugs(),
            })
            .collect();

        self.templates
            .render_feed(&channel, &items)
            .map_err(|e| FeedError::Template(e.to_string()))
    }

    /// Render and write one feed, creating parent directories.
    fn write_feed(
        &self,
        locale: &str,
        tag_slug: Option<&str>,
        posts: &[&Post],
    ) -> Result<PathBuf, FeedError> {
        let xml = self.render(locale, tag_slug, posts)?;
        let path = self.config.locales.feed_output(
            &self.config.public_dir,
            locale,
            tag_slug,
            &self.config.file_name,
        );

        write_file(&path, &xml)?;
        tracing::debug!("Wrote {} ({} items)", path.display(), posts.len());
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), FeedError> {
    let to_error = |e: std::io::Error| FeedError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}
