//! Site metadata and locale routing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Site-wide metadata used by feeds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Absolute base URL without trailing slash, e.g. `https://example.com`
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub email: String,

    /// Per-locale title/description overrides
    #[serde(default)]
    pub locales: BTreeMap<String, LocaleMeta>,
}

/// Localized overrides of the site title and description.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LocaleMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

fn default_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_title() -> String {
    "Blog".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            title: default_title(),
            description: String::new(),
            author: String::new(),
            email: String::new(),
            locales: BTreeMap::new(),
        }
    }
}

impl SiteConfig {
    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Title for a locale, falling back to the site title.
    pub fn title_for(&self, locale: &str) -> &str {
        self.locales
            .get(locale)
            .and_then(|m| m.title.as_deref())
            .unwrap_or(&self.title)
    }

    /// Description for a locale, falling back to the site description.
    pub fn description_for(&self, locale: &str) -> &str {
        self.locales
            .get(locale)
            .and_then(|m| m.description.as_deref())
            .unwrap_or(&self.description)
    }

    /// RSS person line: `email (Name)`.
    pub fn editor(&self) -> String {
        format!("{} ({})", self.email, self.author)
    }
}

/// Supported locales and the rules that map them to URLs and paths.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Locales {
    #[serde(default = "default_locale", rename = "default_locale")]
    pub default: String,

    #[serde(default = "default_supported", rename = "locales")]
    pub supported: Vec<String>,
}

fn default_locale() -> String {
    "en".to_string()
}
fn default_supported() -> Vec<String> {
    vec!["en".to_string(), "es".to_string()]
}

impl Default for Locales {
    fn default() -> Self {
        Self {
            default: default_locale(),
            supported: default_supported(),
        }
    }
}

impl Locales {
    pub fn is_default(&self, locale: &str) -> bool {
        self.default == locale
    }

    /// URL path prefix: empty for the default locale, `/<locale>` otherwise.
    pub fn link_prefix(&self, locale: &str) -> String {
        if self.is_default(locale) {
            String::new()
        } else {
            format!("/{}", locale)
        }
    }

    /// Feed path relative to the public directory.
    ///
    /// Every locale, the default included, gets its own directory.
    pub fn feed_path(&self, locale: &str, tag_slug: Option<&str>, file_name: &str) -> PathBuf {
        let mut path = PathBuf::from(locale);
        if let Some(tag) = tag_slug {
            path.push("tags");
            path.push(tag);
        }
        path.push(file_name);
        path
    }

    /// URL path of a feed relative to the site root, matching [`Self::feed_path`].
    pub fn feed_href(&self, locale: &str, tag_slug: Option<&str>, file_name: &str) -> String {
        match tag_slug {
            Some(tag) => format!("{}/tags/{}/{}", locale, tag, file_name),
            None => format!("{}/{}", locale, file_name),
        }
    }

    /// Absolute output path of a feed below `public_dir`.
    pub fn feed_output(
        &self,
        public_dir: &Path,
        locale: &str,
        tag_slug: Option<&str>,
        file_name: &str,
    ) -> PathBuf {
        public_dir.join(self.feed_path(locale, tag_slug, file_name))
    }

    /// Keep only the requested locales that are supported, preserving order.
    ///
    /// Unsupported requests are logged and dropped.
    pub fn restrict(&self, requested: &[String]) -> Vec<String> {
        if requested.is_empty() {
            return self.supported.clone();
        }
        for locale in requested.iter().filter(|l| !self.supported.contains(l)) {
            tracing::warn!("Locale '{}' is not supported, skipping", locale);
        }
        self.supported
            .iter()
            .filter(|l| requested.contains(l))
            .cloned()
            .collect()
    }
}
