//! Per-locale tag frequency table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::post::Post;

/// Mapping of locale to (tag slug to post count).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagTable(BTreeMap<String, BTreeMap<String, u64>>);

impl TagTable {
    /// Load the table from its JSON file.
    ///
    /// Unlike other inputs a missing file is an error: feeds cannot be
    /// enumerated without it.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::read(path, e))?;
        serde_json::from_str(&content).map_err(|e| ContentError::parse(path, e))
    }

    /// Derive the table from published posts, keyed by tag slug.
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut table: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();

        for post in posts.iter().filter(|p| p.is_published()) {
            let counts = table.entry(post.language.clone()).or_default();
            for slug in post.tag_slugs() {
                *counts.entry(slug).or_insert(0) += 1;
            }
        }

        Self(table)
    }

    /// Write the table as pretty-printed JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), ContentError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ContentError::write(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ContentError::parse(path, e))?;
        fs::write(path, json).map_err(|e| ContentError::write(path, e))
    }

    /// Tags recorded for `locale`, in sorted order. Unknown locales have none.
    pub fn tags(&self, locale: &str) -> Vec<&str> {
        self.0
            .get(locale)
            .map(|counts| counts.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Post count for a tag in a locale.
    pub fn count(&self, locale: &str, tag: &str) -> u64 {
        self.0
            .get(locale)
            .and_then(|counts| counts.get(tag))
            .copied()
            .unwrap_or(0)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn post(lang: &str, tags: &[&str], draft: bool) -> Post {
        Post {
            slug: "p".to_string(),
            title: "P".to_string(),
            summary: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            language: lang.to_string(),
            draft,
        }
    }

    #[test]
    fn loads_per_locale_table() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tag-data.json");
        fs::write(
            &path,
            r#"{ "en": { "rust": 2, "web-development": 1 }, "es": { "rust": 1 } }"#,
        )
        .unwrap();

        let table = TagTable::load(&path).unwrap();

        assert_eq!(table.tags("en"), vec!["rust", "web-development"]);
        assert_eq!(table.tags("es"), vec!["rust"]);
        assert!(table.tags("fr").is_empty());
        assert_eq!(table.count("en", "rust"), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempdir().unwrap();
        let result = TagTable::load(&temp.path().join("tag-data.json"));
        assert!(matches!(result, Err(ContentError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tag-data.json");
        fs::write(&path, r#"{ "en": ["rust"] }"#).unwrap();

        assert!(matches!(
            TagTable::load(&path),
            Err(ContentError::Parse { .. })
        ));
    }

    #[test]
    fn counts_published_posts_by_slug() {
        let posts = vec![
            post("en", &["Rust", "Web Development"], false),
            post("en", &["rust"], false),
            post("en", &["Hidden"], true),
            post("es", &["Rust"], false),
        ];

        let table = TagTable::from_posts(&posts);

        assert_eq!(table.count("en", "rust"), 2);
        assert_eq!(table.count("en", "web-development"), 1);
        assert_eq!(table.count("en", "hidden"), 0);
        assert_eq!(table.count("es", "rust"), 1);
        assert_eq!(table.locales().collect::<Vec<_>>(), vec!["en", "es"]);
    }

    #[test]
    fn written_table_loads_back() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("app").join("tag-data.json");
        let table = TagTable::from_posts(&[post("en", &["Rust"], false)]);

        table.write(&path).unwrap();

        assert_eq!(TagTable::load(&path).unwrap(), table);
    }
}
