//! Content model for the folio build pipeline.
//!
//! Post records produced by the content compiler, the per-locale tag table,
//! site metadata, locale routing, and the directory walk shared by every
//! stage that scans the filesystem.

pub mod error;
pub mod frontmatter;
pub mod post;
pub mod site;
pub mod slug;
pub mod tags;
pub mod walk;

pub use error::ContentError;
pub use frontmatter::{load_source_posts, parse_post_frontmatter, PostFrontmatter};
pub use post::{load_compiled_posts, load_posts, parse_post_date, Post};
pub use site::{LocaleMeta, Locales, SiteConfig};
pub use slug::slugify;
pub use tags::TagTable;
pub use walk::{find_files, find_files_with_extension};
