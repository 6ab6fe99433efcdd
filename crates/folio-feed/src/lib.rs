//! RSS feed generation for the blog.
//!
//! Builds one RSS 2.0 document per locale and one per (locale, tag) from
//! compiled post records and the tag table.

pub mod escape;
pub mod generator;
pub mod templates;

pub use escape::xml_escape;
pub use generator::{select_posts, FeedConfig, FeedError, FeedGenerator, FeedReport};
pub use templates::{ChannelContext, FeedTemplates, ItemContext};
