//! Template engine for rendering RSS documents.

use minijinja::{context, AutoEscape, Environment};

use crate::escape::xml_escape;

/// Channel-level fields of a feed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChannelContext {
    /// Feed title
    pub title: String,
    /// Page the feed describes
    pub link: String,
    /// Feed description
    pub description: String,
    /// Locale code
    pub language: String,
    /// `email (Name)` used for managingEditor and webMaster
    pub editor: String,
    /// RFC 2822 date of the newest item
    pub last_build_date: String,
    /// Public URL of the feed itself
    pub self_link: String,
}

/// A single feed item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ItemContext {
    /// Permalink, also used as guid
    pub link: String,
    pub title: String,
    pub summary: Option<String>,
    /// RFC 2822 publication date
    pub pub_date: Option<String>,
    pub author: String,
    pub categories: Vec<String>,
}

/// Template engine using minijinja.
///
/// Auto-escaping is off; every interpolated string goes through the
/// explicit `xml` filter.
pub struct FeedTemplates {
    env: Environment<'static>,
}

impl FeedTemplates {
    /// Create a new template engine with the RSS template loaded.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("xml", |value: String| xml_escape(&value).into_owned());

        env.add_template("rss.xml", RSS_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Render a feed document.
    pub fn render_feed(
        &self,
        channel: &ChannelContext,
        items: &[ItemContext],
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("rss.xml")?;

        tmpl.render(context! {
            channel => channel,
            items => items,
        })
    }
}

const RSS_TEMPLATE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{{ channel.title | xml }}</title>
    <link>{{ channel.link | xml }}</link>
    <description>{{ channel.description | xml }}</description>
    <language>{{ channel.language | xml }}</language>
    <managingEditor>{{ channel.editor | xml }}</managingEditor>
    <webMaster>{{ channel.editor | xml }}</webMaster>
    <lastBuildDate>{{ channel.last_build_date }}</lastBuildDate>
    <atom:link href="{{ channel.self_link | xml }}" rel="self" type="application/rss+xml"/>
    {% for item in items %}
    <item>
      <guid>{{ item.link | xml }}</guid>
      <title>{{ item.title | xml }}</title>
      <link>{{ item.link | xml }}</link>
      {% if item.summary %}
      <description>{{ item.summary | xml }}</description>
      {% endif %}
      {% if item.pub_date %}
      <pubDate>{{ item.pub_date }}</pubDate>
      {% endif %}
      <author>{{ item.author | xml }}</author>
      {% for category in item.categories %}
      <category>{{ category | xml }}</category>
      {% endfor %}
    </item>
    {% endfor %}
  </channel>
</rss>
"##;
