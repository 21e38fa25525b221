//! sitemaps.org sitemap

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::{as_utc, date_xml, encode_segment, escape_xml, full_url_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Yearly,
    Monthly,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Home, the blog listing, then one entry per post in the given order
pub fn entries(
    config: &SiteConfig,
    posts: &[PostMetadata],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mut urls = Vec::with_capacity(posts.len() + 2);
    urls.push(SitemapEntry {
        url: full_url_for(config, "/"),
        last_modified: now,
        change_frequency: ChangeFrequency::Yearly,
        priority: 1.0,
    });
    urls.push(SitemapEntry {
        url: full_url_for(config, "/blog"),
        last_modified: now,
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.9,
    });

    for post in posts {
        urls.push(SitemapEntry {
            url: full_url_for(config, &format!("blog/{}", encode_segment(&post.slug))),
            last_modified: post.published.as_ref().map(as_utc).unwrap_or(now),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.8,
        });
    }

    urls
}

pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut body = String::new();
    for entry in entries {
        body.push_str("  <url>\n");
        body.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        body.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            date_xml(&entry.last_modified)
        ));
        body.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        body.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        body.push_str("  </url>\n");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{body}</urlset>
"#
    )
}
