//! Post models and metadata derivation

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use super::{ContentError, FrontMatter, ReadingTime};
use crate::helpers::{long_date, parse_date_string};

/// Listing view of a post: everything except the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    /// Filename without extension
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as authored
    pub date: String,

    /// Parsed publication date, absent when `date` is not a recognizable date
    #[serde(skip)]
    pub published: Option<NaiveDateTime>,

    /// One-line summary
    pub description: String,

    /// Post tags, in authored order
    pub tags: Vec<String>,

    /// Derived label such as "5 min read"
    pub reading_time: String,

    /// Custom front-matter fields
    #[serde(skip)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostMetadata {
    /// Publication date for display ("January 1, 2024"); falls back to the
    /// authored string when it does not parse
    pub fn display_date(&self) -> String {
        match &self.published {
            Some(date) => long_date(date),
            None => self.date.clone(),
        }
    }
}

/// A blog post with its raw markup body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Raw markdown/MDX body (front-matter removed)
    pub content: String,
}

impl Post {
    /// Drop the body, keeping the listing view
    pub fn into_metadata(self) -> PostMetadata {
        self.meta
    }
}

/// Build a post from its front-matter and body
///
/// Fields are taken verbatim. Missing title, date or description become
/// empty strings with a warning, unless `strict` is set, in which case the
/// first missing one is an error.
pub fn derive(
    slug: &str,
    fm: FrontMatter,
    body: &str,
    reading_time: &ReadingTime,
    strict: bool,
) -> Result<Post, ContentError> {
    let FrontMatter {
        title,
        date,
        description,
        tags,
        extra,
    } = fm;

    let title = required(slug, "title", title, strict)?;
    let date = required(slug, "date", date, strict)?;
    let description = required(slug, "description", description, strict)?;

    let published = parse_date_string(&date);
    if published.is_none() && !date.is_empty() {
        tracing::warn!("Post {} has an unrecognized date: {:?}", slug, date);
    }

    let tags = tags
        .into_iter()
        .filter(|tag| !tag.trim().is_empty())
        .collect();

    let meta = PostMetadata {
        slug: slug.to_string(),
        title,
        date,
        published,
        description,
        tags,
        reading_time: reading_time.estimate(body).text,
        extra,
    };

    Ok(Post {
        meta,
        content: body.to_string(),
    })
}

fn required(
    slug: &str,
    field: &'static str,
    value: Option<String>,
    strict: bool,
) -> Result<String, ContentError> {
    match value {
        Some(value) => Ok(value),
        None if strict => Err(ContentError::MissingField {
            slug: slug.to_string(),
            field,
        }),
        None => {
            tracing::warn!("Post {} has no `{}` in its front-matter", slug, field);
            Ok(String::new())
        }
    }
}
