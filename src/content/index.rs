//! Post index and resolver

use std::cmp::Ordering;

use super::post::derive;
use super::store::RawPost;
use super::{ContentError, ContentStore, Post, PostMetadata, ReadingTime};
use crate::Site;

/// Where page compositors get their posts from
pub trait PostSource {
    /// Metadata of every post, newest first
    fn list_all(&self) -> Result<Vec<PostMetadata>, ContentError>;

    /// Full post for a slug, `NotFound` when no file backs it
    fn resolve(&self, slug: &str) -> Result<Post, ContentError>;
}

/// Resolves posts from the content store on every call
pub struct PostIndex {
    store: ContentStore,
    reading_time: ReadingTime,
    strict: bool,
}

impl PostIndex {
    /// Index over a site's posts directory
    pub fn new(site: &Site) -> Self {
        Self::with_store(
            site.content_store(),
            ReadingTime::new(site.config.words_per_minute),
            site.config.strict_front_matter,
        )
    }

    pub fn with_store(store: ContentStore, reading_time: ReadingTime, strict: bool) -> Self {
        Self {
            store,
            reading_time,
            strict,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Metadata of every post, newest first
    ///
    /// Files that fail to load are skipped with a warning. Posts with equal
    /// dates keep their enumeration order.
    pub fn list_all(&self) -> Result<Vec<PostMetadata>, ContentError> {
        let mut posts = Vec::new();

        for path in self.store.list_post_files()? {
            match self.store.read_post(&path).and_then(|raw| self.derive(raw)) {
                Ok(post) => posts.push(post.into_metadata()),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Full post for a slug
    pub fn resolve(&self, slug: &str) -> Result<Post, ContentError> {
        let path = self
            .store
            .path_for(slug)?
            .ok_or_else(|| ContentError::NotFound {
                slug: slug.to_string(),
            })?;
        let raw = self.store.read_post(&path)?;
        self.derive(raw)
    }

    /// Slugs of every listed post, newest first
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.list_all()?.into_iter().map(|p| p.slug).collect())
    }

    /// Build a post from an already-read file
    pub fn derive(&self, raw: RawPost) -> Result<Post, ContentError> {
        derive(
            &raw.slug,
            raw.front_matter,
            &raw.body,
            &self.reading_time,
            self.strict,
        )
    }
}

impl PostSource for PostIndex {
    fn list_all(&self) -> Result<Vec<PostMetadata>, ContentError> {
        PostIndex::list_all(self)
    }

    fn resolve(&self, slug: &str) -> Result<Post, ContentError> {
        PostIndex::resolve(self, slug)
    }
}

/// Stable sort by date, newest first
///
/// Parsed dates compare chronologically and sort ahead of unparseable ones,
/// which fall back to comparing the authored strings.
pub fn sort_newest_first(posts: &mut [PostMetadata]) {
    posts.sort_by(|a, b| match (&a.published, &b.published) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.date.cmp(&a.date),
    });
}
