//! Cache module for the live server
//!
//! Posts are re-derived only when their file's modification time changes,
//! so an edited post shows up on the next request while untouched posts are
//! served from memory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

use crate::content::{sort_newest_first, ContentError, Post, PostIndex, PostMetadata, PostSource};

/// A derived post and the mtime of the file it came from
#[derive(Debug, Clone)]
struct CacheEntry {
    mtime: SystemTime,
    post: Post,
}

/// Modification-time keyed post cache in front of a [`PostIndex`]
pub struct ContentCache {
    index: PostIndex,
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl ContentCache {
    pub fn new(index: PostIndex) -> Self {
        Self {
            index,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of posts currently held
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Post backed by `path`, re-read when the file changed since last time
    pub fn get(&self, path: &Path) -> Result<Post, ContentError> {
        let mtime = self.index.store().modified(path)?;

        if let Some(entry) = self.lock().get(path) {
            if entry.mtime == mtime {
                return Ok(entry.post.clone());
            }
        }

        tracing::debug!("Loading {:?}", path);
        let raw = self.index.store().read_post(path)?;
        let post = self.index.derive(raw)?;
        self.lock().insert(
            path.to_path_buf(),
            CacheEntry {
                mtime,
                post: post.clone(),
            },
        );
        Ok(post)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, CacheEntry>> {
        // Poisoned entries are still keyed by mtime
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PostSource for ContentCache {
    fn list_all(&self) -> Result<Vec<PostMetadata>, ContentError> {
        let files = self.index.store().list_post_files()?;
        let mut posts = Vec::with_capacity(files.len());

        for path in &files {
            match self.get(path) {
                Ok(post) => posts.push(post.into_metadata()),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        // Drop posts whose files are gone
        self.lock().retain(|path, _| files.contains(path));
        tracing::debug!("Listed {} posts, {} cached", posts.len(), self.len());

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    fn resolve(&self, slug: &str) -> Result<Post, ContentError> {
        let path = self
            .index
            .store()
            .path_for(slug)?
            .ok_or_else(|| ContentError::NotFound {
                slug: slug.to_string(),
            })?;
        self.get(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStore, ReadingTime};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> ContentCache {
        let store = ContentStore::new(dir.path(), &["mdx".to_string()]);
        ContentCache::new(PostIndex::with_store(store, ReadingTime::default(), false))
    }

    fn write_post(dir: &TempDir, slug: &str, title: &str) -> PathBuf {
        let path = dir.path().join(format!("{slug}.mdx"));
        fs::write(
            &path,
            format!("---\ntitle: {title}\ndate: 2024-01-01\ndescription: d\n---\nbody\n"),
        )
        .unwrap();
        path
    }

    fn touch_later(path: &Path) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
    }

    #[test]
    fn test_resolve_caches() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "hello", "Hello");
        let cache = cache_in(&dir);

        assert!(cache.is_empty());
        assert_eq!(cache.resolve("hello").unwrap().meta.title, "Hello");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.resolve("hello").unwrap().meta.title, "Hello");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_edit_picked_up() {
        let dir = TempDir::new().unwrap();
        let path = write_post(&dir, "hello", "Hello");
        let cache = cache_in(&dir);
        assert_eq!(cache.resolve("hello").unwrap().meta.title, "Hello");

        write_post(&dir, "hello", "Edited");
        touch_later(&path);
        assert_eq!(cache.resolve("hello").unwrap().meta.title, "Edited");
    }

    #[test]
    fn test_list_all_drops_deleted() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "a", "A");
        let b = write_post(&dir, "b", "B");
        let cache = cache_in(&dir);

        assert_eq!(cache.list_all().unwrap().len(), 2);
        assert_eq!(cache.len(), 2);

        fs::remove_file(b).unwrap();
        let posts = cache.list_all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "a");
        assert_eq!(cache.len(), 1);
        assert!(cache.resolve("b").unwrap_err().is_not_found());
    }
}
