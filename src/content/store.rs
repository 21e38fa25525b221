//! Content store - file access for the posts directory

use std::fs;
use std::path::{Path, PathBuf};
use indexmap::IndexMap;
use std::time::SystemTime;
use walkdir::WalkDir;

use super::{ContentError, FrontMatter};

/// A post file split into front-matter and body
#[derive(Debug, Clone)]
pub struct RawPost {
    pub slug: String,
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Read access to the flat directory of post files
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl ContentStore {
    /// Create a store over `dir`, recognizing the given extensions (no dot)
    pub fn new<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extensions: extensions.to_vec(),
        }
    }

    /// Directory the posts live in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All post files, in file-name order
    ///
    /// Only files directly inside the directory with a recognized extension
    /// count. A missing directory holds no posts. Each slug maps to one file:
    /// when several files share a stem, the earliest configured extension
    /// wins and the rest are skipped with a warning.
    pub fn list_post_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut by_slug: IndexMap<String, (usize, PathBuf)> = IndexMap::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::Io {
                path: e.path().unwrap_or(&self.dir).to_path_buf(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(rank) = self.extension_rank(path) else {
                continue;
            };
            let slug = slug_of(path);
            if !is_valid_slug(&slug) {
                continue;
            }

            match by_slug.get_mut(&slug) {
                Some((kept_rank, kept)) => {
                    let (winner, loser) = if rank < *kept_rank {
                        (path.to_path_buf(), std::mem::replace(kept, path.to_path_buf()))
                    } else {
                        (kept.clone(), path.to_path_buf())
                    };
                    *kept_rank = (*kept_rank).min(rank);
                    tracing::warn!(
                        "Skipping {:?}: slug `{}` is already served by {:?}",
                        loser,
                        slug,
                        winner
                    );
                }
                None => {
                    by_slug.insert(slug, (rank, path.to_path_buf()));
                }
            }
        }

        Ok(by_slug.into_values().map(|(_, path)| path).collect())
    }

    /// Read a post file and split off its front-matter
    pub fn read_post(&self, path: &Path) -> Result<RawPost, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (front_matter, body) =
            FrontMatter::parse(&content).map_err(|source| ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(RawPost {
            slug: slug_of(path),
            path: path.to_path_buf(),
            front_matter,
            body: body.to_string(),
        })
    }

    /// Backing file for a slug, if one exists
    ///
    /// Resolves against the same listing `list_post_files` produces, so every
    /// listed slug resolves and nothing else does.
    pub fn path_for(&self, slug: &str) -> Result<Option<PathBuf>, ContentError> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        Ok(self
            .list_post_files()?
            .into_iter()
            .find(|path| slug_of(path) == slug))
    }

    /// Last modification time of a post file
    pub fn modified(&self, path: &Path) -> Result<SystemTime, ContentError> {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Position of the file's extension in the configured list
    fn extension_rank(&self, path: &Path) -> Option<usize> {
        let ext = path.extension()?.to_str()?;
        self.extensions
            .iter()
            .position(|known| known.eq_ignore_ascii_case(ext))
    }
}

/// Slugs are plain file stems that cannot name anything outside the posts
/// directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}

/// Slug of a post file: its name without the extension
pub fn slug_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let store = ContentStore::new(dir.path(), &["mdx".to_string(), "md".to_string()]);
        (dir, store)
    }

    #[test]
    fn test_only_recognized_extensions_listed() {
        let (_dir, store) = store_with(&[
            ("b.mdx", ""),
            ("a.md", ""),
            ("notes.txt", ""),
            ("image.png", ""),
            ("README", ""),
        ]);
        let names: Vec<_> = store
            .list_post_files()
            .unwrap()
            .iter()
            .map(|p| slug_of(p))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_directories_ignored() {
        let (dir, store) = store_with(&[("top.mdx", "")]);
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts/hidden.mdx"), "").unwrap();
        assert_eq!(store.list_post_files().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let store = ContentStore::new("/definitely/not/here", &["mdx".to_string()]);
        assert!(store.list_post_files().unwrap().is_empty());
    }

    #[test]
    fn test_read_post_splits_front_matter() {
        let (dir, store) = store_with(&[("hello.mdx", "---\ntitle: Hello\n---\nBody text\n")]);
        let raw = store.read_post(&dir.path().join("hello.mdx")).unwrap();
        assert_eq!(raw.slug, "hello");
        assert_eq!(raw.front_matter.title.as_deref(), Some("Hello"));
        assert_eq!(raw.body, "Body text\n");
    }

    #[test]
    fn test_path_for() {
        let (_dir, store) = store_with(&[("hello.mdx", ""), ("old.md", "")]);
        let path_for = |slug: &str| store.path_for(slug).unwrap();
        assert!(path_for("hello").unwrap().ends_with("hello.mdx"));
        assert!(path_for("old").unwrap().ends_with("old.md"));
        assert!(path_for("missing").is_none());
        assert!(path_for("").is_none());
        assert!(path_for("../hello").is_none());
        assert!(path_for("a/b").is_none());
    }

    #[test]
    fn test_every_listed_file_resolves() {
        let (_dir, store) = store_with(&[
            ("Upper.MDX", ""),
            ("v1..v2.mdx", ""),
            ("plain.md", ""),
            (".hidden.mdx", ""),
        ]);
        let slugs: Vec<_> = store
            .list_post_files()
            .unwrap()
            .iter()
            .map(|p| slug_of(p))
            .collect();
        assert_eq!(slugs, vec!["Upper", "plain", "v1..v2"]);

        for (slug, path) in slugs.iter().zip(store.list_post_files().unwrap()) {
            assert_eq!(store.path_for(slug).unwrap(), Some(path));
        }
        assert!(store.path_for(".hidden").unwrap().is_none());
    }

    #[test]
    fn test_shared_stem_prefers_first_extension() {
        let (_dir, store) = store_with(&[("hello.md", "From md"), ("hello.mdx", "From mdx")]);
        let files = store.list_post_files().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("hello.mdx"));
        assert!(store.path_for("hello").unwrap().unwrap().ends_with("hello.mdx"));
    }
}
