//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Front-matter written into a fresh post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
    tags: Vec<String>,
}

/// Create `<posts_dir>/<slugified title>.mdx` with front-matter filled in
///
/// Refuses to overwrite an existing post.
pub fn create_post(site: &Site, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&site.posts_dir)?;
    let extension = site
        .config
        .extensions
        .first()
        .map(String::as_str)
        .unwrap_or("mdx");
    let file_path = site.posts_dir.join(format!("{}.{}", slug, extension));

    // A post with the same slug under another extension would shadow this one
    if let Some(existing) = site.content_store().path_for(&slug)? {
        anyhow::bail!("File already exists: {:?}", existing);
    }

    let front_matter = serde_yaml::to_string(&Scaffold {
        title,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        description: "",
        tags: Vec::new(),
    })?;
    fs::write(&file_path, format!("---\n{}---\n\n", front_matter))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostIndex;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Hello: A \"Quoted\" World!").unwrap();
        assert_eq!(path, site.posts_dir.join("hello-a-quoted-world.mdx"));

        let post = PostIndex::new(&site).resolve("hello-a-quoted-world").unwrap();
        assert_eq!(post.meta.title, "Hello: A \"Quoted\" World!");
        assert!(post.meta.published.is_some());
        assert!(post.meta.tags.is_empty());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        create_post(&site, "Twice").unwrap();
        assert!(create_post(&site, "Twice").is_err());
    }

    #[test]
    fn test_unsluggable_title() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(create_post(&site, "!!!").is_err());
    }
}
