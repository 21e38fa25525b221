//! Generator module - writes the whole site to the public directory

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::PostIndex;
use crate::pages::{PageResponse, Pages};
use crate::Site;

/// Static site generator
pub struct Generator {
    site: Site,
    pages: Pages,
}

/// What a generation run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub files: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            pages: Pages::new(&site.config)?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateStats> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let mut stats = GenerateStats::default();

        // Static assets first; generated pages overwrite collisions
        stats.files += self.copy_static_assets()?;

        let index = self.site.post_index();
        let posts = index.list_all()?;
        tracing::info!("Loaded {} posts", posts.len());

        self.write("index.html", &self.pages.home()?)?;
        self.write("blog/index.html", &self.pages.blog_list(&index)?)?;
        stats.files += 2;

        for post in &posts {
            if self.generate_post(&index, &post.slug)? {
                stats.posts += 1;
                stats.files += 1;
            }
        }

        self.write(
            "sitemap.xml",
            &self.pages.sitemap(&index, chrono::Utc::now())?,
        )?;
        self.write("404.html", &self.pages.not_found()?)?;
        stats.files += 2;

        Ok(stats)
    }

    /// Write one post page; false when the post vanished since listing
    fn generate_post(&self, index: &PostIndex, slug: &str) -> Result<bool> {
        match self.pages.post_detail(index, slug)? {
            PageResponse::Ok(html) => {
                self.write(&format!("blog/{}/index.html", slug), &html)?;
                Ok(true)
            }
            PageResponse::NotFound(_) => {
                tracing::warn!("Post {} disappeared during generation", slug);
                Ok(false)
            }
        }
    }

    fn write(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        copy_dir(&self.site.static_dir, &self.site.public_dir)
    }
}

/// Copy every file under `from` into `to`, keeping relative paths
fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    if !from.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(from)?;
        let dest = to.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}
