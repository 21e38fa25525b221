//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: Blog
description: Thoughts on software engineering, technology, and building products.
author: John Doe
language: en

# URL
url: http://localhost:4000
root: /

# Directory
posts_dir: content/posts
public_dir: public
static_dir: static

# Writing
extensions: [mdx, md]
words_per_minute: 200
strict_front_matter: false
highlight:
  theme: base16-ocean.dark
  keep_background: true

# Home page
home:
  headline: Hey, I'm John
  tagline: Thoughts on software engineering, technology, and building products.
  cta: Read the Blog
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left alone, so running it twice is harmless.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    write_if_missing(&target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {today}
description: The first post on this site.
tags: [meta]
---

Welcome! This post lives in `content/posts/hello-world.mdx`. Edit it, or
create another one with:

```bash title="Create a post"
folio new "My New Post"
```

## Preview and build

Run `folio server` to preview the site at http://localhost:4000, and
`folio generate` to write it to `public/`.
"#
    );
    write_if_missing(
        &target_dir.join("content/posts/hello-world.mdx"),
        &sample_post,
    )?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostIndex;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join(CONFIG_FILE).is_file());
        assert!(dir.path().join("static").is_dir());

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Blog");
        assert_eq!(site.config.home.cta, "Read the Blog");

        let posts = PostIndex::new(&site).list_all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
        assert_eq!(posts[0].tags, vec!["meta"]);
    }

    #[test]
    fn test_existing_config_kept() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();
        let config = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
