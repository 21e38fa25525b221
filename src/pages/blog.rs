//! Blog listing and post detail pages

use anyhow::Result;

use super::Pages;
use crate::content::{PostMetadata, PostSource};
use crate::helpers::{encode_segment, post_path};
use crate::templates::{HeaderData, PostData};

/// Fixed-width bar tracking how far down a post the reader is
const READING_PROGRESS_SCRIPT: &str = r#"<script>
(function () {
  var bar = document.getElementById("reading-progress");
  if (!bar) return;
  function update() {
    var max = document.documentElement.scrollHeight - window.innerHeight;
    var pct = max > 0 ? Math.min(100, (window.scrollY / max) * 100) : 0;
    bar.style.width = pct + "%";
  }
  window.addEventListener("scroll", update, { passive: true });
  window.addEventListener("resize", update);
  update();
})();
</script>"#;

/// Head metadata of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
}

/// Outcome of rendering a post detail route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    Ok(String),
    /// The slug did not resolve; carries the not-found page
    NotFound(String),
}

impl PageResponse {
    pub fn html(&self) -> &str {
        match self {
            PageResponse::Ok(html) | PageResponse::NotFound(html) => html,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PageResponse::NotFound(_))
    }
}

/// Title and description for a post page; "Post Not Found" when the slug
/// does not resolve to a readable post
pub fn post_page_meta(posts: &impl PostSource, slug: &str) -> PageMeta {
    match posts.resolve(slug) {
        Ok(post) => PageMeta {
            title: post.meta.title,
            description: Some(post.meta.description),
        },
        Err(e) => {
            tracing::debug!("No page metadata for {}: {}", slug, e);
            PageMeta {
                title: "Post Not Found".to_string(),
                description: None,
            }
        }
    }
}

impl Pages {
    /// Listing of every post, newest first
    pub fn blog_list(&self, posts: &impl PostSource) -> Result<String> {
        let posts: Vec<PostData> = posts
            .list_all()?
            .iter()
            .map(|meta| self.post_data(meta))
            .collect();

        let config = self.config();
        let mut context =
            self.base_context("/blog", &format!("Blog | {}", config.title), &config.description);
        context.insert(
            "header",
            &HeaderData {
                title: "Blog".to_string(),
                description: super::non_empty(&config.description),
            },
        );
        context.insert("posts", &posts);
        self.templates.render("blog.html", &context)
    }

    /// Detail page for one post
    ///
    /// A slug without a backing file yields the not-found page; any other
    /// failure to load the post is an error.
    pub fn post_detail(&self, posts: &impl PostSource, slug: &str) -> Result<PageResponse> {
        let post = match posts.resolve(slug) {
            Ok(post) => post,
            Err(e) if e.is_not_found() => {
                let html = self.not_found_with(&post_page_meta(posts, slug))?;
                return Ok(PageResponse::NotFound(html));
            }
            Err(e) => return Err(e.into()),
        };

        let body = self.markup.render_body(&post.content);
        let data = self.post_data(&post.meta);
        let meta = PageMeta {
            title: post.meta.title.clone(),
            description: Some(post.meta.description.clone()),
        };

        let path = format!("/blog/{}", encode_segment(&post.meta.slug));
        let mut context = self.base_context(
            &path,
            &meta.title,
            meta.description.as_deref().unwrap_or(""),
        );
        let mut scripts = body.scripts;
        scripts.push(READING_PROGRESS_SCRIPT);
        context.insert("scripts", &scripts);
        context.insert("post", &data);
        context.insert("tags_class", "mt-4");
        context.insert("body", &body.html);

        Ok(PageResponse::Ok(self.templates.render("post.html", &context)?))
    }

    fn post_data(&self, meta: &PostMetadata) -> PostData {
        PostData {
            slug: meta.slug.clone(),
            url: post_path(self.config(), &meta.slug),
            title: meta.title.clone(),
            description: meta.description.clone(),
            display_date: meta.display_date(),
            datetime: meta.published.map(|d| d.format("%Y-%m-%d").to_string()),
            reading_time: meta.reading_time.clone(),
            tags: meta.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStore, PostIndex, ReadingTime};
    use crate::pages::tests::pages;
    use std::fs;
    use tempfile::TempDir;

    fn index_with(files: &[(&str, &str)]) -> (TempDir, PostIndex) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let store = ContentStore::new(dir.path(), &["mdx".to_string(), "md".to_string()]);
        (dir, PostIndex::with_store(store, ReadingTime::default(), false))
    }

    const TAGGED: &str =
        "---\ntitle: Tagged\ndate: 2024-01-01\ndescription: With tags\ntags: [a, b]\n---\nHello\n";
    const UNTAGGED: &str =
        "---\ntitle: Plain\ndate: 2023-05-30\ndescription: No tags\n---\nHello\n";

    #[test]
    fn test_empty_listing() {
        let (_dir, index) = index_with(&[]);
        let html = pages().blog_list(&index).unwrap();
        assert!(html.contains("No posts yet. Check back soon!"));
        assert!(!html.contains("post-card"));
    }

    #[test]
    fn test_listing_cards() {
        let (_dir, index) = index_with(&[("tagged.mdx", TAGGED), ("plain.md", UNTAGGED)]);
        let html = pages().blog_list(&index).unwrap();
        assert!(!html.contains("No posts yet"));
        assert_eq!(html.matches("post-card").count(), 2);
        let tagged = html.find(r#"href="/blog/tagged""#).unwrap();
        let plain = html.find(r#"href="/blog/plain""#).unwrap();
        assert!(tagged < plain);
        assert!(html.contains("January 1, 2024"));
        assert!(html.contains("May 30, 2023"));
        assert!(html.contains("1 min read"));
        assert_eq!(html.matches("tag-badge").count(), 2);
        assert!(html.contains("<title>Blog | Blog</title>"));
    }

    #[test]
    fn test_unparseable_date_shown_verbatim() {
        let (_dir, index) = index_with(&[(
            "odd.mdx",
            "---\ntitle: Odd\ndate: sometime in spring\ndescription: d\n---\nx\n",
        )]);
        let html = pages().blog_list(&index).unwrap();
        assert!(html.contains("<time>sometime in spring</time>"));
    }

    #[test]
    fn test_post_detail() {
        let (_dir, index) = index_with(&[(
            "hello.mdx",
            "---\ntitle: Hello\ndate: 2024-01-01\ndescription: First post\ntags: [a, b]\n---\n# Hi\n\n```rust\nfn main() {}\n```\n",
        )]);
        let response = pages().post_detail(&index, "hello").unwrap();
        assert!(!response.is_not_found());
        let html = response.html();
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains(r#"<meta name="description" content="First post">"#));
        assert!(html.contains("January 1, 2024"));
        assert!(html.contains(r#"<h1 class="text-2xl"#));
        assert!(html.contains(r#"data-copy="fn main() {}""#));
        assert!(html.contains("reading-progress"));
        assert_eq!(html.matches("tag-badge").count(), 2);
    }

    #[test]
    fn test_post_detail_missing() {
        let (_dir, index) = index_with(&[("hello.mdx", TAGGED)]);
        let response = pages().post_detail(&index, "missing").unwrap();
        assert!(response.is_not_found());
        assert!(response.html().contains("<title>Post Not Found</title>"));
    }

    #[test]
    fn test_post_page_meta() {
        let (_dir, index) = index_with(&[("tagged.mdx", TAGGED)]);
        assert_eq!(
            post_page_meta(&index, "tagged"),
            PageMeta {
                title: "Tagged".to_string(),
                description: Some("With tags".to_string()),
            }
        );
        assert_eq!(post_page_meta(&index, "nope").title, "Post Not Found");
    }
}
