use std::fs;
use std::path::Path;

use folio::Site;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

#[test]
fn generate_full_site() {
    let dir = TempDir::new().unwrap();
    let base = dir.path();

    write(
        &base.join("_config.yml"),
        "title: Notes\nurl: https://notes.example\nhome:\n  headline: Hi there\n",
    );
    write(
        &base.join("content/posts/hello.mdx"),
        &format!(
            "---\ntitle: Hello\ndate: 2024-01-01\ndescription: First post\ntags: [rust, web]\n---\n{}\n",
            words(400)
        ),
    );
    write(
        &base.join("content/posts/later.md"),
        "---\ntitle: Later\ndate: 2024-06-15\ndescription: Second post\n---\n\
         ```rust title=\"main.rs\"\n\nfn main() {}\n\n```\n\n<Tweet id=\"20\" />\n",
    );
    write(
        &base.join("content/posts/hello.md"),
        "---\ntitle: Shadow\ndate: 2020-01-01\ndescription: d\n---\nx\n",
    );
    write(&base.join("content/posts/notes.txt"), "not a post");
    write(&base.join("static/favicon.ico"), "icon");

    let site = Site::new(base).unwrap();
    site.generate().unwrap();

    let public = base.join("public");
    for file in [
        "index.html",
        "blog/index.html",
        "blog/hello/index.html",
        "blog/later/index.html",
        "sitemap.xml",
        "404.html",
        "favicon.ico",
    ] {
        assert!(public.join(file).is_file(), "missing {file}");
    }
    assert!(!public.join("blog/notes").exists());

    let home = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(home.contains("Hi there"));

    let listing = fs::read_to_string(public.join("blog/index.html")).unwrap();
    let later = listing.find(r#"href="/blog/later""#).unwrap();
    let hello = listing.find(r#"href="/blog/hello""#).unwrap();
    assert!(later < hello, "newest post first");
    assert!(listing.contains("2 min read"));
    assert_eq!(listing.matches("tag-badge").count(), 2);
    assert_eq!(listing.matches(r#"href="/blog/hello""#).count(), 1);
    assert!(!listing.contains("Shadow"));

    let index = site.post_index();
    let slugs = index.slugs().unwrap();
    assert_eq!(slugs, vec!["later", "hello"]);
    for slug in &slugs {
        assert!(index.resolve(slug).is_ok(), "{slug} does not resolve");
    }

    let post = fs::read_to_string(public.join("blog/later/index.html")).unwrap();
    assert!(post.contains(">main.rs</span>"));
    assert!(post.contains(r#"data-copy="fn main() {}""#));
    assert!(post.contains("twitter-tweet"));
    assert!(post.contains("platform.twitter.com/widgets.js"));

    let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
    assert_eq!(sitemap.matches("<url>").count(), 4);
    assert!(sitemap.contains("<loc>https://notes.example</loc>"));
    assert!(sitemap.contains("<loc>https://notes.example/blog/hello</loc>"));
    assert!(sitemap.contains("<lastmod>2024-06-15T00:00:00+00:00</lastmod>"));

    site.clean().unwrap();
    assert!(!public.exists());
}

#[test]
fn generate_empty_site() {
    let dir = TempDir::new().unwrap();
    let site = Site::new(dir.path()).unwrap();
    site.generate().unwrap();

    let listing = fs::read_to_string(dir.path().join("public/blog/index.html")).unwrap();
    assert!(listing.contains("No posts yet. Check back soon!"));
    let sitemap = fs::read_to_string(dir.path().join("public/sitemap.xml")).unwrap();
    assert_eq!(sitemap.matches("<url>").count(), 2);
}
