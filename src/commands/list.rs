//! List site content

use anyhow::Result;

use crate::content::PostMetadata;
use crate::Site;

/// Print every post, newest first, as text or JSON
pub fn run(site: &Site, json: bool) -> Result<()> {
    let posts = site.post_index().list_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else {
        print!("{}", format_listing(&posts));
    }

    Ok(())
}

/// One line per post: date, title, reading time and slug
pub fn format_listing(posts: &[PostMetadata]) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        out.push_str(&format!(
            "  {} - {} ({}) [{}]\n",
            post.date, post.title, post.reading_time, post.slug
        ));
    }
    out
}
