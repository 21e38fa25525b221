//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary, so a site directory
//! only needs its posts and config.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rendered post bodies and scripts are already HTML; user text is
        // escaped in the templates with the `escape` filter
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            (
                "partials/page_header.html",
                include_str!("site/partials/page_header.html"),
            ),
            ("partials/tags.html", include_str!("site/partials/tags.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderData {
    pub title: String,
    pub description: Option<String>,
}

/// A post as the listing and detail templates see it
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub display_date: String,
    /// Machine-readable date, only when the authored date parses
    pub datetime: Option<String>,
    pub reading_time: String,
    pub tags: Vec<String>,
}
