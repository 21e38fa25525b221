//! Page compositors - turn posts into complete HTML pages
//!
//! Both the static generator and the live server go through [`Pages`], so a
//! page looks the same whichever way it is produced.

mod blog;
pub mod sitemap;

pub use blog::{post_page_meta, PageMeta, PageResponse};
pub use sitemap::{ChangeFrequency, SitemapEntry};

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use tera::Context;

use crate::config::SiteConfig;
use crate::content::PostSource;
use crate::helpers::{full_url_for, url_for};
use crate::markup::Markup;
use crate::templates::{HeaderData, NavLink, TemplateRenderer};

/// Title of the generic not-found page
pub const NOT_FOUND_TITLE: &str = "Page Not Found";

/// Renders every page of the site
pub struct Pages {
    config: SiteConfig,
    templates: TemplateRenderer,
    markup: Markup,
}

impl Pages {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            templates: TemplateRenderer::new()?,
            markup: Markup::new(&config.highlight),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Landing page: hero headline, tagline and a link to the blog
    pub fn home(&self) -> Result<String> {
        let mut context = self.base_context("/", &self.config.title, &self.config.description);
        context.insert(
            "header",
            &HeaderData {
                title: self.config.home.headline.clone(),
                description: non_empty(&self.config.home.tagline),
            },
        );
        self.templates.render("home.html", &context)
    }

    /// sitemap.xml listing the fixed pages and every post
    pub fn sitemap(&self, posts: &impl PostSource, now: DateTime<Utc>) -> Result<String> {
        let posts = posts.list_all()?;
        Ok(sitemap::to_xml(&sitemap::entries(&self.config, &posts, now)))
    }

    /// Standalone not-found page
    pub fn not_found(&self) -> Result<String> {
        self.not_found_with(&PageMeta {
            title: NOT_FOUND_TITLE.to_string(),
            description: None,
        })
    }

    fn not_found_with(&self, meta: &PageMeta) -> Result<String> {
        let mut context = self.base_context(
            "",
            &meta.title,
            meta.description.as_deref().unwrap_or(""),
        );
        context.insert(
            "header",
            &HeaderData {
                title: meta.title.clone(),
                description: Some(
                    "The page you are looking for does not exist or has been moved.".to_string(),
                ),
            },
        );
        self.templates.render("not_found.html", &context)
    }

    /// Context shared by every page: config, navigation, head metadata
    fn base_context(&self, path: &str, title: &str, description: &str) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.config);
        context.insert("page_title", title);
        context.insert("page_description", description);
        context.insert("home_url", &url_for(&self.config, "/"));
        context.insert("blog_url", &url_for(&self.config, "/blog"));
        context.insert("current_year", &Utc::now().year());
        context.insert("scripts", &Vec::<&str>::new());

        if !path.is_empty() {
            context.insert("canonical_url", &full_url_for(&self.config, path));
        }

        let nav: Vec<NavLink> = [("/", "Home"), ("/blog", "Blog")]
            .into_iter()
            .map(|(href, label)| NavLink {
                href: url_for(&self.config, href),
                label,
                active: href == path,
            })
            .collect();
        context.insert("nav", &nav);

        context
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.trim().is_empty()).then(|| s.to_string())
}
