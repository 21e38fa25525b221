//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    /// File extensions recognized as posts, without the leading dot
    pub extensions: Vec<String>,
    pub words_per_minute: usize,
    /// Fail on missing title/date/description instead of rendering blanks
    pub strict_front_matter: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: "Thoughts on software engineering, technology, and building products."
                .to_string(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            posts_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            extensions: vec!["mdx".to_string(), "md".to_string()],
            words_per_minute: 200,
            strict_front_matter: false,
            highlight: HighlightConfig::default(),

            home: HomeConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a syntect default theme
    pub theme: String,
    /// Paint the theme background behind code blocks
    pub keep_background: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            keep_background: true,
        }
    }
}

/// Home page hero configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub headline: String,
    pub tagline: String,
    /// Label of the call-to-action link to the blog listing
    pub cta: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            headline: "Hey, I'm John".to_string(),
            tagline: "Thoughts on software engineering, technology, and building products."
                .to_string(),
            cta: "Read the Blog".to_string(),
        }
    }
}
