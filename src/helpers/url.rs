//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog") // -> "/blog"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// The site root itself maps to the bare domain, without a trailing slash.
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = url_for(config, path);
    let path = path.trim_end_matches('/');

    format!("{}{}", base, path)
}

/// Site-relative path of a post detail page
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("blog/{}", encode_segment(slug)))
}

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog"), "/blog");
        assert_eq!(url_for(&config, ""), "/");

        let nested = SiteConfig {
            root: "/site/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(url_for(&nested, "blog"), "/site/blog");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, "/"), "https://example.com");
        assert_eq!(full_url_for(&config, "/blog"), "https://example.com/blog");
    }

    #[test]
    fn test_post_path_encodes_slug() {
        let config = test_config();
        assert_eq!(post_path(&config, "hello"), "/blog/hello");
        assert_eq!(post_path(&config, "a b#c"), "/blog/a%20b%23c");
    }
}
