//! Social-media embeds written as MDX tags in post bodies

use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::escape_html;

lazy_static! {
    /// `<Tweet id="123" />`, `<Tweet id='123'/>` or `<Tweet id={"123"} />`
    static ref TWEET_TAG: Regex = Regex::new(
        r#"<Tweet\s+id\s*=\s*(?:"([^"]*)"|'([^']*)'|\{\s*"([^"]*)"\s*\})\s*/>"#
    )
    .unwrap();
}

/// Embed providers recognized in post bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    Tweet,
}

/// A social-media card reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub kind: EmbedKind,
    pub id: String,
}

/// Renders embed cards; the markup renderer delegates every embed here
pub trait EmbedRenderer {
    fn render(&self, embed: &Embed) -> String;

    /// Script the page needs once when it contains at least one embed
    fn script(&self, _kind: EmbedKind) -> Option<&'static str> {
        None
    }
}

/// Renders tweets as the blockquotes X's widget script upgrades
#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterEmbed;

impl EmbedRenderer for TwitterEmbed {
    fn render(&self, embed: &Embed) -> String {
        match embed.kind {
            EmbedKind::Tweet => format!(
                r#"<div class="not-prose my-6 flex justify-center"><blockquote class="twitter-tweet" data-dnt="true" data-theme="dark"><a href="https://twitter.com/i/status/{id}">View post on X</a></blockquote></div>"#,
                id = escape_html(&embed.id)
            ),
        }
    }

    fn script(&self, kind: EmbedKind) -> Option<&'static str> {
        match kind {
            EmbedKind::Tweet => Some(
                r#"<script async src="https://platform.twitter.com/widgets.js" charset="utf-8"></script>"#,
            ),
        }
    }
}

/// Embeds in an HTML fragment made up of nothing but embed tags
///
/// Returns `None` when the fragment holds anything else, so ordinary HTML
/// keeps passing through.
pub fn parse_embeds(html: &str) -> Option<Vec<Embed>> {
    let mut embeds = Vec::new();
    let mut last = 0;

    for caps in TWEET_TAG.captures_iter(html) {
        let whole = caps.get(0)?;
        if !html[last..whole.start()].trim().is_empty() {
            return None;
        }
        let id = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim().to_string())?;
        embeds.push(Embed {
            kind: EmbedKind::Tweet,
            id,
        });
        last = whole.end();
    }

    if embeds.is_empty() || !html[last..].trim().is_empty() {
        return None;
    }
    Some(embeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_tweet() {
        let embeds = parse_embeds("<Tweet id=\"1234567890\" />\n").unwrap();
        assert_eq!(
            embeds,
            vec![Embed {
                kind: EmbedKind::Tweet,
                id: "1234567890".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_quote_styles() {
        assert_eq!(parse_embeds("<Tweet id='1'/>").unwrap()[0].id, "1");
        assert_eq!(parse_embeds("<Tweet id={\"2\"} />").unwrap()[0].id, "2");
        assert_eq!(parse_embeds("<Tweet id=\"3\" />\n<Tweet id=\"4\" />").unwrap().len(), 2);
    }

    #[test]
    fn test_other_html_is_not_an_embed() {
        assert!(parse_embeds("<div class=\"note\">hi</div>").is_none());
        assert!(parse_embeds("<Tweet id=\"1\" /><p>extra</p>").is_none());
        assert!(parse_embeds("").is_none());
    }

    #[test]
    fn test_render_escapes_id() {
        let html = TwitterEmbed.render(&Embed {
            kind: EmbedKind::Tweet,
            id: "1\"><script>".to_string(),
        });
        assert!(html.contains("twitter-tweet"));
        assert!(!html.contains("<script>"));
    }
}
