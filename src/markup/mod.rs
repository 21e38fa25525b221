//! Markdown/MDX body rendering
//!
//! Bodies are parsed into a [`Node`] tree, code blocks are decorated line by
//! line by the [`Highlighter`], and the tree is turned into HTML by the
//! [`HtmlRenderer`].

pub mod code_block;
pub mod embed;
pub mod highlight;
pub mod node;
mod parse;
mod render;

pub use code_block::{copy_text, extract_text, CodeInfo, CopyState, COPY_RESET_DELAY};
pub use embed::{Embed, EmbedKind, EmbedRenderer, TwitterEmbed};
pub use highlight::Highlighter;
pub use node::{Element, ElementKind, Node};
pub use parse::parse;
pub use render::{render, HtmlRenderer, RenderedBody};

use crate::config::HighlightConfig;

/// Parser, highlighter and embed collaborator bundled for page rendering
pub struct Markup {
    highlighter: Highlighter,
    embeds: Box<dyn EmbedRenderer + Send + Sync>,
}

impl Markup {
    pub fn new(config: &HighlightConfig) -> Self {
        Self::with_embeds(config, Box::new(TwitterEmbed))
    }

    pub fn with_embeds(
        config: &HighlightConfig,
        embeds: Box<dyn EmbedRenderer + Send + Sync>,
    ) -> Self {
        Self {
            highlighter: Highlighter::new(&config.theme, config.keep_background),
            embeds,
        }
    }

    /// Render a post body to HTML
    pub fn render_body(&self, markdown: &str) -> RenderedBody {
        let tree = parse(markdown, &self.highlighter);
        render(&tree, self.embeds.as_ref(), self.highlighter.background())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainEmbeds;

    impl EmbedRenderer for PlainEmbeds {
        fn render(&self, embed: &Embed) -> String {
            format!("[embed {}]", embed.id)
        }
    }

    #[test]
    fn test_custom_embed_renderer() {
        let markup = Markup::with_embeds(&HighlightConfig::default(), Box::new(PlainEmbeds));
        let body = markup.render_body("<Tweet id=\"7\" />\n");
        assert_eq!(body.html, "[embed 7]");
        assert!(body.scripts.is_empty());
    }

    #[test]
    fn test_render_body_defaults() {
        let markup = Markup::new(&HighlightConfig::default());
        let body = markup.render_body("Hello **world**");
        assert_eq!(
            body.html,
            r#"<p class="mb-4 leading-relaxed">Hello <strong>world</strong></p>"#
        );
    }
}
