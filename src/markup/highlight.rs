//! Syntax highlighting of code blocks into per-line node trees

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::node::{ElementKind, Node};

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Syntax highlighter that decorates code one source line at a time
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    keep_background: bool,
}

impl Highlighter {
    /// Create a highlighter for one of syntect's default themes
    pub fn new(theme_name: &str, keep_background: bool) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    "Unknown highlight theme {:?}, using {}",
                    theme_name,
                    FALLBACK_THEME
                );
                theme_set
                    .themes
                    .remove(FALLBACK_THEME)
                    .unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            keep_background,
        }
    }

    /// CSS background for code blocks, when the theme's background is kept
    pub fn background(&self) -> Option<String> {
        if !self.keep_background {
            return None;
        }
        self.theme.settings.background.map(css_color)
    }

    /// Highlight code into one `CodeLine` element per source line
    ///
    /// Line terminators are not part of the output; the line structure
    /// carries them. Unknown languages render as plain text lines.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> Vec<Node> {
        let lang = lang.unwrap_or("plaintext");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let tokens = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges
                    .into_iter()
                    .filter_map(|(style, text)| {
                        let text = strip_line_ending(text);
                        (!text.is_empty()).then(|| {
                            Node::element(
                                ElementKind::Token {
                                    style: token_css(&style),
                                },
                                vec![Node::text(text)],
                            )
                        })
                    })
                    .collect(),
                Err(e) => {
                    tracing::debug!("Highlighting failed for {}: {}", lang, e);
                    plain_line(line)
                }
            };
            lines.push(Node::element(ElementKind::CodeLine, tokens));
        }

        lines
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(FALLBACK_THEME, true)
    }
}

fn plain_line(line: &str) -> Vec<Node> {
    let text = strip_line_ending(line);
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::text(text)]
    }
}

fn strip_line_ending(s: &str) -> &str {
    s.trim_end_matches('\n').trim_end_matches('\r')
}

fn token_css(style: &Style) -> String {
    let mut css = format!("color:{}", css_color(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        css.push_str(";font-weight:bold");
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        css.push_str(";font-style:italic");
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        css.push_str(";text-decoration:underline");
    }
    css
}

fn css_color(c: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}
