//! Code block rendering with copy-to-clipboard support
//!
//! Highlighting splits a block into one `CodeLine` element per source line
//! and throws away the newlines, so the text a reader copies has to be
//! rebuilt from the decorated tree rather than read off it.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use super::node::Node;
use crate::helpers::escape_html;

/// How long the copy button shows its "copied" state
pub const COPY_RESET_DELAY: Duration = Duration::from_secs(2);

/// Language label used when a block names none
pub const DEFAULT_LANGUAGE: &str = "plaintext";

lazy_static! {
    static ref TITLE_META: Regex = Regex::new(r#"title=(?:"([^"]*)"|'([^']*)')"#).unwrap();
}

/// What a fenced block's info string says about it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeInfo {
    pub language: Option<String>,
    pub title: Option<String>,
    pub show_line_numbers: bool,
}

impl CodeInfo {
    /// Parse an info string such as `rust title="main.rs" showLineNumbers`
    pub fn parse(info: &str) -> Self {
        let info = info.trim();
        let mut parts = info.splitn(2, char::is_whitespace);

        let language = parts
            .next()
            .filter(|lang| !lang.is_empty() && !lang.contains('='))
            .map(|lang| lang.trim_start_matches("language-").to_string());
        let meta = if language.is_some() {
            parts.next().unwrap_or("")
        } else {
            info
        };

        let title = TITLE_META.captures(meta).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        });
        let show_line_numbers = meta
            .split_whitespace()
            .any(|word| word == "showLineNumbers");

        Self {
            language,
            title,
            show_line_numbers,
        }
    }

    /// Language shown in the block header
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// Flatten a node tree back into source text
///
/// Text and numeric leaves contribute their literal value. Within any
/// sequence of children, each code line contributes its own flattened
/// children and consecutive lines are separated by a newline; every other
/// child is concatenated in place. Raw HTML and embeds contribute nothing.
pub fn extract_text(node: &Node) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::Number(n) => n.to_string(),
        Node::Fragment(children) => extract_sequence(children),
        Node::Element(el) => extract_sequence(&el.children),
        Node::Raw(_) | Node::Embed(_) => String::new(),
    }
}

fn extract_sequence(children: &[Node]) -> String {
    let mut out = String::new();
    let mut seen_line = false;

    for child in children {
        if child.is_code_line() {
            if seen_line {
                out.push('\n');
            }
            seen_line = true;
            out.push_str(&extract_sequence(child.children()));
        } else {
            out.push_str(&extract_text(child));
        }
    }

    out
}

/// Text the copy button puts on the clipboard
///
/// Leading and trailing blank lines are dropped; blank lines in between
/// stay. `None` when there is nothing to copy.
pub fn copy_text(lines: &[Node]) -> Option<String> {
    let text = extract_sequence(lines);
    let text = text.trim_start_matches('\n').trim_end_matches('\n');
    (!text.is_empty()).then(|| text.to_string())
}

/// State of a block's copy button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
}

impl CopyState {
    pub fn label(self) -> &'static str {
        match self {
            CopyState::Idle => "Copy",
            CopyState::Copied => "Copied!",
        }
    }

    pub fn attr(self) -> &'static str {
        match self {
            CopyState::Idle => "idle",
            CopyState::Copied => "copied",
        }
    }
}

/// Client behaviour for copy buttons, included once on pages with code
///
/// A successful copy flips the button to "copied" for `data-reset-ms`
/// milliseconds; a failed one only logs to the console.
pub const COPY_SCRIPT: &str = r#"<script>
document.addEventListener("click", async function (event) {
  var button = event.target.closest("button[data-copy]");
  if (!button || button.disabled) return;
  var code = button.getAttribute("data-copy");
  if (!code) return;
  try {
    await navigator.clipboard.writeText(code);
    button.dataset.state = "copied";
    button.querySelector("[data-label]").textContent = "Copied!";
    clearTimeout(button._reset);
    button._reset = setTimeout(function () {
      button.dataset.state = "idle";
      button.querySelector("[data-label]").textContent = "Copy";
    }, Number(button.dataset.resetMs));
  } catch (err) {
    console.error("Failed to copy code:", err);
  }
});
</script>"#;

/// Render a highlighted block: header with title or language, copy button,
/// and the line-wrapped code
pub fn render_code_block(
    info: &CodeInfo,
    lines: &[Node],
    body_html: &str,
    background: Option<&str>,
) -> String {
    let mut html = String::new();
    let state = CopyState::default();

    html.push_str(
        r#"<div class="group relative my-6 overflow-hidden rounded-lg border border-border bg-card">"#,
    );
    html.push_str(
        r#"<div class="flex items-center justify-between border-b border-border bg-muted/30 px-3 py-2 sm:px-4">"#,
    );
    html.push_str(r#"<div class="flex items-center gap-2 min-w-0 flex-1">"#);
    match &info.title {
        Some(title) => html.push_str(&format!(
            r#"<span class="text-xs font-medium text-muted-foreground truncate">{}</span>"#,
            escape_html(title)
        )),
        None => html.push_str(&format!(
            r#"<span class="text-xs font-mono text-muted-foreground uppercase tracking-wide">{}</span>"#,
            escape_html(info.language_label())
        )),
    }
    html.push_str("</div>");

    let copy_attr = match copy_text(lines) {
        Some(text) => format!(r#" data-copy="{}""#, escape_html(&text)),
        None => " disabled".to_string(),
    };
    html.push_str(&format!(
        r#"<button type="button" class="copy-button flex items-center gap-1.5 rounded px-2 py-1 text-xs font-medium text-muted-foreground hover:bg-muted hover:text-foreground" aria-label="Copy code to clipboard" data-state="{}" data-reset-ms="{}"{}><span data-label>{}</span></button>"#,
        state.attr(),
        COPY_RESET_DELAY.as_millis(),
        copy_attr,
        state.label()
    ));
    html.push_str("</div>");

    let pre_style = background
        .map(|bg| format!(r#" style="background-color:{}""#, escape_html(bg)))
        .unwrap_or_default();
    let lang = escape_html(info.language_label());
    html.push_str(&format!(
        r#"<div class="overflow-x-auto"><pre class="m-0 border-0 p-3 sm:p-4"{}><code class="language-{}" data-language="{}"{}>"#,
        pre_style,
        lang,
        lang,
        if info.show_line_numbers {
            r#" data-line-numbers="""#
        } else {
            ""
        }
    ));
    html.push_str(body_html);
    html.push_str("</code></pre></div></div>");

    html
}
