//! Node tree to presentational HTML

use pulldown_cmark::Alignment;

use super::code_block::{extract_text, render_code_block, COPY_SCRIPT};
use super::embed::EmbedRenderer;
use super::node::{Element, ElementKind, Node};
use crate::helpers::escape_html;

/// Rendered post body plus the scripts it needs on the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedBody {
    pub html: String,
    pub scripts: Vec<&'static str>,
}

/// Maps node kinds to the site's visual treatment
pub struct HtmlRenderer<'a> {
    embeds: &'a dyn EmbedRenderer,
    code_background: Option<String>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(embeds: &'a dyn EmbedRenderer, code_background: Option<String>) -> Self {
        Self {
            embeds,
            code_background,
        }
    }

    /// Render a whole body, collecting page scripts along the way
    pub fn render(&self, node: &Node) -> RenderedBody {
        let mut out = RenderedBody::default();
        let mut html = String::new();
        self.write_node(node, &mut html, &mut out.scripts);
        out.html = html;
        out
    }

    fn write_node(&self, node: &Node, out: &mut String, scripts: &mut Vec<&'static str>) {
        match node {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Number(n) => out.push_str(&n.to_string()),
            Node::Fragment(children) => self.write_children(children, out, scripts),
            Node::Raw(html) => out.push_str(html),
            Node::Embed(embed) => {
                out.push_str(&self.embeds.render(embed));
                add_script(scripts, self.embeds.script(embed.kind));
            }
            Node::Element(el) => self.write_element(el, out, scripts),
        }
    }

    fn write_children(
        &self,
        children: &[Node],
        out: &mut String,
        scripts: &mut Vec<&'static str>,
    ) {
        for child in children {
            self.write_node(child, out, scripts);
        }
    }

    fn write_element(&self, el: &Element, out: &mut String, scripts: &mut Vec<&'static str>) {
        let (open, close): (String, &str) = match &el.kind {
            ElementKind::Heading { level, id } => {
                let (tag, class) = heading_style(*level);
                let id_attr = id
                    .as_ref()
                    .map(|id| format!(r#" id="{}""#, escape_html(id)))
                    .unwrap_or_default();
                out.push_str(&format!(r#"<{tag}{id_attr} class="{class}">"#));
                self.write_children(&el.children, out, scripts);
                out.push_str(&format!("</{tag}>"));
                return;
            }
            ElementKind::Paragraph => (r#"<p class="mb-4 leading-relaxed">"#.into(), "</p>"),
            ElementKind::Link { href, title } => (
                format!(
                    r#"<a href="{}"{} class="text-primary hover:text-accent transition-colors underline decoration-primary/30 hover:decoration-accent underline-offset-2">"#,
                    escape_html(href),
                    title_attr(title)
                ),
                "</a>",
            ),
            ElementKind::Image { src, title } => {
                out.push_str(&format!(
                    r#"<img src="{}" alt="{}"{} class="rounded-md my-6" loading="lazy" />"#,
                    escape_html(src),
                    escape_html(&extract_text(&Node::Fragment(el.children.clone()))),
                    title_attr(title)
                ));
                return;
            }
            ElementKind::List { ordered: false, .. } => (
                r#"<ul class="list-disc list-inside mb-4 space-y-1 ml-4">"#.into(),
                "</ul>",
            ),
            ElementKind::List {
                ordered: true,
                start,
            } => (
                format!(
                    r#"<ol{} class="list-decimal list-inside mb-4 space-y-1 ml-4">"#,
                    match start {
                        Some(n) if *n != 1 => format!(r#" start="{}""#, n),
                        _ => String::new(),
                    }
                ),
                "</ol>",
            ),
            ElementKind::ListItem => (r#"<li class="leading-relaxed">"#.into(), "</li>"),
            ElementKind::TaskMarker { checked } => {
                out.push_str(&format!(
                    r#"<input type="checkbox" disabled{} class="mr-2" /> "#,
                    if *checked { " checked" } else { "" }
                ));
                return;
            }
            ElementKind::BlockQuote => (
                r#"<blockquote class="border-l-2 border-primary bg-card pl-4 pr-3 py-3 my-4 italic text-muted-foreground">"#.into(),
                "</blockquote>",
            ),
            ElementKind::InlineCode => (
                r#"<code class="inline bg-secondary text-primary px-1.5 py-0.5 rounded text-sm font-mono">"#.into(),
                "</code>",
            ),
            ElementKind::CodeBlock(info) => {
                let mut body = String::new();
                for (i, line) in el.children.iter().enumerate() {
                    if i > 0 {
                        body.push('\n');
                    }
                    self.write_node(line, &mut body, scripts);
                }
                out.push_str(&render_code_block(
                    info,
                    &el.children,
                    &body,
                    self.code_background.as_deref(),
                ));
                add_script(scripts, Some(COPY_SCRIPT));
                return;
            }
            // Blank lines keep their height
            ElementKind::CodeLine if el.children.is_empty() => {
                out.push_str(r#"<span data-line=""> </span>"#);
                return;
            }
            ElementKind::CodeLine => (r#"<span data-line="">"#.into(), "</span>"),
            ElementKind::Token { style } => {
                (format!(r#"<span style="{}">"#, escape_html(style)), "</span>")
            }
            ElementKind::Table { .. } => (
                r#"<div class="overflow-x-auto my-6"><table class="w-full border-collapse text-sm">"#.into(),
                "</table></div>",
            ),
            ElementKind::TableHead => (
                r#"<thead class="bg-secondary"><tr class="border-b border-border">"#.into(),
                "</tr></thead>",
            ),
            ElementKind::TableBody => ("<tbody>".into(), "</tbody>"),
            ElementKind::TableRow => (r#"<tr class="border-b border-border">"#.into(), "</tr>"),
            ElementKind::TableHeaderCell(align) => (
                format!(
                    r#"<th class="px-4 py-3 font-semibold text-foreground {}">"#,
                    align_class(*align)
                ),
                "</th>",
            ),
            ElementKind::TableCell(align) => (
                format!(
                    r#"<td class="px-4 py-3 text-muted-foreground {}">"#,
                    align_class(*align)
                ),
                "</td>",
            ),
            ElementKind::Rule => {
                out.push_str(r#"<hr class="border-border my-8" />"#);
                return;
            }
            ElementKind::Emphasis => ("<em>".into(), "</em>"),
            ElementKind::Strong => ("<strong>".into(), "</strong>"),
            ElementKind::Strikethrough => ("<del>".into(), "</del>"),
            ElementKind::HardBreak => {
                out.push_str("<br />");
                return;
            }
            ElementKind::FootnoteReference { label } => {
                let id = escape_html(label);
                out.push_str(&format!(
                    r##"<sup class="footnote-ref"><a href="#fn-{id}" id="fnref-{id}">"##
                ));
                self.write_children(&el.children, out, scripts);
                out.push_str("</a></sup>");
                return;
            }
            ElementKind::FootnoteDefinition { label } => (
                format!(
                    r#"<div class="footnote text-sm text-muted-foreground mt-4" id="fn-{}">"#,
                    escape_html(label)
                ),
                "</div>",
            ),
            ElementKind::Other => (String::new(), ""),
        };

        out.push_str(&open);
        self.write_children(&el.children, out, scripts);
        out.push_str(close);
    }
}

/// Render a node tree with the default embed collaborator
pub fn render(
    node: &Node,
    embeds: &dyn EmbedRenderer,
    code_background: Option<String>,
) -> RenderedBody {
    HtmlRenderer::new(embeds, code_background).render(node)
}

fn heading_style(level: u8) -> (&'static str, &'static str) {
    match level {
        1 => ("h1", "text-2xl font-semibold mb-6 mt-8 first:mt-0"),
        2 => ("h2", "text-xl font-semibold mb-4 mt-8 border-b border-border pb-2"),
        3 => ("h3", "text-lg font-semibold mb-3 mt-6"),
        4 => ("h4", "text-base font-semibold mb-2 mt-4"),
        5 => ("h5", "text-base font-semibold mb-2 mt-4"),
        _ => ("h6", "text-base font-semibold mb-2 mt-4"),
    }
}

fn align_class(align: Alignment) -> &'static str {
    match align {
        Alignment::None | Alignment::Left => "text-left",
        Alignment::Center => "text-center",
        Alignment::Right => "text-right",
    }
}

fn title_attr(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    }
}

fn add_script(scripts: &mut Vec<&'static str>, script: Option<&'static str>) {
    if let Some(script) = script {
        if !scripts.contains(&script) {
            scripts.push(script);
        }
    }
}
