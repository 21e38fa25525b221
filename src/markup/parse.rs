//! Markdown to node tree conversion

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

use super::code_block::CodeInfo;
use super::embed::parse_embeds;
use super::highlight::Highlighter;
use super::node::{ElementKind, Node};

/// Parse a post body into a node tree
///
/// Fenced and indented code blocks are run through the highlighter, and
/// HTML consisting only of embed tags becomes embed nodes.
pub fn parse(markdown: &str, highlighter: &Highlighter) -> Node {
    // Front-matter is split off before parsing, so no metadata blocks here
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM;

    let mut builder = TreeBuilder::new(highlighter);
    for event in Parser::new_ext(markdown, options) {
        builder.push(event);
    }
    builder.finish()
}

struct Frame {
    kind: ElementKind,
    children: Vec<Node>,
}

struct TreeBuilder<'h> {
    highlighter: &'h Highlighter,
    root: Vec<Node>,
    stack: Vec<Frame>,
    code: Option<(CodeInfo, String)>,
    html_block: Option<String>,
    in_table_head: bool,
    column: usize,
    footnotes: HashMap<String, usize>,
}

impl<'h> TreeBuilder<'h> {
    fn new(highlighter: &'h Highlighter) -> Self {
        Self {
            highlighter,
            root: Vec::new(),
            stack: Vec::new(),
            code: None,
            html_block: None,
            in_table_head: false,
            column: 0,
            footnotes: HashMap::new(),
        }
    }

    fn push(&mut self, event: Event<'_>) {
        if let Some((_, code)) = self.code.as_mut() {
            match event {
                Event::Text(text) => code.push_str(&text),
                Event::End(TagEnd::CodeBlock) => self.close_code_block(),
                _ => {}
            }
            return;
        }
        if let Some(html) = self.html_block.as_mut() {
            match event {
                Event::Html(text) | Event::Text(text) => html.push_str(&text),
                Event::End(TagEnd::HtmlBlock) => self.close_html_block(),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(TagEnd::Table) => {
                if matches!(self.top_kind(), Some(ElementKind::TableBody)) {
                    self.close();
                }
                self.close();
            }
            Event::End(TagEnd::TableHead) => {
                self.in_table_head = false;
                self.close();
            }
            Event::End(_) => self.close(),
            Event::Text(text) => self.append(Node::text(text.to_string())),
            Event::Code(code) => self.append(Node::element(
                ElementKind::InlineCode,
                vec![Node::text(code.to_string())],
            )),
            Event::Html(html) | Event::InlineHtml(html) => self.append_html(&html),
            Event::SoftBreak => self.append(Node::text("\n")),
            Event::HardBreak => self.append(Node::element(ElementKind::HardBreak, Vec::new())),
            Event::Rule => self.append(Node::element(ElementKind::Rule, Vec::new())),
            Event::TaskListMarker(checked) => self.append(Node::element(
                ElementKind::TaskMarker { checked },
                Vec::new(),
            )),
            Event::FootnoteReference(label) => {
                let next = self.footnotes.len() + 1;
                let number = *self.footnotes.entry(label.to_string()).or_insert(next);
                self.append(Node::element(
                    ElementKind::FootnoteReference {
                        label: label.to_string(),
                    },
                    vec![Node::Number(number)],
                ));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => CodeInfo::parse(&info),
                    CodeBlockKind::Indented => CodeInfo::default(),
                };
                self.code = Some((info, String::new()));
                return;
            }
            Tag::HtmlBlock => {
                self.html_block = Some(String::new());
                return;
            }
            Tag::Paragraph => ElementKind::Paragraph,
            Tag::Heading { level, id, .. } => ElementKind::Heading {
                level: level as u8,
                id: id.map(|id| id.to_string()),
            },
            Tag::BlockQuote(_) => ElementKind::BlockQuote,
            Tag::List(start) => ElementKind::List {
                ordered: start.is_some(),
                start,
            },
            Tag::Item => ElementKind::ListItem,
            Tag::FootnoteDefinition(label) => ElementKind::FootnoteDefinition {
                label: label.to_string(),
            },
            Tag::Table(alignments) => ElementKind::Table { alignments },
            Tag::TableHead => {
                self.in_table_head = true;
                self.column = 0;
                ElementKind::TableHead
            }
            Tag::TableRow => {
                if matches!(self.top_kind(), Some(ElementKind::Table { .. })) {
                    self.open(ElementKind::TableBody);
                }
                self.column = 0;
                ElementKind::TableRow
            }
            Tag::TableCell => {
                let alignment = self.column_alignment(self.column);
                self.column += 1;
                if self.in_table_head {
                    ElementKind::TableHeaderCell(alignment)
                } else {
                    ElementKind::TableCell(alignment)
                }
            }
            Tag::Emphasis => ElementKind::Emphasis,
            Tag::Strong => ElementKind::Strong,
            Tag::Strikethrough => ElementKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => ElementKind::Link {
                href: dest_url.to_string(),
                title: title.to_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => ElementKind::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
            },
            _ => ElementKind::Other,
        };
        self.open(kind);
    }

    fn open(&mut self, kind: ElementKind) {
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.append(Node::element(frame.kind, frame.children));
        }
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    fn append_html(&mut self, html: &str) {
        match parse_embeds(html) {
            Some(embeds) => {
                for embed in embeds {
                    self.append(Node::Embed(embed));
                }
            }
            None => self.append(Node::Raw(html.to_string())),
        }
    }

    fn close_code_block(&mut self) {
        if let Some((info, code)) = self.code.take() {
            let lines = self.highlighter.highlight(&code, info.language.as_deref());
            self.append(Node::element(ElementKind::CodeBlock(info), lines));
        }
    }

    fn close_html_block(&mut self) {
        if let Some(html) = self.html_block.take() {
            self.append_html(&html);
        }
    }

    fn top_kind(&self) -> Option<&ElementKind> {
        self.stack.last().map(|frame| &frame.kind)
    }

    fn column_alignment(&self, column: usize) -> pulldown_cmark::Alignment {
        self.stack
            .iter()
            .rev()
            .find_map(|frame| match &frame.kind {
                ElementKind::Table { alignments } => alignments.get(column).copied(),
                _ => None,
            })
            .unwrap_or(pulldown_cmark::Alignment::None)
    }

    fn finish(mut self) -> Node {
        while !self.stack.is_empty() {
            self.close();
        }
        Node::Fragment(self.root)
    }
}
