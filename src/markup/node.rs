//! Markup node tree

use pulldown_cmark::Alignment;

use super::code_block::CodeInfo;
use super::embed::Embed;

/// A node of a parsed post body
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text
    Text(String),
    /// Numeric leaf, e.g. a footnote reference index
    Number(usize),
    /// Sequence of sibling nodes
    Fragment(Vec<Node>),
    Element(Element),
    /// Raw HTML passed through untouched
    Raw(String),
    /// Social-media card rendered by an [`EmbedRenderer`](super::EmbedRenderer)
    Embed(Embed),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Heading { level: u8, id: Option<String> },
    Paragraph,
    Link { href: String, title: String },
    Image { src: String, title: String },
    List { ordered: bool, start: Option<u64> },
    ListItem,
    TaskMarker { checked: bool },
    BlockQuote,
    InlineCode,
    CodeBlock(CodeInfo),
    /// One source line of a highlighted code block
    CodeLine,
    /// Highlighted token with inline CSS
    Token { style: String },
    Table { alignments: Vec<Alignment> },
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell(Alignment),
    TableCell(Alignment),
    Rule,
    Emphasis,
    Strong,
    Strikethrough,
    HardBreak,
    FootnoteReference { label: String },
    FootnoteDefinition { label: String },
    /// Constructs with no dedicated treatment; only the children render
    Other,
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn element(kind: ElementKind, children: Vec<Node>) -> Self {
        Node::Element(Element { kind, children })
    }

    /// Child nodes, empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Fragment(children) => children,
            Node::Element(el) => &el.children,
            _ => &[],
        }
    }

    /// Whether this node is a code line wrapper
    pub fn is_code_line(&self) -> bool {
        matches!(
            self,
            Node::Element(Element {
                kind: ElementKind::CodeLine,
                ..
            })
        )
    }
}
