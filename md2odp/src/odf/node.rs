//! Document element model for presentation content.
//!
//! A [`Node`] is one element of the `content.xml` body: slides, frames, text containers and
//! the inline runs inside them. Nodes are plain owned values; a tree is handed over to the
//! [`Presentation`](crate::odf::Presentation) as a whole when slides are inserted.

use serde::Deserialize;

/// Position and size of a frame, as ODF length strings (`"22cm"`, `"0.5cm"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rect {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

impl Rect {
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            width: width.into(),
            height: height.into(),
        }
    }
}

/// Presentation role of a frame (`presentation:class`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationClass {
    Title,
    Outline,
    Graphic,
}

impl PresentationClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PresentationClass::Title => "title",
            PresentationClass::Outline => "outline",
            PresentationClass::Graphic => "graphic",
        }
    }
}

/// A single element of slide content.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Page(Page),
    Frame(Frame),
    Paragraph(Paragraph),
    Span(Span),
    Link(Link),
    List(List),
    ListItem(ListItem),
    /// Character data
    Text(String),
    LineBreak,
    /// A run of `n` significant spaces (`text:s`)
    Spaces(usize),
    Tab,
}

/// A slide (`draw:page`).
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub name: String,
    pub master_page: String,
    pub layout: String,
    pub children: Vec<Node>,
}

/// A positioned container (`draw:frame`).
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub class: PresentationClass,
    pub style: String,
    pub rect: Rect,
    pub content: FrameContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameContent {
    /// `draw:text-box` with block children
    TextBox(Vec<Node>),
    Image(ImageContent),
}

/// An embedded picture (`draw:image`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    /// Path of the picture inside the package
    pub href: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub style: Option<String>,
    pub children: Vec<Node>,
}

/// A styled inline run (`text:span`). Spans nest to combine styles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub style: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub href: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    pub style: Option<String>,
    pub items: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub children: Vec<Node>,
}

impl Span {
    /// Unstyled span holding `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            style: None,
            children: vec![Node::Text(text.into())],
        }
    }

    pub fn styled(style: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            style: Some(style.into()),
            children,
        }
    }
}

impl Frame {
    /// Text frame with the given role, holding `children` in its text box.
    pub fn text(class: PresentationClass, style: &str, rect: Rect, children: Vec<Node>) -> Self {
        Self {
            class,
            style: style.to_string(),
            rect,
            content: FrameContent::TextBox(children),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.content, FrameContent::Image(_))
    }

    pub fn text_box(&self) -> Option<&[Node]> {
        match &self.content {
            FrameContent::TextBox(children) => Some(children),
            FrameContent::Image(_) => None,
        }
    }
}

impl Page {
    /// Text box of the first outline frame found among the page's descendants.
    pub fn outline_text_box_mut(&mut self) -> Option<&mut Vec<Node>> {
        find_outline(&mut self.children)
    }
}

fn find_outline(nodes: &mut [Node]) -> Option<&mut Vec<Node>> {
    for node in nodes {
        match node {
            Node::Frame(Frame {
                class: PresentationClass::Outline,
                content: FrameContent::TextBox(children),
                ..
            }) => return Some(children),
            Node::Frame(Frame {
                content: FrameContent::TextBox(children),
                ..
            }) => {
                if let Some(found) = find_outline(children) {
                    return Some(found);
                }
            }
            other => {
                if let Some(children) = other.children_mut() {
                    if let Some(found) = find_outline(children) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

impl Node {
    /// Inline nodes must live inside a paragraph when placed in block containers.
    pub fn is_inline(&self) -> bool {
        matches!(self, Node::Span(_) | Node::Link(_))
    }

    pub fn is_image_frame(&self) -> bool {
        matches!(self, Node::Frame(frame) if frame.is_image())
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Page(page) => &page.children,
            Node::Frame(frame) => frame.text_box().unwrap_or(&[]),
            Node::Paragraph(para) => &para.children,
            Node::Span(span) => &span.children,
            Node::Link(link) => &link.children,
            Node::List(list) => &list.items,
            Node::ListItem(item) => &item.children,
            Node::Text(_) | Node::LineBreak | Node::Spaces(_) | Node::Tab => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Page(page) => Some(&mut page.children),
            Node::Frame(Frame {
                content: FrameContent::TextBox(children),
                ..
            }) => Some(children),
            Node::Paragraph(para) => Some(&mut para.children),
            Node::Span(span) => Some(&mut span.children),
            Node::Link(link) => Some(&mut link.children),
            Node::List(list) => Some(&mut list.items),
            Node::ListItem(item) => Some(&mut item.children),
            _ => None,
        }
    }

    /// All nodes below this one, in document order.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// Concatenated character data, with whitespace markers expanded.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        push_plain_text(self, &mut out);
        out
    }

    /// Style name of paragraphs, spans and lists.
    pub fn style_name(&self) -> Option<&str> {
        match self {
            Node::Paragraph(para) => para.style.as_deref(),
            Node::Span(span) => span.style.as_deref(),
            Node::List(list) => list.style.as_deref(),
            Node::Frame(frame) => Some(frame.style.as_str()),
            _ => None,
        }
    }
}

fn collect_descendants<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    for child in node.children() {
        out.push(child);
        collect_descendants(child, out);
    }
}

fn push_plain_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::LineBreak => out.push('\n'),
        Node::Spaces(count) => out.push_str(&" ".repeat(*count)),
        Node::Tab => out.push('\t'),
        other => {
            for child in other.children() {
                push_plain_text(child, out);
            }
        }
    }
}
