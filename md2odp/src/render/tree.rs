//! Builds slide trees out of renderer callback results.
//!
//! # The High-Level Concept
//!
//! Every renderer callback returns a small [`PartialTree`] holding the nodes it produced, and
//! the markdown driver combines sibling results in document order. Markdown never marks where a
//! slide ends: only a heading starts a new one. So the combining step decides by looking at
//! the shape of what has been accumulated so far whether incoming content opens a new slide,
//! joins the content frame of the current slide, or creates that frame.
//!
//! # Merge Rules
//!
//! `merge(accumulated, incoming)` applies the first rule that matches:
//!
//! 1. **Outline continuation.** The last accumulated node is a page, the incoming content is
//!    not a page, and the page already holds an outline frame: the incoming nodes, with inline
//!    runs wrapped into paragraphs, are appended to that frame's text box.
//! 2. **Image append.** Same page condition, no outline frame, and the incoming content starts
//!    with an image frame: the incoming nodes become direct children of the page.
//! 3. **Outline creation.** Same page condition otherwise: a new outline frame holding the
//!    wrapped incoming nodes is added to the page.
//! 4. **Concatenation.** In every other case (nothing accumulated, last node not a page, or a
//!    new page arriving) the node lists are simply joined.
//!
//! Example for `## Title`, a paragraph, a list and an image:
//! ```text
//! header      -> [Page(Title)]
//! paragraph   -> [Page(Title, Outline[P])]                  rule 3
//! list        -> [Page(Title, Outline[P, List])]            rule 1
//! image       -> [Page(Title, Outline[P, List, Image])]     rule 1
//! ```
//! With the image directly after the heading, rule 2 places it next to the title frame instead.

use crate::odf::{Frame, Node, Paragraph, PresentationClass, Rect, Span};

pub const OUTLINE_STYLE: &str = "md2odp-OutlineText";

/// Ordered nodes produced by one or more callbacks, plus the geometry used when a merge
/// has to create an outline frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialTree {
    nodes: Vec<Node>,
    outline: Rect,
}

impl PartialTree {
    pub fn new(nodes: Vec<Node>, outline: Rect) -> Self {
        Self { nodes, outline }
    }

    pub fn empty(outline: Rect) -> Self {
        Self::new(Vec::new(), outline)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `text` as an unstyled span.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.nodes.push(Node::Span(Span::text(text)));
    }

    /// Merge the nodes of `other` into this tree.
    pub fn merge(&mut self, other: PartialTree) {
        self.merge_nodes(other.nodes);
    }

    fn merge_nodes(&mut self, incoming: Vec<Node>) {
        let Some(first) = incoming.first() else {
            return;
        };
        let incoming_page = matches!(first, Node::Page(_));
        let incoming_image = first.is_image_frame();

        let page = match self.nodes.last_mut() {
            Some(Node::Page(page)) if !incoming_page => page,
            _ => {
                self.nodes.extend(incoming);
                return;
            }
        };

        if let Some(text_box) = page.outline_text_box_mut() {
            text_box.extend(wrap_spans(incoming));
        } else if incoming_image {
            page.children.extend(incoming);
        } else {
            page.children.push(Node::Frame(Frame::text(
                PresentationClass::Outline,
                OUTLINE_STYLE,
                self.outline.clone(),
                wrap_spans(incoming),
            )));
        }
    }

    /// Builder form of [`merge`](Self::merge).
    pub fn merged(mut self, other: PartialTree) -> Self {
        self.merge(other);
        self
    }
}

/// Wrap every maximal run of inline nodes (spans, links) into one paragraph.
///
/// Other nodes keep their position and end the current run.
pub fn wrap_spans(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut run: Vec<Node> = Vec::new();

    for node in nodes {
        if node.is_inline() {
            run.push(node);
            continue;
        }
        if !run.is_empty() {
            out.push(paragraph(std::mem::take(&mut run)));
        }
        out.push(node);
    }
    if !run.is_empty() {
        out.push(paragraph(run));
    }
    out
}

fn paragraph(children: Vec<Node>) -> Node {
    Node::Paragraph(Paragraph {
        style: None,
        children,
    })
}
