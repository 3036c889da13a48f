//! Markdown walk (Markdown → slide nodes)
//!
//! Pipeline: Markdown string → Comrak AST → renderer callbacks → merged [`PartialTree`]
//!
//! Every container starts from the renderer's placeholder and merges the results of its
//! children in document order, so slide boundaries fall out of the merge rules in
//! [`crate::render::tree`].

use crate::error::RenderResult;
use crate::render::renderer::Renderer;
use crate::render::tree::PartialTree;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Render `source` into a tree of slides.
pub fn render_markdown(source: &str, renderer: &mut Renderer<'_>) -> RenderResult<PartialTree> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);
    render_children(root, renderer, false)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

/// Result of an inline callback: `text` yields a plain string, everything else a tree.
enum Fragment {
    Text(String),
    Tree(PartialTree),
}

/// Merge the block results of all children of `node`.
///
/// `tight` is set inside the items of a tight list, whose paragraphs are not wrapped.
fn render_children<'a>(
    node: &'a AstNode<'a>,
    renderer: &mut Renderer<'_>,
    tight: bool,
) -> RenderResult<PartialTree> {
    let mut tree = renderer.placeholder();
    for child in node.children() {
        tree.merge(render_block(child, renderer, tight)?);
    }
    Ok(tree)
}

fn render_block<'a>(
    node: &'a AstNode<'a>,
    renderer: &mut Renderer<'_>,
    tight: bool,
) -> RenderResult<PartialTree> {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Document => render_children(node, renderer, false),

        NodeValue::Heading(heading) => {
            let text = render_inlines(node, renderer)?;
            renderer.header(text, heading.level)
        }

        NodeValue::Paragraph => {
            let text = render_inlines(node, renderer)?;
            if tight {
                Ok(text)
            } else {
                Ok(renderer.paragraph(text))
            }
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let body = render_children(node, renderer, list.tight)?;
            Ok(renderer.list(body, ordered))
        }

        NodeValue::Item(_) => {
            let body = render_children(node, renderer, tight)?;
            Ok(renderer.list_item(body))
        }

        NodeValue::CodeBlock(code_block) => {
            let language = code_block.info.split_whitespace().next();
            let code = code_block.literal.trim_end_matches('\n');
            renderer.block_code(code, language)
        }

        NodeValue::BlockQuote => {
            let body = render_children(node, renderer, false)?;
            Ok(renderer.block_quote(body))
        }

        NodeValue::Table(_) => {
            let mut header = renderer.placeholder();
            let mut body = renderer.placeholder();
            for row in node.children() {
                let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                let rendered = render_block(row, renderer, tight)?;
                if is_header {
                    header.merge(rendered);
                } else {
                    body.merge(rendered);
                }
            }
            Ok(renderer.table(header, body))
        }

        NodeValue::TableRow(header) => {
            let mut cells = renderer.placeholder();
            for cell in node.children() {
                let content = render_inlines(cell, renderer)?;
                cells.merge(renderer.table_cell(content, *header));
            }
            Ok(renderer.table_row(cells))
        }

        // HTML blocks, thematic breaks, front matter, footnotes
        _ => Ok(renderer.placeholder()),
    }
}

/// Fold the inline results of all children of `node` into one tree.
fn render_inlines<'a>(
    node: &'a AstNode<'a>,
    renderer: &mut Renderer<'_>,
) -> RenderResult<PartialTree> {
    let mut tree = renderer.placeholder();
    for child in node.children() {
        match render_inline(child, renderer)? {
            Fragment::Text(text) => tree.append_text(text),
            Fragment::Tree(fragment) => tree.merge(fragment),
        }
    }
    Ok(tree)
}

fn render_inline<'a>(
    node: &'a AstNode<'a>,
    renderer: &mut Renderer<'_>,
) -> RenderResult<Fragment> {
    let node_data = node.data.borrow();

    let fragment = match &node_data.value {
        NodeValue::Text(text) => Fragment::Text(renderer.text(text)),

        NodeValue::SoftBreak => Fragment::Text(renderer.text(" ")),

        NodeValue::LineBreak => Fragment::Tree(renderer.linebreak()),

        NodeValue::Code(code) => Fragment::Tree(renderer.codespan(&code.literal)),

        NodeValue::Emph => {
            let text = render_inlines(node, renderer)?;
            Fragment::Tree(renderer.emphasis(text))
        }

        NodeValue::Strong => {
            let text = render_inlines(node, renderer)?;
            Fragment::Tree(renderer.double_emphasis(text))
        }

        NodeValue::Strikethrough => {
            let text = render_inlines(node, renderer)?;
            Fragment::Tree(renderer.strikethrough(text))
        }

        NodeValue::Link(link) => {
            let label = collect_text_from_children(node);
            if label == link.url {
                Fragment::Tree(renderer.autolink(&link.url, false))
            } else if link.url.strip_prefix("mailto:") == Some(label.as_str()) {
                Fragment::Tree(renderer.autolink(&label, true))
            } else {
                let content = render_inlines(node, renderer)?;
                Fragment::Tree(renderer.link(&link.url, non_empty(&link.title), content))
            }
        }

        NodeValue::Image(link) => {
            let alt = collect_text_from_children(node);
            Fragment::Tree(renderer.image(&link.url, non_empty(&link.title), non_empty(&alt))?)
        }

        NodeValue::HtmlInline(html) => Fragment::Tree(renderer.tag(html)),

        _ => Fragment::Tree(renderer.placeholder()),
    };

    Ok(fragment)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn collect_text_from_children<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        collect_text_content(child, &mut text);
    }
    text
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
