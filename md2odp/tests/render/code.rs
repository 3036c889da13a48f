//! Code blocks: whitespace preservation and highlighting.

use crate::common::{outline_box, pages, render, render_with};
use md2odp::odf::{Node, Span};
use md2odp::render::RenderOptions;
use md2odp::RenderError;

fn code_paragraph(markdown: &str) -> Node {
    let nodes = render(markdown);
    let text_box = outline_box(pages(&nodes)[0]);
    assert_eq!(text_box.len(), 1);
    text_box[0].clone()
}

#[test]
fn test_plain_code_keeps_whitespace() {
    let paragraph = code_paragraph("## Code\n\n```\nlet  x =\n\tfoo\n```\n");
    let Node::Paragraph(paragraph) = paragraph else {
        panic!("expected a paragraph, got {paragraph:?}");
    };
    assert_eq!(paragraph.style.as_deref(), Some("md2odp-ParagraphCodeStyle"));
    assert_eq!(
        paragraph.children,
        vec![
            Node::Span(Span::text("let")),
            Node::Spaces(2),
            Node::Span(Span::text("x =")),
            Node::LineBreak,
            Node::Tab,
            Node::Span(Span::text("foo")),
        ]
    );
}

#[test]
fn test_indented_code_block_joins_outline() {
    let nodes = render("## Code\n\nText\n\n    a    b\n");
    let text_box = outline_box(pages(&nodes)[0]);
    assert_eq!(text_box.len(), 2);
    assert_eq!(text_box[0].plain_text(), "Text");
    assert_eq!(text_box[1].style_name(), Some("md2odp-ParagraphCodeStyle"));
    assert_eq!(text_box[1].plain_text(), "a    b");
}

#[test]
fn test_highlighted_code_is_styled() {
    let paragraph = code_paragraph("## Code\n\n```rust\nfn main() {\n    let x = 1;\n}\n```\n");
    assert_eq!(paragraph.style_name(), Some("md2odp-ParagraphCodeStyle"));
    assert_eq!(paragraph.plain_text(), "fn main() {\n    let x = 1;\n}");

    let descendants = paragraph.descendants();
    assert!(descendants
        .iter()
        .filter_map(|node| node.style_name())
        .any(|style| style.starts_with("md2odp-TColor")));
    assert!(descendants.iter().any(|node| matches!(node, Node::Spaces(4))));
    assert_eq!(
        descendants
            .iter()
            .filter(|node| matches!(node, Node::LineBreak))
            .count(),
        2
    );
}

#[test]
fn test_unknown_language_renders_plain_text() {
    let paragraph = code_paragraph("## Code\n\n```no-such-language\na  b\n```\n");
    assert_eq!(paragraph.plain_text(), "a  b");
    assert!(paragraph
        .descendants()
        .iter()
        .any(|node| matches!(node, Node::Spaces(2))));
}

#[test]
fn test_unknown_highlight_style_is_rejected() {
    let options = RenderOptions {
        highlight_style: "no-such-style".to_string(),
        ..RenderOptions::default()
    };
    match render_with("## Code\n", &options) {
        Err(RenderError::UnknownHighlightStyle { name, available }) => {
            assert_eq!(name, "no-such-style");
            assert!(available.contains("colorful"));
        }
        other => panic!("expected unknown style error, got {other:?}"),
    }
}

#[test]
fn test_theme_names_are_accepted() {
    let options = RenderOptions {
        highlight_style: "base16-ocean.dark".to_string(),
        ..RenderOptions::default()
    };
    let nodes = render_with("## Code\n\n```python\nx = 1\n```\n", &options).unwrap();
    assert_eq!(outline_box(pages(&nodes)[0])[0].plain_text(), "x = 1");
}
