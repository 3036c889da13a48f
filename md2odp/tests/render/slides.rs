//! Slide structure produced from headings and block content.

use crate::common::{outline_box, pages, render, render_with};
use md2odp::odf::{Node, PresentationClass, Rect};
use md2odp::render::RenderOptions;
use md2odp::RenderError;

fn styles_below(node: &Node) -> Vec<String> {
    node.descendants()
        .into_iter()
        .filter_map(|node| node.style_name())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_each_heading_starts_one_page_with_one_frame() {
    let nodes = render("# Section\n\n## Content\n");
    let pages = pages(&nodes);
    assert_eq!(pages.len(), 2);

    let section = pages[0];
    assert_eq!(section.name, "Section");
    assert_eq!(section.layout, "AL3T19");
    assert_eq!(section.children.len(), 1);
    match &section.children[0] {
        Node::Frame(frame) => {
            assert_eq!(frame.class, PresentationClass::Title);
            assert_eq!(frame.style, "md2odp-BreakTitleText");
        }
        other => panic!("expected title frame, got {other:?}"),
    }

    let content = pages[1];
    assert_eq!(content.name, "Content");
    assert_eq!(content.layout, "AL3T1");
    assert_eq!(content.master_page, "Default");
    assert_eq!(content.children.len(), 1);
    match &content.children[0] {
        Node::Frame(frame) => {
            assert_eq!(frame.style, "md2odp-TitleText");
            assert_eq!(frame.rect, Rect::new("2cm", "0.5cm", "20cm", "3cm"));
        }
        other => panic!("expected title frame, got {other:?}"),
    }
}

#[test]
fn test_third_level_heading_is_rejected() {
    let result = render_with("## Fine\n\n### Too deep\n", &RenderOptions::default());
    assert!(matches!(result, Err(RenderError::UnsupportedHeadingLevel(3))));
}

#[test]
fn test_break_master_geometry_comes_from_template() {
    let options = RenderOptions {
        break_master: Some("Break".to_string()),
        ..RenderOptions::default()
    };
    let nodes = render_with("# Part two\n", &options).unwrap();
    let page = pages(&nodes)[0];
    assert_eq!(page.master_page, "Break");
    match &page.children[0] {
        Node::Frame(frame) => assert_eq!(frame.rect, Rect::new("1cm", "7cm", "24cm", "4cm")),
        other => panic!("expected title frame, got {other:?}"),
    }
}

#[test]
fn test_unrequested_break_master_uses_builtin_geometry() {
    let nodes = render("# Part one\n");
    let page = pages(&nodes)[0];
    assert_eq!(page.master_page, "Default");
    match &page.children[0] {
        Node::Frame(frame) => assert_eq!(frame.rect, Rect::new("2cm", "8cm", "20cm", "3cm")),
        other => panic!("expected title frame, got {other:?}"),
    }
}

#[test]
fn test_page_name_is_plain_heading_text() {
    let nodes = render("## Hello *big* `world`\n");
    assert_eq!(pages(&nodes)[0].name, "Hello big world");
}

#[test]
fn test_paragraphs_share_one_outline_frame() {
    let nodes = render("## Slide\n\nFirst paragraph.\n\nSecond paragraph.\n");
    let page = pages(&nodes)[0];
    assert_eq!(page.children.len(), 2);

    let text_box = outline_box(page);
    assert_eq!(text_box.len(), 2);
    assert!(text_box.iter().all(|node| matches!(node, Node::Paragraph(_))));
    assert_eq!(text_box[0].plain_text(), "First paragraph.");
    assert_eq!(text_box[1].plain_text(), "Second paragraph.");
}

#[test]
fn test_content_joins_the_latest_slide() {
    let nodes = render("## One\n\nAlpha\n\n## Two\n\nBeta\n\n- gamma\n");
    let pages = pages(&nodes);
    assert_eq!(pages.len(), 2);
    assert_eq!(outline_box(pages[0]).len(), 1);

    let second = outline_box(pages[1]);
    assert_eq!(second.len(), 2);
    assert!(matches!(second[1], Node::List(_)));
}

#[test]
fn test_content_before_first_heading_has_no_slide() {
    let nodes = render("Intro text\n\n## Slide\n");
    assert_eq!(nodes.len(), 2);
    assert!(matches!(nodes[0], Node::Span(_)));
    assert!(matches!(nodes[1], Node::Page(_)));
}

#[test]
fn test_empty_list_item_is_kept() {
    let nodes = render("## Items\n\n- one\n-\n- three\n");
    let text_box = outline_box(pages(&nodes)[0]);
    let Node::List(list) = &text_box[0] else {
        panic!("expected a list, got {:?}", text_box[0]);
    };
    assert_eq!(list.style.as_deref(), Some("OutlineListStyle"));
    assert_eq!(list.items.len(), 3);

    let children: Vec<usize> = list.items.iter().map(|item| item.children().len()).collect();
    assert_eq!(children, vec![1, 0, 1]);
    assert!(matches!(list.items[0].children()[0], Node::Paragraph(_)));
}

#[test]
fn test_ordered_and_nested_lists() {
    let nodes = render("## Steps\n\n1. first\n   - detail\n2. second\n");
    let text_box = outline_box(pages(&nodes)[0]);
    let Node::List(list) = &text_box[0] else {
        panic!("expected a list, got {:?}", text_box[0]);
    };
    assert_eq!(list.style.as_deref(), Some("L1"));
    assert_eq!(list.items.len(), 2);

    let first = list.items[0].children();
    assert_eq!(first.len(), 2);
    assert!(matches!(first[0], Node::Paragraph(_)));
    assert!(matches!(&first[1], Node::List(nested) if nested.style.as_deref() == Some("OutlineListStyle")));
}

#[test]
fn test_loose_list_items_wrap_paragraphs() {
    let nodes = render("## Loose\n\n- one\n\n- two\n");
    let text_box = outline_box(pages(&nodes)[0]);
    let Node::List(list) = &text_box[0] else {
        panic!("expected a list, got {:?}", text_box[0]);
    };
    for item in &list.items {
        let children = item.children();
        assert_eq!(children.len(), 1);
        let Node::Paragraph(paragraph) = &children[0] else {
            panic!("expected a paragraph, got {:?}", children[0]);
        };
        assert!(matches!(&paragraph.children[0], Node::Span(span) if span.style.is_none()));
    }
}

#[test]
fn test_inline_styles() {
    let nodes = render("## Styles\n\n*soft* **loud** `a  b`\n");
    let text_box = outline_box(pages(&nodes)[0]);
    let styles = styles_below(&text_box[0]);
    assert!(styles.contains(&"md2odp-TextEmphasisStyle".to_string()));
    assert!(styles.contains(&"md2odp-TextDoubleEmphasisStyle".to_string()));
    assert!(styles.contains(&"md2odp-TextCodeStyle".to_string()));

    assert!(text_box[0]
        .descendants()
        .into_iter()
        .any(|node| matches!(node, Node::Spaces(2))));
    assert_eq!(text_box[0].plain_text(), "soft loud a  b");
}

#[test]
fn test_block_quote_is_marked_paragraph() {
    let nodes = render("## Quote\n\n> Wise words\n");
    let text_box = outline_box(pages(&nodes)[0]);
    let Node::Paragraph(quote) = &text_box[0] else {
        panic!("expected a paragraph, got {:?}", text_box[0]);
    };
    assert_eq!(quote.style.as_deref(), Some("md2odp-ParagraphQuoteStyle"));
    assert_eq!(quote.children.len(), 3);
    assert_eq!(quote.children[0].style_name(), Some("md2odp-TextQuoteStyle"));
    assert_eq!(quote.children[2].style_name(), Some("md2odp-TextQuoteStyle"));
    assert_eq!(text_box[0].plain_text(), "\u{201c}Wise words\u{201d}");
}

#[test]
fn test_links_and_autolinks() {
    let nodes = render(
        "## Links\n\n[the *site*](https://example.org \"Home\") <https://example.com> <me@example.org>\n",
    );
    let text_box = outline_box(pages(&nodes)[0]);
    let links: Vec<_> = text_box[0]
        .descendants()
        .into_iter()
        .filter_map(|node| match node {
            Node::Link(link) => Some(link),
            _ => None,
        })
        .collect();
    assert_eq!(links.len(), 3);

    assert_eq!(links[0].href, "https://example.org");
    assert_eq!(links[0].title.as_deref(), Some("Home"));
    assert_eq!(links[0].children, vec![Node::Text("the site".to_string())]);

    assert_eq!(links[1].href, "https://example.com");
    assert_eq!(links[1].title, None);

    assert_eq!(links[2].href, "mailto:me@example.org");
    assert_eq!(links[2].children, vec![Node::Text("me@example.org".to_string())]);
}

#[test]
fn test_line_breaks() {
    let nodes = render("## Breaks\n\nsoft\nwrap and hard  \nbreak\n");
    let text_box = outline_box(pages(&nodes)[0]);
    assert_eq!(text_box.len(), 1);
    assert_eq!(text_box[0].plain_text(), "soft wrap and hard\nbreak");
}

#[test]
fn test_unsupported_constructs_produce_nothing() {
    let nodes = render("## Quiet\n\n| a |\n|---|\n| b |\n\n---\n\n<div>html</div>\n");
    let page = pages(&nodes)[0];
    assert_eq!(page.children.len(), 1);

    let nodes = render("## Struck\n\n~~gone~~ kept <b>tag</b>\n");
    let text_box = outline_box(pages(&nodes)[0]);
    assert_eq!(text_box[0].plain_text(), " kept tag");
}
