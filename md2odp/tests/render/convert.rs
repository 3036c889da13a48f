//! Slide insertion into a template presentation.

use crate::common::{content_xml, template, template_package};
use md2odp::odf::package::{CONTENT_PART, STYLES_PART};
use md2odp::odf::{Package, Presentation};
use md2odp::{convert, ConvertOptions, ConvertOutcome, RenderOptions};

fn position(xml: &str, needle: &str) -> usize {
    xml.find(needle)
        .unwrap_or_else(|| panic!("{needle} not found in {xml}"))
}

#[test]
fn test_default_appends_before_settings() {
    let mut presentation = template();
    let outcome = convert(
        "# Intro\n\n## Body\n\nText\n",
        &mut presentation,
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome, ConvertOutcome::Inserted { pages: 2, images: 0 });

    let xml = content_xml(&presentation);
    let last = position(&xml, r#"draw:name="last""#);
    let intro = position(&xml, r#"draw:name="Intro""#);
    let body = position(&xml, r#"draw:name="Body""#);
    let settings = position(&xml, "<presentation:settings");
    assert!(last < intro && intro < body && body < settings);
}

#[test]
fn test_page_offsets() {
    let mut presentation = template();
    let options = ConvertOptions {
        page: 0,
        ..ConvertOptions::default()
    };
    convert("## Front\n", &mut presentation, &options).unwrap();
    let xml = content_xml(&presentation);
    assert!(position(&xml, r#"draw:name="Front""#) < position(&xml, r#"draw:name="first""#));

    let mut presentation = template();
    let options = ConvertOptions {
        page: -2,
        ..ConvertOptions::default()
    };
    convert("## Middle\n", &mut presentation, &options).unwrap();
    let xml = content_xml(&presentation);
    let first = position(&xml, r#"draw:name="first""#);
    let middle = position(&xml, r#"draw:name="Middle""#);
    let last = position(&xml, r#"draw:name="last""#);
    assert!(first < middle && middle < last);
}

#[test]
fn test_unknown_master_lists_available_names() {
    let mut presentation = template();
    let options = ConvertOptions {
        render: RenderOptions {
            content_master: Some("Nope".to_string()),
            ..RenderOptions::default()
        },
        ..ConvertOptions::default()
    };
    let outcome = convert("## Slide\n", &mut presentation, &options).unwrap();
    assert_eq!(
        outcome,
        ConvertOutcome::UnknownMasterPage {
            available: vec!["Default".to_string(), "Break".to_string()]
        }
    );
    assert_eq!(
        content_xml(&presentation),
        content_xml(&Presentation::new(template_package()))
    );
}

#[test]
fn test_template_without_default_master_converts() {
    let mut package = template_package();
    package.set_part(
        STYLES_PART,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0"><office:master-styles><style:master-page style:name="Title_20_Content"/></office:master-styles></office:document-styles>"#,
    );
    let mut presentation = Presentation::new(package);

    let outcome = convert(
        "## Slide\n\nText\n",
        &mut presentation,
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome, ConvertOutcome::Inserted { pages: 1, images: 0 });

    let xml = content_xml(&presentation);
    assert!(xml.contains(r#"draw:name="Slide" draw:master-page-name="Default""#));
    assert!(xml.contains(r#"style:parent-style-name="Default-outline1""#));
}

#[test]
fn test_styles_are_registered_once() {
    let mut presentation = template();
    convert("## One\n\n*a*\n", &mut presentation, &ConvertOptions::default()).unwrap();
    convert("## Two\n\n*b*\n", &mut presentation, &ConvertOptions::default()).unwrap();

    let xml = content_xml(&presentation);
    for name in [
        "md2odp-OutlineText",
        "md2odp-TitleText",
        "md2odp-TextEmphasisStyle",
        "md2odp-ParagraphCodeStyle",
        "OutlineListStyle",
    ] {
        let declaration = format!(r#"style:name="{name}""#);
        assert_eq!(xml.matches(&declaration).count(), 1, "{name} in {xml}");
    }
    assert_eq!(xml.matches(r#"style:name="Nimbus Mono L""#).count(), 1);
    assert!(xml.contains("draw:fit-to-size"));
}

#[test]
fn test_no_autofit_grows_outline() {
    let mut presentation = template();
    let options = ConvertOptions {
        render: RenderOptions {
            autofit_text: false,
            ..RenderOptions::default()
        },
        ..ConvertOptions::default()
    };
    convert("## Slide\n", &mut presentation, &options).unwrap();
    let xml = content_xml(&presentation);
    assert!(!xml.contains("draw:fit-to-size"));
    assert!(xml.contains(r#"draw:auto-grow-height="true""#));
}

#[test]
fn test_result_is_valid_package() {
    let mut presentation = template();
    convert(
        "## Slide\n\n- one\n- two\n\n```\ncode  here\n```\n",
        &mut presentation,
        &ConvertOptions::default(),
    )
    .unwrap();

    let bytes = presentation.package().to_bytes().unwrap();
    let reopened = Package::from_bytes(&bytes).unwrap();
    assert_eq!(reopened.part_names().next(), Some("mimetype"));

    let xml = reopened.text_part(CONTENT_PART).unwrap();
    let doc = roxmltree::Document::parse(xml).unwrap();
    let texts: Vec<String> = doc
        .descendants()
        .filter(|node| node.tag_name().name() == "list-item")
        .map(|node| {
            node.descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect()
        })
        .collect();
    assert_eq!(texts, vec!["one", "two"]);
    assert!(xml.contains(r#"<text:s text:c="2"/>"#));
}
