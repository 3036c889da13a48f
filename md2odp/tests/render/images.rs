//! Picture embedding and placement.

use crate::common::{outline_box, pages, template, WIDE_SVG};
use md2odp::odf::{FrameContent, Node, Rect};
use md2odp::render::{render_markdown, RenderOptions, Renderer};
use md2odp::{convert, ConvertOptions, ConvertOutcome, RenderError};
use std::path::Path;

fn options_in(dir: &Path) -> RenderOptions {
    RenderOptions {
        base_dir: Some(dir.to_path_buf()),
        ..RenderOptions::default()
    }
}

fn picture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wide.svg"), WIDE_SVG).unwrap();
    std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
    dir
}

#[test]
fn test_image_after_heading_is_page_sibling() {
    let dir = picture_dir();
    let mut presentation = template();
    let mut renderer = Renderer::new(&mut presentation, &options_in(dir.path())).unwrap();
    let nodes = render_markdown("## Picture\n\n![A chart](wide.svg \"Chart\")\n", &mut renderer)
        .unwrap()
        .into_nodes();
    assert_eq!(renderer.embedded_images(), 1);

    let page = pages(&nodes)[0];
    assert_eq!(page.children.len(), 2);
    let Node::Frame(frame) = &page.children[1] else {
        panic!("expected an image frame, got {:?}", page.children[1]);
    };
    assert_eq!(frame.style, "md2odp-ImageStyle");
    assert_eq!(frame.rect, Rect::new("2cm", "4.5cm", "22cm", "11cm"));

    let FrameContent::Image(image) = &frame.content else {
        panic!("expected image content");
    };
    assert!(image.href.starts_with("Pictures/odpdown_image_"));
    assert!(image.href.ends_with(".svg"));
    assert_eq!(image.title.as_deref(), Some("Chart"));
    assert_eq!(image.description.as_deref(), Some("A chart"));

    let stored = presentation.package().part(&image.href).unwrap();
    assert_eq!(stored, WIDE_SVG.as_bytes());
    assert!(presentation
        .manifest_paths()
        .unwrap()
        .contains(&image.href));
}

#[test]
fn test_image_after_text_joins_outline() {
    let dir = picture_dir();
    let mut presentation = template();
    let mut renderer = Renderer::new(&mut presentation, &options_in(dir.path())).unwrap();
    let nodes = render_markdown("## Picture\n\nSee below\n\n![](wide.svg)\n", &mut renderer)
        .unwrap()
        .into_nodes();

    let page = pages(&nodes)[0];
    assert_eq!(page.children.len(), 2);
    let text_box = outline_box(page);
    assert_eq!(text_box.len(), 2);
    assert!(text_box[1].is_image_frame());
}

#[test]
fn test_unreadable_image_uses_fallback_size() {
    let dir = picture_dir();
    let mut presentation = template();
    let mut renderer = Renderer::new(&mut presentation, &options_in(dir.path())).unwrap();
    let nodes = render_markdown("## Broken\n\n![](broken.png)\n", &mut renderer)
        .unwrap()
        .into_nodes();

    let page = pages(&nodes)[0];
    let Node::Frame(frame) = &page.children[1] else {
        panic!("expected an image frame, got {:?}", page.children[1]);
    };
    assert_eq!(frame.rect, Rect::new("7cm", "4cm", "12cm", "12cm"));
}

#[test]
fn test_missing_image_aborts_conversion() {
    let dir = picture_dir();
    let mut presentation = template();
    let before = presentation.package().clone();
    let options = ConvertOptions {
        render: options_in(dir.path()),
        ..ConvertOptions::default()
    };
    let result = convert("## Gone\n\n![](missing.png)\n", &mut presentation, &options);
    assert!(matches!(result, Err(RenderError::ImageFetch { .. })));
    assert_eq!(
        before.part_names().collect::<Vec<_>>(),
        presentation.package().part_names().collect::<Vec<_>>()
    );
}

#[test]
fn test_independent_conversions_use_distinct_asset_paths() {
    let dir = picture_dir();
    let options = ConvertOptions {
        render: options_in(dir.path()),
        ..ConvertOptions::default()
    };
    let markdown = "## Picture\n\n![](wide.svg)\n";

    let mut assets = Vec::new();
    for _ in 0..2 {
        let mut presentation = template();
        let outcome = convert(markdown, &mut presentation, &options).unwrap();
        assert_eq!(outcome, ConvertOutcome::Inserted { pages: 1, images: 1 });
        let pictures: Vec<String> = presentation
            .manifest_paths()
            .unwrap()
            .into_iter()
            .filter(|path| path.starts_with("Pictures/"))
            .collect();
        assert_eq!(pictures.len(), 1);
        assets.extend(pictures);
    }
    assert_ne!(assets[0], assets[1]);
}

#[test]
fn test_repeated_conversion_into_one_document_adds_pictures() {
    let dir = picture_dir();
    let options = ConvertOptions {
        render: options_in(dir.path()),
        ..ConvertOptions::default()
    };
    let mut presentation = template();
    convert("## One\n\n![](wide.svg)\n", &mut presentation, &options).unwrap();
    convert("## Two\n\n![](wide.svg)\n", &mut presentation, &options).unwrap();

    let pictures = presentation
        .manifest_paths()
        .unwrap()
        .into_iter()
        .filter(|path| path.starts_with("Pictures/odpdown_image_"))
        .count();
    assert_eq!(pictures, 2);
}
