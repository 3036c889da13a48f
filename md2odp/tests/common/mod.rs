//! In-memory template presentations and rendering helpers.

use md2odp::odf::package::{CONTENT_PART, MANIFEST_PART, MIMETYPE_PART, STYLES_PART};
use md2odp::odf::{Node, Package, Page, PresentationClass, Presentation};
use md2odp::render::{render_markdown, RenderOptions, Renderer};

pub const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" xmlns:presentation="urn:oasis:names:tc:opendocument:xmlns:presentation:1.0" xmlns:svg="urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0">
<office:styles>
<style:style style:name="Default-outline1" style:family="presentation"><style:graphic-properties><text:list-style style:name="L0"><text:list-level-style-bullet text:level="1" text:bullet-char="-"/></text:list-style></style:graphic-properties></style:style>
</office:styles>
<office:master-styles>
<style:master-page style:name="Default" style:page-layout-name="PM1"><draw:frame presentation:class="title" svg:width="20cm" svg:height="3cm" svg:x="2cm" svg:y="0.5cm"/><draw:frame presentation:class="outline" svg:width="22cm" svg:height="12cm" svg:x="2cm" svg:y="4cm"/></style:master-page>
<style:master-page style:name="Break" style:page-layout-name="PM1"><draw:frame presentation:class="title" svg:width="24cm" svg:height="4cm" svg:x="1cm" svg:y="7cm"/></style:master-page>
</office:master-styles>
</office:document-styles>"#;

pub const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" xmlns:presentation="urn:oasis:names:tc:opendocument:xmlns:presentation:1.0" xmlns:svg="urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0"><office:automatic-styles/><office:body><office:presentation><draw:page draw:name="first" draw:master-page-name="Default"/><draw:page draw:name="last" draw:master-page-name="Default"/><presentation:settings/></office:presentation></office:body></office:document-content>"#;

pub const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0"><manifest:file-entry manifest:full-path="/" manifest:media-type="application/vnd.oasis.opendocument.presentation"/><manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/></manifest:manifest>"#;

/// SVG with a natural size of 200x100.
pub const WIDE_SVG: &str =
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect width="200" height="100"/></svg>"#;

pub fn template_package() -> Package {
    let mut package = Package::new();
    package.set_part(MIMETYPE_PART, "application/vnd.oasis.opendocument.presentation");
    package.set_part(STYLES_PART, STYLES);
    package.set_part(CONTENT_PART, CONTENT);
    package.set_part(MANIFEST_PART, MANIFEST);
    package
}

pub fn template() -> Presentation {
    Presentation::new(template_package())
}

/// Render `markdown` against a fresh template.
pub fn render_with(markdown: &str, options: &RenderOptions) -> md2odp::RenderResult<Vec<Node>> {
    let mut presentation = template();
    let mut renderer = Renderer::new(&mut presentation, options)?;
    Ok(render_markdown(markdown, &mut renderer)?.into_nodes())
}

pub fn render(markdown: &str) -> Vec<Node> {
    render_with(markdown, &RenderOptions::default()).expect("markdown should render")
}

pub fn pages(nodes: &[Node]) -> Vec<&Page> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Page(page) => Some(page),
            _ => None,
        })
        .collect()
}

/// Text box of the page's outline frame.
pub fn outline_box(page: &Page) -> &[Node] {
    page.children
        .iter()
        .find_map(|node| match node {
            Node::Frame(frame) if frame.class == PresentationClass::Outline => frame.text_box(),
            _ => None,
        })
        .expect("page should have an outline frame")
}

pub fn content_xml(presentation: &Presentation) -> String {
    presentation
        .package()
        .text_part(CONTENT_PART)
        .expect("content part")
        .to_string()
}
