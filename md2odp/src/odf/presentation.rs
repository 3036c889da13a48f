//! Template queries and edits on an opened presentation.
//!
//! Parts are queried with `roxmltree`. Edits never re-serialize a part: they are computed as
//! byte-range splices against the original text and applied back to front, so everything the
//! conversion does not touch (namespaces, foreign elements, whitespace) is preserved exactly.

use crate::error::{OdfError, OdfResult};
use crate::odf::node::{Node, PresentationClass, Rect};
use crate::odf::package::{Package, CONTENT_PART, MANIFEST_PART, STYLES_PART};
use crate::odf::style::StyleRegistry;
use crate::odf::xml::{escape, nodes_to_xml};
use crate::odf::{DRAW_NS, MANIFEST_NS, OFFICE_NS, PRESENTATION_NS, STYLE_NS, SVG_NS, TEXT_NS};
use std::ops::Range;
use std::path::Path;

/// A placeholder frame of a master page.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub class: PresentationClass,
    pub rect: Rect,
}

/// A named master page (`style:master-page`) of the template.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterPage {
    pub name: String,
    pub placeholders: Vec<Placeholder>,
}

impl MasterPage {
    /// Geometry of the first placeholder with the given role.
    pub fn placeholder(&self, class: PresentationClass) -> Option<&Rect> {
        self.placeholders
            .iter()
            .find(|placeholder| placeholder.class == class)
            .map(|placeholder| &placeholder.rect)
    }
}

/// An ODP document being filled with slides.
#[derive(Debug, Clone)]
pub struct Presentation {
    package: Package,
}

/// Replacement of `range` in a part's text.
struct Splice {
    range: Range<usize>,
    text: String,
}

impl Splice {
    fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            text: text.into(),
        }
    }
}

impl Presentation {
    pub fn new(package: Package) -> Self {
        Self { package }
    }

    pub fn open(path: impl AsRef<Path>) -> OdfResult<Self> {
        Ok(Self::new(Package::open(path)?))
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn save(&self, path: impl AsRef<Path>) -> OdfResult<()> {
        self.package.save(path)
    }

    /// All master pages declared in `styles.xml`, in document order.
    pub fn master_pages(&self) -> OdfResult<Vec<MasterPage>> {
        let xml = self.package.text_part(STYLES_PART)?;
        let doc = parse(STYLES_PART, xml)?;

        let masters = doc
            .descendants()
            .filter(|node| node.has_tag_name((STYLE_NS, "master-page")))
            .map(|page| MasterPage {
                name: page.attribute((STYLE_NS, "name")).unwrap_or_default().to_string(),
                placeholders: page
                    .descendants()
                    .filter(|node| node.has_tag_name((DRAW_NS, "frame")))
                    .filter_map(placeholder)
                    .collect(),
            })
            .collect();
        Ok(masters)
    }

    pub fn master_page_names(&self) -> OdfResult<Vec<String>> {
        Ok(self
            .master_pages()?
            .into_iter()
            .map(|master| master.name)
            .collect())
    }

    /// The list style of a master page's outline, renamed to `name`.
    ///
    /// Impress keeps bullet definitions inside the graphic properties of the
    /// `<master>-outline1` presentation style; slides inserted by hand only inherit them through
    /// the outline placeholder, so lists in generated frames need an explicit copy.
    pub fn outline_list_style(&self, master: &str, name: &str) -> OdfResult<Option<String>> {
        let xml = self.package.text_part(STYLES_PART)?;
        let doc = parse(STYLES_PART, xml)?;
        let style_name = format!("{master}-outline1");

        let list_style = doc
            .descendants()
            .filter(|node| node.has_tag_name((STYLE_NS, "style")))
            .filter(|node| node.attribute((STYLE_NS, "name")) == Some(style_name.as_str()))
            .flat_map(|node| node.children())
            .filter(|node| node.has_tag_name((STYLE_NS, "graphic-properties")))
            .flat_map(|node| node.children())
            .find(|node| node.has_tag_name((TEXT_NS, "list-style")));

        Ok(list_style.map(|node| rename_element(&xml[node.range()], name)))
    }

    /// Number of element children of the presentation body (slides and settings).
    pub fn body_len(&self) -> OdfResult<usize> {
        let xml = self.package.text_part(CONTENT_PART)?;
        let doc = parse(CONTENT_PART, xml)?;
        Ok(presentation_body(&doc)?
            .children()
            .filter(|node| node.is_element())
            .count())
    }

    /// Insert `nodes` into the presentation body before its `index`th element child.
    ///
    /// An index past the last child appends.
    pub fn insert_nodes(&mut self, index: usize, nodes: &[Node]) -> OdfResult<()> {
        if nodes.is_empty() {
            return Ok(());
        }
        let fragment = nodes_to_xml(nodes)?;
        let xml = self.package.text_part(CONTENT_PART)?.to_string();
        let doc = parse(CONTENT_PART, &xml)?;
        let body = presentation_body(&doc)?;

        let splice = match body.children().filter(|node| node.is_element()).nth(index) {
            Some(child) => Splice::insert(child.range().start, fragment),
            None => append_splice(&xml, body, &fragment)?,
        };
        let updated = apply_splices(&xml, vec![splice]);
        self.package.set_part(CONTENT_PART, updated);
        Ok(())
    }

    /// Names of the automatic styles already declared in `content.xml`.
    pub fn automatic_style_names(&self) -> OdfResult<Vec<String>> {
        let xml = self.package.text_part(CONTENT_PART)?;
        let doc = parse(CONTENT_PART, xml)?;
        Ok(doc
            .root_element()
            .children()
            .find(|node| node.has_tag_name((OFFICE_NS, "automatic-styles")))
            .map(declared_names)
            .unwrap_or_default())
    }

    /// Add the registry's styles and font faces to `content.xml`.
    ///
    /// Styles and fonts already declared under the same name are left alone. Missing
    /// `office:font-face-decls` / `office:automatic-styles` containers are created.
    pub fn insert_styles(&mut self, registry: &StyleRegistry) -> OdfResult<()> {
        let xml = self.package.text_part(CONTENT_PART)?.to_string();
        let doc = parse(CONTENT_PART, &xml)?;
        let root = doc.root_element();
        let child = |local: &str| {
            root.children()
                .find(|node| node.has_tag_name((OFFICE_NS, local)))
        };

        let fonts = child("font-face-decls");
        let automatic = child("automatic-styles");
        let body = child("body").ok_or_else(|| missing_element(CONTENT_PART, "office:body"))?;

        let fonts_xml = registry.font_faces_xml(&fonts.map(declared_names).unwrap_or_default())?;
        let styles_xml = registry.styles_xml(&automatic.map(declared_names).unwrap_or_default())?;

        let mut splices = Vec::new();
        let mut created = String::new();
        if !fonts_xml.is_empty() {
            match fonts {
                Some(node) => splices.push(append_splice(&xml, node, &fonts_xml)?),
                None => created.push_str(&format!(
                    "<office:font-face-decls>{fonts_xml}</office:font-face-decls>"
                )),
            }
        }
        if !styles_xml.is_empty() {
            match automatic {
                Some(node) => splices.push(append_splice(&xml, node, &styles_xml)?),
                None => created.push_str(&format!(
                    "<office:automatic-styles>{styles_xml}</office:automatic-styles>"
                )),
            }
        }
        if !created.is_empty() {
            let anchor = automatic.unwrap_or(body).range().start;
            splices.push(Splice::insert(anchor, created));
        }

        if !splices.is_empty() {
            let updated = apply_splices(&xml, splices);
            self.package.set_part(CONTENT_PART, updated);
        }
        Ok(())
    }

    /// Paths listed in the package manifest.
    pub fn manifest_paths(&self) -> OdfResult<Vec<String>> {
        let xml = self.package.text_part(MANIFEST_PART)?;
        let doc = parse(MANIFEST_PART, xml)?;
        Ok(doc
            .descendants()
            .filter(|node| node.has_tag_name((MANIFEST_NS, "file-entry")))
            .filter_map(|node| node.attribute((MANIFEST_NS, "full-path")))
            .map(str::to_string)
            .collect())
    }

    /// Store `data` under `path` and declare it in the manifest.
    pub fn add_media(&mut self, path: &str, media_type: &str, data: Vec<u8>) -> OdfResult<()> {
        let xml = self.package.text_part(MANIFEST_PART)?.to_string();
        let doc = parse(MANIFEST_PART, &xml)?;
        let root = doc.root_element();

        let already_listed = root
            .children()
            .filter_map(|node| node.attribute((MANIFEST_NS, "full-path")))
            .any(|listed| listed == path);
        if !already_listed {
            let element_name = qualified_name(&xml[root.range()]);
            let prefix = element_name
                .split_once(':')
                .map(|(prefix, _)| format!("{prefix}:"))
                .unwrap_or_default();
            let entry = format!(
                r#"<{prefix}file-entry {prefix}full-path="{}" {prefix}media-type="{}"/>"#,
                escape(path),
                escape(media_type)
            );
            let splice = append_splice(&xml, root, &entry)?;
            let updated = apply_splices(&xml, vec![splice]);
            self.package.set_part(MANIFEST_PART, updated);
        }

        self.package.set_part(path, data);
        Ok(())
    }
}

fn parse<'a>(part: &str, xml: &'a str) -> OdfResult<roxmltree::Document<'a>> {
    roxmltree::Document::parse(xml).map_err(|source| OdfError::Xml {
        part: part.to_string(),
        source,
    })
}

fn missing_element(part: &str, element: &str) -> OdfError {
    OdfError::MissingElement {
        part: part.to_string(),
        element: element.to_string(),
    }
}

fn presentation_body<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
) -> OdfResult<roxmltree::Node<'a, 'input>> {
    doc.descendants()
        .find(|node| node.has_tag_name((OFFICE_NS, "presentation")))
        .ok_or_else(|| missing_element(CONTENT_PART, "office:presentation"))
}

fn placeholder(frame: roxmltree::Node<'_, '_>) -> Option<Placeholder> {
    let class = match frame.attribute((PRESENTATION_NS, "class"))? {
        "title" => PresentationClass::Title,
        "outline" => PresentationClass::Outline,
        _ => return None,
    };
    let rect = Rect::new(
        frame.attribute((SVG_NS, "x"))?,
        frame.attribute((SVG_NS, "y"))?,
        frame.attribute((SVG_NS, "width"))?,
        frame.attribute((SVG_NS, "height"))?,
    );
    Some(Placeholder { class, rect })
}

fn declared_names(container: roxmltree::Node<'_, '_>) -> Vec<String> {
    container
        .children()
        .filter_map(|node| node.attribute((STYLE_NS, "name")))
        .map(str::to_string)
        .collect()
}

/// Qualified tag name of the element starting at the beginning of `element`.
fn qualified_name(element: &str) -> &str {
    let name = element.trim_start_matches('<');
    let end = name
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(name.len());
    &name[..end]
}

/// Copy of `element` whose `style:name` attribute is set to `name`.
fn rename_element(element: &str, name: &str) -> String {
    let qname = qualified_name(element);
    let after_name = 1 + qname.len();
    let tag_end = start_tag_end(element);
    let mut start_tag = element[after_name..tag_end].to_string();

    if let Some(attr_start) = start_tag.find("style:name=") {
        let value_start = attr_start + "style:name=".len();
        let quote = start_tag[value_start..].chars().next().unwrap_or('"');
        let value_end = start_tag[value_start + 1..]
            .find(quote)
            .map(|end| value_start + 1 + end + 1)
            .unwrap_or(start_tag.len());
        let gap_start = start_tag[..attr_start].trim_end().len();
        start_tag.replace_range(gap_start..value_end, "");
    }

    format!(
        r#"<{qname} style:name="{}"{}{}"#,
        escape(name),
        start_tag,
        &element[tag_end..]
    )
}

/// Offset of the `>` or `/>` closing the start tag, skipping quoted attribute values.
fn start_tag_end(element: &str) -> usize {
    let mut quote = None;
    for (index, c) in element.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(open), _) if c == open => quote = None,
            (None, '>') => {
                return if element[..index].ends_with('/') {
                    index - 1
                } else {
                    index
                };
            }
            _ => {}
        }
    }
    element.len()
}

/// Splice that appends `fragment` as the last content of `element`.
fn append_splice(xml: &str, element: roxmltree::Node<'_, '_>, fragment: &str) -> OdfResult<Splice> {
    let range = element.range();
    let source = &xml[range.clone()];
    if source.ends_with("/>") {
        let qname = qualified_name(source);
        return Ok(Splice {
            range: range.end - 2..range.end,
            text: format!(">{fragment}</{qname}>"),
        });
    }
    let close = source
        .rfind("</")
        .ok_or_else(|| OdfError::XmlWrite(format!("unterminated element '{}'", qualified_name(source))))?;
    Ok(Splice::insert(range.start + close, fragment))
}

fn apply_splices(xml: &str, mut splices: Vec<Splice>) -> String {
    splices.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    let mut out = xml.to_string();
    for splice in splices {
        out.replace_range(splice.range, &splice.text);
    }
    out
}
