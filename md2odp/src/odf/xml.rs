//! XML serialization of document nodes.
//!
//! Output is a fragment without namespace declarations; it is spliced into the body of a
//! template `content.xml`, which declares the usual `draw`, `text`, `svg`, `xlink`,
//! `presentation` and `office` prefixes.

use crate::error::{OdfError, OdfResult};
use crate::odf::node::{Frame, FrameContent, Node, Rect};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Serialize nodes to an XML fragment.
pub fn nodes_to_xml(nodes: &[Node]) -> OdfResult<String> {
    let mut writer = Writer::new(Vec::new());
    for node in nodes {
        write_node(&mut writer, node)?;
    }
    String::from_utf8(writer.into_inner()).map_err(|e| OdfError::XmlWrite(e.to_string()))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> OdfResult<()> {
    writer
        .write_event(event)
        .map_err(|e| OdfError::XmlWrite(e.to_string()))
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    start
}

fn write_container(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    attributes: &[(&str, &str)],
    children: &[Node],
) -> OdfResult<()> {
    if children.is_empty() {
        return emit(writer, Event::Empty(element(name, attributes)));
    }
    emit(writer, Event::Start(element(name, attributes)))?;
    for child in children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> OdfResult<()> {
    match node {
        Node::Page(page) => write_container(
            writer,
            "draw:page",
            &[
                ("draw:name", page.name.as_str()),
                ("draw:master-page-name", page.master_page.as_str()),
                (
                    "presentation:presentation-page-layout-name",
                    page.layout.as_str(),
                ),
            ],
            &page.children,
        ),
        Node::Frame(frame) => write_frame(writer, frame),
        Node::Paragraph(para) => {
            let attributes = style_attribute("text:style-name", para.style.as_deref());
            write_container(writer, "text:p", &attributes, &para.children)
        }
        Node::Span(span) => {
            let attributes = style_attribute("text:style-name", span.style.as_deref());
            write_container(writer, "text:span", &attributes, &span.children)
        }
        Node::Link(link) => {
            let mut attributes = vec![("xlink:type", "simple"), ("xlink:href", link.href.as_str())];
            if let Some(title) = &link.title {
                attributes.push(("office:title", title.as_str()));
            }
            write_container(writer, "text:a", &attributes, &link.children)
        }
        Node::List(list) => {
            let attributes = style_attribute("text:style-name", list.style.as_deref());
            write_container(writer, "text:list", &attributes, &list.items)
        }
        Node::ListItem(item) => write_container(writer, "text:list-item", &[], &item.children),
        Node::Text(text) => emit(writer, Event::Text(BytesText::new(text))),
        Node::LineBreak => emit(writer, Event::Empty(BytesStart::new("text:line-break"))),
        Node::Spaces(count) => {
            let count = count.to_string();
            emit(
                writer,
                Event::Empty(element("text:s", &[("text:c", count.as_str())])),
            )
        }
        Node::Tab => emit(writer, Event::Empty(BytesStart::new("text:tab"))),
    }
}

fn style_attribute<'a>(name: &'a str, style: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    style.map(|style| vec![(name, style)]).unwrap_or_default()
}

fn geometry_attributes(rect: &Rect) -> [(&str, &str); 4] {
    [
        ("svg:width", rect.width.as_str()),
        ("svg:height", rect.height.as_str()),
        ("svg:x", rect.x.as_str()),
        ("svg:y", rect.y.as_str()),
    ]
}

fn write_frame(writer: &mut Writer<Vec<u8>>, frame: &Frame) -> OdfResult<()> {
    let class = frame.class.as_str();
    match &frame.content {
        FrameContent::TextBox(children) => {
            let mut attributes = vec![
                ("presentation:style-name", frame.style.as_str()),
                ("draw:layer", "layout"),
            ];
            attributes.extend(geometry_attributes(&frame.rect));
            attributes.push(("presentation:class", class));
            emit(writer, Event::Start(element("draw:frame", &attributes)))?;
            write_container(writer, "draw:text-box", &[], children)?;
        }
        FrameContent::Image(image) => {
            let mut attributes = vec![
                ("draw:style-name", frame.style.as_str()),
                ("draw:layer", "layout"),
            ];
            attributes.extend(geometry_attributes(&frame.rect));
            attributes.push(("presentation:class", class));
            emit(writer, Event::Start(element("draw:frame", &attributes)))?;

            let image_attributes = [
                ("xlink:href", image.href.as_str()),
                ("xlink:type", "simple"),
                ("xlink:show", "embed"),
                ("xlink:actuate", "onLoad"),
            ];
            match &image.title {
                Some(title) => {
                    emit(writer, Event::Start(element("draw:image", &image_attributes)))?;
                    emit(writer, Event::Start(BytesStart::new("text:p")))?;
                    emit(writer, Event::Text(BytesText::new(title)))?;
                    emit(writer, Event::End(BytesEnd::new("text:p")))?;
                    emit(writer, Event::End(BytesEnd::new("draw:image")))?;
                }
                None => emit(writer, Event::Empty(element("draw:image", &image_attributes)))?,
            }
            if let Some(description) = &image.description {
                emit(writer, Event::Start(BytesStart::new("svg:desc")))?;
                emit(writer, Event::Text(BytesText::new(description)))?;
                emit(writer, Event::End(BytesEnd::new("svg:desc")))?;
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new("draw:frame")))
}

/// Escape text for use in attribute values and character data.
pub fn escape(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}
