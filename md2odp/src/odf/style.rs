//! Automatic style definitions inserted into a presentation before content.

use crate::error::{OdfError, OdfResult};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// `style:family` of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    Text,
    Paragraph,
    Graphic,
    Presentation,
}

impl StyleFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleFamily::Text => "text",
            StyleFamily::Paragraph => "paragraph",
            StyleFamily::Graphic => "graphic",
            StyleFamily::Presentation => "presentation",
        }
    }
}

/// Property element a set of attributes belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyArea {
    Text,
    Paragraph,
    Graphic,
}

impl PropertyArea {
    fn element(self) -> &'static str {
        match self {
            PropertyArea::Text => "style:text-properties",
            PropertyArea::Paragraph => "style:paragraph-properties",
            PropertyArea::Graphic => "style:graphic-properties",
        }
    }
}

/// One named style (`style:style`).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDef {
    pub family: StyleFamily,
    pub name: String,
    pub parent: Option<String>,
    /// Qualified attribute names with values, grouped by property element
    pub properties: Vec<(PropertyArea, Vec<(String, String)>)>,
}

impl StyleDef {
    pub fn new(family: StyleFamily, name: impl Into<String>) -> Self {
        Self {
            family,
            name: name.into(),
            parent: None,
            properties: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_properties(mut self, area: PropertyArea, properties: &[(&str, &str)]) -> Self {
        let properties = properties
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.properties.push((area, properties));
        self
    }
}

/// A font declaration (`style:font-face`).
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub name: String,
    pub generic_family: String,
    pub pitch: String,
}

impl FontFace {
    /// Fixed-pitch font used for code.
    pub fn monospace(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_family: "modern".to_string(),
            pitch: "fixed".to_string(),
        }
    }
}

/// Set of automatic styles keyed by name. Registering a name twice keeps the first definition.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: Vec<StyleDef>,
    font_faces: Vec<FontFace>,
    /// Pre-serialized style elements copied from the template
    raw: Vec<(String, String)>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, style: StyleDef) {
        if !self.contains(&style.name) {
            self.styles.push(style);
        }
    }

    pub fn add_font_face(&mut self, font: FontFace) {
        if !self.font_faces.iter().any(|f| f.name == font.name) {
            self.font_faces.push(font);
        }
    }

    /// Register an already serialized style element under `name`.
    pub fn add_raw(&mut self, name: impl Into<String>, xml: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.raw.push((name, xml.into()));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.iter().any(|style| style.name == name)
            || self.raw.iter().any(|(raw, _)| raw == name)
    }

    pub fn get(&self, name: &str) -> Option<&StyleDef> {
        self.styles.iter().find(|style| style.name == name)
    }

    pub fn styles(&self) -> &[StyleDef] {
        &self.styles
    }

    pub fn font_faces(&self) -> &[FontFace] {
        &self.font_faces
    }

    /// Names of every registered style, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles
            .iter()
            .map(|style| style.name.as_str())
            .chain(self.raw.iter().map(|(name, _)| name.as_str()))
    }

    /// Serialize the styles whose names are not in `existing`.
    pub fn styles_xml(&self, existing: &[String]) -> OdfResult<String> {
        let mut writer = Writer::new(Vec::new());
        for style in self.styles.iter().filter(|s| !existing.contains(&s.name)) {
            write_style(&mut writer, style)?;
        }
        let mut xml = into_string(writer)?;
        for (name, raw) in &self.raw {
            if !existing.contains(name) {
                xml.push_str(raw);
            }
        }
        Ok(xml)
    }

    /// Serialize the font faces whose names are not in `existing`.
    pub fn font_faces_xml(&self, existing: &[String]) -> OdfResult<String> {
        let mut writer = Writer::new(Vec::new());
        for font in self.font_faces.iter().filter(|f| !existing.contains(&f.name)) {
            let family = format!("'{}'", font.name);
            let mut start = BytesStart::new("style:font-face");
            start.push_attribute(("style:name", font.name.as_str()));
            start.push_attribute(("svg:font-family", family.as_str()));
            start.push_attribute(("style:font-family-generic", font.generic_family.as_str()));
            start.push_attribute(("style:font-pitch", font.pitch.as_str()));
            emit(&mut writer, Event::Empty(start))?;
        }
        into_string(writer)
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> OdfResult<()> {
    writer
        .write_event(event)
        .map_err(|e| OdfError::XmlWrite(e.to_string()))
}

fn into_string(writer: Writer<Vec<u8>>) -> OdfResult<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| OdfError::XmlWrite(e.to_string()))
}

fn write_style(writer: &mut Writer<Vec<u8>>, style: &StyleDef) -> OdfResult<()> {
    let mut start = BytesStart::new("style:style");
    start.push_attribute(("style:name", style.name.as_str()));
    start.push_attribute(("style:display-name", style.name.as_str()));
    start.push_attribute(("style:family", style.family.as_str()));
    if let Some(parent) = &style.parent {
        start.push_attribute(("style:parent-style-name", parent.as_str()));
    }

    if style.properties.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for (area, properties) in &style.properties {
        let mut element = BytesStart::new(area.element());
        for (key, value) in properties {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        emit(writer, Event::Empty(element))?;
    }
    emit(writer, Event::End(BytesEnd::new("style:style")))
}
