//! OpenDocument presentation access: element model, XML output, styles and the package.

pub mod node;
pub mod package;
pub mod presentation;
pub mod style;
pub mod xml;

pub use node::{
    Frame, FrameContent, ImageContent, Link, List, ListItem, Node, Page, Paragraph,
    PresentationClass, Rect, Span,
};
pub use package::Package;
pub use presentation::{MasterPage, Placeholder, Presentation};
pub use style::{FontFace, PropertyArea, StyleDef, StyleFamily, StyleRegistry};

pub const OFFICE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
pub const STYLE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
pub const TEXT_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
pub const DRAW_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0";
pub const PRESENTATION_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:presentation:1.0";
pub const SVG_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0";
pub const MANIFEST_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";
