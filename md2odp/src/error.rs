//! Error types for package access and rendering

use thiserror::Error;

/// Errors raised while reading, editing or writing an ODP package
#[derive(Debug, Error)]
pub enum OdfError {
    /// The zip container could not be read or written
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// A package part is not well-formed XML
    #[error("XML error in '{part}': {source}")]
    Xml {
        part: String,
        #[source]
        source: roxmltree::Error,
    },
    /// Serializing document nodes failed
    #[error("XML write error: {0}")]
    XmlWrite(String),
    /// A required part is absent from the package
    #[error("Package part '{0}' not found")]
    MissingPart(String),
    /// A required element is absent from a part
    #[error("Element '{element}' not found in '{part}'")]
    MissingElement { part: String, element: String },
    /// A part that must be text is not valid UTF-8
    #[error("Package part '{0}' is not valid UTF-8")]
    Encoding(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a markdown conversion
#[derive(Debug, Error)]
pub enum RenderError {
    /// Only level 1 (section break) and level 2 (content) headings map to slides
    #[error("Unsupported heading level: {0}")]
    UnsupportedHeadingLevel(u8),
    /// Image bytes could not be fetched from a file or URL
    #[error("Failed to fetch image '{locator}': {reason}")]
    ImageFetch { locator: String, reason: String },
    /// The syntax highlighter failed on a code block
    #[error("Highlighting error: {0}")]
    Highlight(String),
    /// The requested highlight style is neither a bundled theme nor a known alias
    #[error("Unknown highlight style '{name}' (available: {available})")]
    UnknownHighlightStyle { name: String, available: String },
    #[error(transparent)]
    Odf(#[from] OdfError),
}

pub type OdfResult<T> = Result<T, OdfError>;
pub type RenderResult<T> = Result<T, RenderError>;
