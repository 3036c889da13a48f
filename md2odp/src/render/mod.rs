//! Markdown to slide rendering.
//!
//! Leaf first: [`whitespace`] and [`formatter`] turn text and highlighter tokens into inline
//! nodes, [`tree`] merges callback results into slides, [`geometry`] and [`image`] place frames
//! and pictures, [`renderer`] holds the callbacks and [`driver`] walks the markdown AST.

pub mod context;
pub mod driver;
pub mod formatter;
pub mod geometry;
pub mod highlight;
pub mod image;
pub mod renderer;
pub mod styles;
pub mod tree;
pub mod whitespace;

pub use context::{RenderContext, RenderOptions};
pub use driver::render_markdown;
pub use geometry::{ImageBox, LayoutOverrides, SlideLayout};
pub use renderer::Renderer;
pub use tree::{wrap_spans, PartialTree};
