//! Markdown to OpenDocument presentation slides
//!
//!     This crate renders a markdown document as slides and inserts them into an existing ODP
//!     presentation, which acts as the template: its master pages supply the slide geometry and
//!     its styles are extended with the ones the slides need.
//!
//!     Level 1 headings start section break slides, level 2 headings content slides. Paragraphs,
//!     lists, quotes and code blocks under a heading go into the slide's outline frame; pictures
//!     directly after a heading are placed next to it.
//!
//!     This is a pure lib, that is, it powers md2odp-cli but is shell agnostic: no code here
//!     prints, reads environment variables or assumes a terminal.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── lib.rs                  # convert() entry point
//!     ├── odf                     # ODP access
//!     │   ├── node.rs             # Slide element model
//!     │   ├── xml.rs              # Element model to ODF XML
//!     │   ├── style.rs            # Automatic style registry
//!     │   ├── package.rs          # Zip container
//!     │   └── presentation.rs     # Template queries and edits
//!     └── render                  # Markdown to slides
//!         ├── whitespace.rs       # Significant whitespace in code
//!         ├── highlight.rs        # Syntax highlighter and style table
//!         ├── formatter.rs        # Token runs to styled spans
//!         ├── tree.rs             # Partial tree merging
//!         ├── geometry.rs         # Placeholder layout and image fitting
//!         ├── image.rs            # Picture sources and sizes
//!         ├── styles.rs           # Styles used by the renderer
//!         ├── context.rs          # Options and per-conversion state
//!         ├── renderer.rs         # Callbacks
//!         └── driver.rs           # Markdown AST walk
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common/mod.rs           # In-memory template presentations
//!     └── render
//!         ├── mod.rs
//!         └── <scenario>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are included
//!     as modules of tests/lib.rs.
//!
//! Core Algorithm
//!
//!     The markdown walk produces one small result per construct and merges siblings in order.
//!     Markdown never closes a slide, so the merge step inspects what was accumulated so far to
//!     decide where new content belongs, see ./render/tree.rs.
//!
pub mod error;
pub mod odf;
pub mod render;

pub use error::{OdfError, OdfResult, RenderError, RenderResult};
pub use odf::{Package, Presentation};
pub use render::{ImageBox, LayoutOverrides, RenderOptions};

use log::debug;
use render::{render_markdown, Renderer};

/// Explanation printed above the master page listing.
pub const MASTER_PAGE_HELP: &str = "Available master page names in template:
----------------------------------------

    For  visual  inspection,  select  View->Master->Slide  Master  in
    Impress. The names listed below are the slide names of the master
    pages you  see in the  slide preview  pane. Hover over  the slide
    thumbnails to  have them  displayed, right-click and  pick Rename
    Master to choose more speaking names.
";

/// Settings of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub render: RenderOptions,
    /// Slide after which the new slides are inserted. Negative values count from the end.
    pub page: i64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            page: -1,
        }
    }
}

/// What a conversion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Inserted { pages: usize, images: usize },
    /// A requested master page does not exist, so nothing was changed.
    UnknownMasterPage { available: Vec<String> },
}

/// Render `markdown` and insert the slides into `presentation`.
pub fn convert(
    markdown: &str,
    presentation: &mut Presentation,
    options: &ConvertOptions,
) -> RenderResult<ConvertOutcome> {
    let available = presentation.master_page_names()?;
    let render_options = &options.render;
    let unknown = |name: &Option<String>| name.as_ref().is_some_and(|n| !available.contains(n));
    if unknown(&render_options.break_master) || unknown(&render_options.content_master) {
        return Ok(ConvertOutcome::UnknownMasterPage { available });
    }

    let index = insert_index(presentation.body_len()?, options.page);

    let (nodes, images) = {
        let mut renderer = Renderer::new(presentation, render_options)?;
        let tree = render_markdown(markdown, &mut renderer)?;
        (tree.into_nodes(), renderer.embedded_images())
    };

    let pages = nodes
        .iter()
        .filter(|node| matches!(node, odf::Node::Page(_)))
        .count();
    debug!("Inserting {pages} slides at body position {index}");
    presentation.insert_nodes(index, &nodes)?;

    Ok(ConvertOutcome::Inserted { pages, images })
}

/// Body position for `page`. Non-negative pages count slides from the start; negative ones
/// count back from the end of the body.
fn insert_index(body_len: usize, page: i64) -> usize {
    let len = i64::try_from(body_len).unwrap_or(i64::MAX);
    let index = if page < 0 { len + page } else { page };
    usize::try_from(index.clamp(0, len)).unwrap_or(body_len)
}
