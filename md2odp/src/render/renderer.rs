//! Renderer callbacks.
//!
//! One method per markdown construct, called by the driver in document order. Each returns a
//! fresh [`PartialTree`] (or plain text for `text`) that the driver merges with its siblings.

use crate::error::{RenderError, RenderResult};
use crate::odf::{
    Frame, FrameContent, ImageContent, Link, List, ListItem, Node, Page, Paragraph,
    Presentation, PresentationClass, Span,
};
use crate::render::context::{RenderContext, RenderOptions};
use crate::render::formatter::format_tokens;
use crate::render::geometry::{fit_image, SlideLayout};
use crate::render::highlight::Highlighter;
use crate::render::image::{asset_path, media_type, natural_size, ImageSource, IMAGE_PREFIX};
use crate::render::styles::{self, document_styles};
use crate::render::tree::{wrap_spans, PartialTree};
use crate::render::whitespace::{plain_code_nodes, split_whitespace};
use log::{debug, warn};

/// Layout of section break slides (title only).
pub const BREAK_LAYOUT: &str = "AL3T19";
/// Layout of content slides (title and outline).
pub const CONTENT_LAYOUT: &str = "AL3T1";

/// Turns markdown constructs into slide nodes, embedding pictures into `presentation`.
pub struct Renderer<'p> {
    presentation: &'p mut Presentation,
    context: RenderContext,
    highlighter: Highlighter,
    initial_images: usize,
}

impl<'p> Renderer<'p> {
    /// Resolve layout against the template and register every style the callbacks use.
    pub fn new(presentation: &'p mut Presentation, options: &RenderOptions) -> RenderResult<Self> {
        let masters = presentation.master_pages()?;
        let layout = SlideLayout::resolve(
            &masters,
            options.break_master.as_deref(),
            options.content_master.as_deref(),
            &options.layout,
        );
        let highlighter = Highlighter::new(&options.highlight_style)?;

        let initial_images = presentation
            .manifest_paths()?
            .iter()
            .filter(|path| path.contains(IMAGE_PREFIX))
            .count();

        let content_master = options.content_master_name();
        let list_style = presentation.outline_list_style(content_master, styles::OUTLINE_LIST)?;
        if list_style.is_none() {
            warn!(
                "Master page '{content_master}' has no outline list style, bullets will use defaults"
            );
        }
        let registry = document_styles(options, list_style, highlighter.style_table());
        presentation.insert_styles(&registry)?;

        Ok(Self {
            presentation,
            context: RenderContext::new(options.clone(), layout, initial_images),
            highlighter,
            initial_images,
        })
    }

    /// Pictures embedded by this renderer.
    pub fn embedded_images(&self) -> usize {
        self.context.image_counter - self.initial_images
    }

    fn tree(&self, nodes: Vec<Node>) -> PartialTree {
        PartialTree::new(nodes, self.context.layout.outline.clone())
    }

    /// Empty result, the starting point of every container.
    pub fn placeholder(&self) -> PartialTree {
        self.tree(Vec::new())
    }

    pub fn text(&self, text: &str) -> String {
        text.to_string()
    }

    pub fn linebreak(&self) -> PartialTree {
        self.tree(vec![Node::Span(Span {
            style: None,
            children: vec![Node::LineBreak],
        })])
    }

    /// A new slide. Level 1 starts a section break, level 2 a content slide.
    pub fn header(&self, text: PartialTree, level: u8) -> RenderResult<PartialTree> {
        let options = &self.context.options;
        let layout = &self.context.layout;
        let (master, page_layout, style, rect) = match level {
            1 => (
                options.break_master_name(),
                BREAK_LAYOUT,
                styles::BREAK_TITLE,
                layout.break_header.clone(),
            ),
            2 => (
                options.content_master_name(),
                CONTENT_LAYOUT,
                styles::TITLE,
                layout.header.clone(),
            ),
            _ => return Err(RenderError::UnsupportedHeadingLevel(level)),
        };

        let nodes = text.into_nodes();
        let name = plain_text(&nodes);
        debug!("Slide '{name}' (level {level})");

        let title = Frame::text(PresentationClass::Title, style, rect, wrap_spans(nodes));
        Ok(self.tree(vec![Node::Page(Page {
            name,
            master_page: master.to_string(),
            layout: page_layout.to_string(),
            children: vec![Node::Frame(title)],
        })]))
    }

    pub fn paragraph(&self, text: PartialTree) -> PartialTree {
        let starts_with_image = text.nodes().first().is_some_and(Node::is_image_frame);
        if starts_with_image || text.is_empty() {
            return text;
        }
        self.tree(vec![Node::Span(Span {
            style: None,
            children: text.into_nodes(),
        })])
    }

    pub fn list(&self, body: PartialTree, ordered: bool) -> PartialTree {
        let style = if ordered {
            styles::ORDERED_LIST
        } else {
            styles::OUTLINE_LIST
        };
        self.tree(vec![Node::List(List {
            style: Some(style.to_string()),
            items: body.into_nodes(),
        })])
    }

    pub fn list_item(&self, text: PartialTree) -> PartialTree {
        self.tree(vec![Node::ListItem(ListItem {
            children: wrap_spans(text.into_nodes()),
        })])
    }

    /// Code in a paragraph of its own. Without a language the text is kept as is, otherwise it
    /// is highlighted.
    pub fn block_code(&self, code: &str, language: Option<&str>) -> RenderResult<PartialTree> {
        let children = match language {
            Some(language) => format_tokens(
                self.highlighter.tokenize(code, language)?,
                self.highlighter.style_table(),
            ),
            None => plain_code_nodes(code),
        };
        Ok(self.tree(vec![Node::Paragraph(Paragraph {
            style: Some(styles::PARAGRAPH_CODE.to_string()),
            children,
        })]))
    }

    pub fn block_quote(&self, text: PartialTree) -> PartialTree {
        let quote_mark = |mark: &str| {
            Node::Span(Span::styled(
                styles::TEXT_QUOTE,
                vec![Node::Text(mark.to_string())],
            ))
        };
        self.tree(vec![Node::Paragraph(Paragraph {
            style: Some(styles::PARAGRAPH_QUOTE.to_string()),
            children: vec![
                quote_mark("\u{201c}"),
                Node::Span(Span {
                    style: None,
                    children: text.into_nodes(),
                }),
                quote_mark("\u{201d}"),
            ],
        })])
    }

    pub fn codespan(&self, text: &str) -> PartialTree {
        let children = split_whitespace(text)
            .into_iter()
            .map(|unit| unit.into_node(|literal| Node::Text(literal.to_string())))
            .collect();
        self.tree(vec![Node::Span(Span::styled(styles::TEXT_CODE, children))])
    }

    pub fn emphasis(&self, text: PartialTree) -> PartialTree {
        self.tree(vec![Node::Span(Span::styled(
            styles::TEXT_EMPHASIS,
            text.into_nodes(),
        ))])
    }

    pub fn double_emphasis(&self, text: PartialTree) -> PartialTree {
        self.tree(vec![Node::Span(Span::styled(
            styles::TEXT_DOUBLE_EMPHASIS,
            text.into_nodes(),
        ))])
    }

    /// Hyperlink showing the plain text of `content`.
    pub fn link(&self, url: &str, title: Option<&str>, content: PartialTree) -> PartialTree {
        self.tree(vec![Node::Link(Link {
            href: url.to_string(),
            title: title.map(str::to_string),
            children: vec![Node::Text(plain_text(content.nodes()))],
        })])
    }

    pub fn autolink(&self, url: &str, is_email: bool) -> PartialTree {
        let href = if is_email {
            format!("mailto:{url}")
        } else {
            url.to_string()
        };
        self.tree(vec![Node::Link(Link {
            href,
            title: None,
            children: vec![Node::Text(url.to_string())],
        })])
    }

    /// Embed the picture at `src` and return a graphic frame fitted into the image box.
    pub fn image(
        &mut self,
        src: &str,
        title: Option<&str>,
        alt: Option<&str>,
    ) -> RenderResult<PartialTree> {
        let options = &self.context.options;
        let source = ImageSource::parse(src, options.base_dir.as_deref());
        let data = source.fetch()?;

        let extension = source.extension();
        let path = asset_path(&extension);
        let (width, height) = natural_size(&data, &extension);
        let rect = fit_image(width, height, &options.image_box);

        self.presentation
            .add_media(&path, media_type(&extension), data)?;
        self.context.image_counter += 1;
        debug!(
            "Embedded image #{} from '{src}' as {path}",
            self.context.image_counter
        );

        Ok(self.tree(vec![Node::Frame(Frame {
            class: PresentationClass::Graphic,
            style: styles::IMAGE.to_string(),
            rect,
            content: FrameContent::Image(ImageContent {
                href: path,
                title: title.map(str::to_string),
                description: alt.map(str::to_string),
            }),
        })]))
    }

    pub fn table(&self, _header: PartialTree, _body: PartialTree) -> PartialTree {
        self.placeholder()
    }

    pub fn table_row(&self, _content: PartialTree) -> PartialTree {
        self.placeholder()
    }

    pub fn table_cell(&self, _content: PartialTree, _header: bool) -> PartialTree {
        self.placeholder()
    }

    pub fn tag(&self, _html: &str) -> PartialTree {
        self.placeholder()
    }

    pub fn strikethrough(&self, _text: PartialTree) -> PartialTree {
        self.placeholder()
    }
}

fn plain_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::plain_text).collect()
}
