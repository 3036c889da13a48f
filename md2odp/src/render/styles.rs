//! Automatic styles referenced by generated slides.

use crate::odf::{FontFace, PropertyArea, StyleDef, StyleFamily, StyleRegistry};
use crate::render::context::RenderOptions;
use crate::render::highlight::StyleTable;
use crate::render::tree::OUTLINE_STYLE;

pub const TEXT_EMPHASIS: &str = "md2odp-TextEmphasisStyle";
pub const TEXT_DOUBLE_EMPHASIS: &str = "md2odp-TextDoubleEmphasisStyle";
pub const TEXT_QUOTE: &str = "md2odp-TextQuoteStyle";
pub const TEXT_CODE: &str = "md2odp-TextCodeStyle";
pub const PARAGRAPH_QUOTE: &str = "md2odp-ParagraphQuoteStyle";
pub const PARAGRAPH_CODE: &str = "md2odp-ParagraphCodeStyle";
pub const IMAGE: &str = "md2odp-ImageStyle";
pub const TITLE: &str = "md2odp-TitleText";
pub const BREAK_TITLE: &str = "md2odp-BreakTitleText";
pub const OUTLINE_LIST: &str = "OutlineListStyle";
pub const ORDERED_LIST: &str = "L1";

/// Every style the renderer refers to.
///
/// `outline_list_style` is the content master's bullet style, already renamed to
/// [`OUTLINE_LIST`].
pub fn document_styles(
    options: &RenderOptions,
    outline_list_style: Option<String>,
    highlight: &StyleTable,
) -> StyleRegistry {
    let mut registry = StyleRegistry::new();
    let font = options.code_font.as_str();
    registry.add_font_face(FontFace::monospace(font));

    registry.add(
        StyleDef::new(StyleFamily::Text, TEXT_EMPHASIS)
            .with_properties(PropertyArea::Text, &[("fo:font-style", "italic")]),
    );
    registry.add(
        StyleDef::new(StyleFamily::Text, TEXT_DOUBLE_EMPHASIS)
            .with_properties(PropertyArea::Text, &[("fo:font-weight", "bold")]),
    );
    registry.add(StyleDef::new(StyleFamily::Text, TEXT_QUOTE).with_properties(
        PropertyArea::Text,
        &[("fo:font-size", "200%"), ("fo:color", "#ccf4c6")],
    ));
    registry.add(
        StyleDef::new(StyleFamily::Text, TEXT_CODE)
            .with_properties(PropertyArea::Text, &[("style:font-name", font)]),
    );

    registry.add(
        StyleDef::new(StyleFamily::Paragraph, PARAGRAPH_QUOTE)
            .with_properties(PropertyArea::Text, &[("fo:color", "#18a303")])
            .with_properties(
                PropertyArea::Paragraph,
                &[
                    ("fo:margin-left", "0.5cm"),
                    ("fo:margin-right", "0.5cm"),
                    ("fo:margin-top", "0.6cm"),
                    ("fo:margin-bottom", "0.5cm"),
                    ("fo:text-indent", "-0.6cm"),
                ],
            ),
    );
    registry.add(
        StyleDef::new(StyleFamily::Paragraph, PARAGRAPH_CODE)
            .with_properties(PropertyArea::Text, &[("style:font-name", font)])
            .with_properties(
                PropertyArea::Paragraph,
                &[
                    ("fo:margin-left", "0.5cm"),
                    ("fo:margin-right", "0.5cm"),
                    ("fo:margin-top", "0.6cm"),
                    ("fo:margin-bottom", "0.6cm"),
                    ("fo:text-indent", "0cm"),
                ],
            ),
    );

    registry.add(StyleDef::new(StyleFamily::Graphic, IMAGE).with_properties(
        PropertyArea::Graphic,
        &[
            ("draw:stroke", "none"),
            ("draw:fill", "none"),
            ("draw:textarea-horizontal-align", "right"),
            ("draw:textarea-vertical-align", "bottom"),
        ],
    ));

    let outline_fit: &[(&str, &str)] = if options.autofit_text {
        &[("draw:fit-to-size", "shrink-to-fit")]
    } else {
        &[("draw:auto-grow-height", "true")]
    };
    registry.add(
        StyleDef::new(StyleFamily::Presentation, OUTLINE_STYLE)
            .with_parent(format!("{}-outline1", options.content_master_name()))
            .with_properties(PropertyArea::Graphic, outline_fit),
    );
    registry.add(
        StyleDef::new(StyleFamily::Presentation, TITLE)
            .with_parent(format!("{}-title", options.content_master_name()))
            .with_properties(PropertyArea::Graphic, &[("draw:auto-grow-height", "true")]),
    );
    registry.add(
        StyleDef::new(StyleFamily::Presentation, BREAK_TITLE)
            .with_parent(format!("{}-title", options.break_master_name()))
            .with_properties(PropertyArea::Graphic, &[("draw:auto-grow-height", "true")]),
    );

    if let Some(list_style) = outline_list_style {
        registry.add_raw(OUTLINE_LIST, list_style);
    }

    highlight.register_styles(&mut registry);
    registry
}
