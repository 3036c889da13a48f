//! Per-conversion settings and state.

use crate::render::geometry::{ImageBox, LayoutOverrides, SlideLayout};
use crate::render::highlight::DEFAULT_HIGHLIGHT_STYLE;
use std::path::PathBuf;

pub const DEFAULT_MASTER: &str = "Default";
pub const DEFAULT_CODE_FONT: &str = "Nimbus Mono L";

/// Caller-supplied rendering settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Theme name or classic highlight style alias
    pub highlight_style: String,
    /// Shrink outline text to fit its frame instead of growing the frame
    pub autofit_text: bool,
    pub code_font: String,
    /// Master page of level 1 (section break) slides. When unset, slides use `Default` and
    /// the built-in geometry.
    pub break_master: Option<String>,
    /// Master page of level 2 (content) slides, unset like `break_master`
    pub content_master: Option<String>,
    pub layout: LayoutOverrides,
    pub image_box: ImageBox,
    /// Directory relative image paths are resolved against
    pub base_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_style: DEFAULT_HIGHLIGHT_STYLE.to_string(),
            autofit_text: true,
            code_font: DEFAULT_CODE_FONT.to_string(),
            break_master: None,
            content_master: None,
            layout: LayoutOverrides::default(),
            image_box: ImageBox::default(),
            base_dir: None,
        }
    }
}

impl RenderOptions {
    pub fn break_master_name(&self) -> &str {
        self.break_master.as_deref().unwrap_or(DEFAULT_MASTER)
    }

    pub fn content_master_name(&self) -> &str {
        self.content_master.as_deref().unwrap_or(DEFAULT_MASTER)
    }
}

/// Settings resolved against the template, plus the state shared by all callbacks of one
/// conversion.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub options: RenderOptions,
    pub layout: SlideLayout,
    /// Pictures embedded in the document so far, including earlier conversions
    pub image_counter: usize,
}

impl RenderContext {
    pub fn new(options: RenderOptions, layout: SlideLayout, existing_images: usize) -> Self {
        Self {
            options,
            layout,
            image_counter: existing_images,
        }
    }
}
