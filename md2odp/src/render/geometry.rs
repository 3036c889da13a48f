//! Frame geometry: placeholder layout taken from the template and image fitting.

use crate::odf::{MasterPage, PresentationClass, Rect};
use serde::Deserialize;

/// Box that embedded images are fitted into, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ImageBox {
    fn default() -> Self {
        Self {
            x: 2.0,
            y: 4.0,
            width: 22.0,
            height: 12.0,
        }
    }
}

/// Geometry of the generated title and outline frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    pub break_header: Rect,
    pub header: Rect,
    pub outline: Rect,
}

impl Default for SlideLayout {
    fn default() -> Self {
        Self {
            break_header: Rect::new("2cm", "8cm", "20cm", "3cm"),
            header: Rect::new("2cm", "0.5cm", "20cm", "3cm"),
            outline: Rect::new("2cm", "4cm", "22cm", "12cm"),
        }
    }
}

/// Explicit geometry that takes precedence over the template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOverrides {
    pub break_header: Option<Rect>,
    pub header: Option<Rect>,
    pub outline: Option<Rect>,
}

impl SlideLayout {
    /// Layout for the given masters: explicit overrides first, then the placeholders of the
    /// requested masters, then the defaults.
    pub fn resolve(
        masters: &[MasterPage],
        break_master: Option<&str>,
        content_master: Option<&str>,
        overrides: &LayoutOverrides,
    ) -> Self {
        let defaults = Self::default();
        let placeholder = |master: Option<&str>, class: PresentationClass| {
            let master = master?;
            masters
                .iter()
                .find(|page| page.name == master)
                .and_then(|page| page.placeholder(class))
                .cloned()
        };

        Self {
            break_header: overrides
                .break_header
                .clone()
                .or_else(|| placeholder(break_master, PresentationClass::Title))
                .unwrap_or(defaults.break_header),
            header: overrides
                .header
                .clone()
                .or_else(|| placeholder(content_master, PresentationClass::Title))
                .unwrap_or(defaults.header),
            outline: overrides
                .outline
                .clone()
                .or_else(|| placeholder(content_master, PresentationClass::Outline))
                .unwrap_or(defaults.outline),
        }
    }
}

/// Largest rectangle of the image's aspect ratio inside `bounds`, centred on the axis with
/// slack.
pub fn fit_image(width: f64, height: f64, bounds: &ImageBox) -> Rect {
    let ratio = width / height;
    let box_ratio = bounds.width / bounds.height;

    let (mut x, mut y) = (bounds.x, bounds.y);
    let (fitted_width, fitted_height) = if ratio > box_ratio {
        let fitted_height = bounds.width / ratio;
        y += (bounds.height - fitted_height) / 2.0;
        (bounds.width, fitted_height)
    } else {
        let fitted_width = bounds.height * ratio;
        x += (bounds.width - fitted_width) / 2.0;
        (fitted_width, bounds.height)
    };

    Rect::new(
        format_cm(x),
        format_cm(y),
        format_cm(fitted_width),
        format_cm(fitted_height),
    )
}

/// Length in centimetres with at most three decimals (`4.5cm`, `22cm`).
pub fn format_cm(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{trimmed}cm")
}
