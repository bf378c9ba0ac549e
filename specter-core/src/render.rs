// specter-core/src/render.rs
//! Painting applied replacements back onto page images.
//!
//! For every applied replacement whose target token carries a bounding
//! box, the renderer fills the box with the highlight color and re-renders
//! the replacement text inside it, starting at the configured maximum font
//! size and stepping down until the text fits the box in both dimensions.
//! A replacement that fits at no size >= 1 is a rendering shortfall: it is
//! logged and the box stays filled but textless; the page continues.
//!
//! License: MIT OR APACHE 2.0

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::{debug, warn};

use crate::config::RenderConfig;
use crate::errors::SpecterError;
use crate::rewriter::Replacement;
use crate::token::BoundingBox;

/// Resolved rendering options with the font loaded once per run.
pub struct RenderStyle {
    highlight_color: Rgba<u8>,
    text_color: Rgba<u8>,
    font: FontVec,
    max_font_size: u32,
}

impl std::fmt::Debug for RenderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderStyle")
            .field("highlight_color", &self.highlight_color)
            .field("text_color", &self.text_color)
            .field("font", &"<font>")
            .field("max_font_size", &self.max_font_size)
            .finish()
    }
}

impl RenderStyle {
    /// Loads the configured font and fixes the colors. A missing or
    /// unreadable font is a configuration error; image documents cannot be
    /// rendered without one.
    pub fn from_config(config: &RenderConfig) -> Result<Self, SpecterError> {
        let font_path = config.font_path.as_ref().ok_or_else(|| {
            SpecterError::InvalidConfig(
                "render.font_path is required when processing image documents".to_string(),
            )
        })?;

        let bytes = std::fs::read(font_path).map_err(|e| {
            SpecterError::InvalidConfig(format!(
                "cannot read font file '{}': {}",
                font_path.display(),
                e
            ))
        })?;

        let font = FontVec::try_from_vec(bytes).map_err(|e| {
            SpecterError::InvalidConfig(format!(
                "cannot parse font file '{}': {}",
                font_path.display(),
                e
            ))
        })?;

        let [hr, hg, hb] = config.highlight_color;
        let [tr, tg, tb] = config.text_color;

        Ok(Self {
            highlight_color: Rgba([hr, hg, hb, 255]),
            text_color: Rgba([tr, tg, tb, 255]),
            font,
            max_font_size: config.max_font_size.max(1),
        })
    }
}

/// Counters for one page's rendering pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Boxes that were filled and got their replacement text drawn.
    pub painted: usize,
    /// Boxes that were filled but whose text fit at no size.
    pub shortfalls: usize,
}

/// Applies every applied replacement with a bounding box to `image`.
pub fn redact_page(
    image: &mut RgbaImage,
    replacements: &[Replacement],
    style: &RenderStyle,
) -> RenderOutcome {
    let mut outcome = RenderOutcome::default();

    for replacement in replacements {
        if !replacement.applied {
            continue;
        }
        let Some(bounding_box) = replacement.target.bounding_box else {
            continue;
        };
        if bounding_box.width == 0 || bounding_box.height == 0 {
            continue;
        }

        let rect = Rect::at(bounding_box.left, bounding_box.top)
            .of_size(bounding_box.width, bounding_box.height);
        draw_filled_rect_mut(image, rect, style.highlight_color);

        match fit_font_size(&style.font, &replacement.text, bounding_box, style.max_font_size) {
            Some(size) => {
                draw_text_mut(
                    image,
                    style.text_color,
                    bounding_box.left,
                    bounding_box.top,
                    PxScale::from(size as f32),
                    &style.font,
                    &replacement.text,
                );
                debug!(
                    "Rendered '{}' at size {} into box ({}, {}, {}, {}).",
                    replacement.text,
                    size,
                    bounding_box.left,
                    bounding_box.top,
                    bounding_box.width,
                    bounding_box.height
                );
                outcome.painted += 1;
            }
            None => {
                warn!(
                    "Replacement '{}' fits box ({}x{}) at no font size; leaving it blank.",
                    replacement.text, bounding_box.width, bounding_box.height
                );
                outcome.shortfalls += 1;
            }
        }
    }

    outcome
}

/// Finds the largest font size `1..=max` whose rendered text fits the box,
/// or `None` if even size 1 overflows.
fn fit_font_size(
    font: &FontVec,
    text: &str,
    bounding_box: BoundingBox,
    max_font_size: u32,
) -> Option<u32> {
    for size in (1..=max_font_size).rev() {
        let (width, height) = text_size(PxScale::from(size as f32), font, text);
        if width <= bounding_box.width && height <= bounding_box.height {
            return Some(size);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_font_path_is_a_configuration_error() {
        let config = RenderConfig::default();
        let err = RenderStyle::from_config(&config).unwrap_err();
        assert!(matches!(err, SpecterError::InvalidConfig(_)));
    }

    #[test]
    fn test_unreadable_font_is_a_configuration_error() {
        let config = RenderConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..RenderConfig::default()
        };
        let err = RenderStyle::from_config(&config).unwrap_err();
        assert!(matches!(err, SpecterError::InvalidConfig(_)));
    }
}
