use crate::canvas::{Canvas, ColourIndex};
use crate::font::{FontId, FontLibrary};
use crate::rect::{Point, Rect};
use crate::TextBoxError;

/// The measured extent of a string of text
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextExtent {
    /// The tight bounding box of the text, relative to the pen origin on the baseline. `y`
    /// grows downwards, so the top of the box is usually negative.
    pub bounds: Rect,
    /// How far the pen moved while laying out the text, in pixels
    pub advance: i32,
}

/// Measures and draws single lines of text. Text is never rotated.
pub trait Rasterizer {
    /// Measure `text` set in `font` at `size` pixels
    fn measure_text(&self, font: FontId, size: f32, text: &str) -> Result<TextExtent, TextBoxError>;

    /// Draw `text` with its baseline starting at `origin`
    fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        font: FontId,
        size: f32,
        origin: Point,
        colour: ColourIndex,
        text: &str,
    ) -> Result<(), TextBoxError>;
}

impl Rasterizer for FontLibrary {
    fn measure_text(&self, font: FontId, size: f32, text: &str) -> Result<TextExtent, TextBoxError> {
        let font = self.get(font)?;

        let mut pen = 0.0_f32;
        let (mut x_min, mut x_max) = (0.0_f32, 0.0_f32);
        let mut vertical: Option<(f32, f32)> = None;
        for ch in text.chars() {
            let glyph = font.glyph_for(ch);
            if let Some((gx_min, gy_min, gx_max, gy_max)) = font.glyph_bounds(glyph, size) {
                // glyph bitmaps are drawn at whole pixel pen positions
                let pen = pen.round();
                x_min = x_min.min(pen + gx_min);
                x_max = x_max.max(pen + gx_max);
                // font units grow upwards, canvas pixels grow downwards
                let (top, bottom) = (-gy_max, -gy_min);
                vertical = Some(match vertical {
                    Some((t, b)) => (t.min(top), b.max(bottom)),
                    None => (top, bottom),
                });
            }
            pen += font.advance(glyph, size);
        }
        // whitespace has no outline but still takes up room
        x_max = x_max.max(pen);

        let (top, bottom) = vertical.unwrap_or_default();
        let (left, right) = (x_min.floor() as i32, x_max.ceil() as i32);
        let (top, bottom) = (top.floor() as i32, bottom.ceil() as i32);

        Ok(TextExtent {
            bounds: Rect::new(left, top, right - left, bottom - top),
            advance: pen.round() as i32,
        })
    }

    fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        font: FontId,
        size: f32,
        origin: Point,
        colour: ColourIndex,
        text: &str,
    ) -> Result<(), TextBoxError> {
        let font = self.get(font)?;

        let mut pen = origin.x as f32;
        for ch in text.chars() {
            let glyph = font.glyph_for(ch);
            let (metrics, coverage) = font.rasterize(glyph, size);
            if metrics.width > 0 {
                let left = (pen + metrics.xmin as f32).round() as i32;
                let top = origin.y - metrics.ymin - metrics.height as i32;
                for (i, &c) in coverage.iter().enumerate() {
                    let (col, row) = (i % metrics.width, i / metrics.width);
                    canvas.blend_pixel(left + col as i32, top + row as i32, colour, c);
                }
            }
            pen += font.advance(glyph, size);
        }

        Ok(())
    }
}
