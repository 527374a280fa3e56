//! A rasterizer that draws every character as a solid block, so tests can reason about
//! exact pixels without a font file.

use text_box::{Canvas, ColourIndex, FontId, FontLibrary, Point, Rasterizer, Rect, TextBoxError, TextExtent};

/// A handle for a font that is never loaded; [Blocks] ignores it
pub fn font_id() -> FontId {
    FontLibrary::new().fonts.next_id()
}

/// Characters are `ratio * size` pixels wide and `size` pixels tall, with 80 % of the glyph
/// above the baseline. Whitespace is measured but left blank.
pub struct Blocks {
    pub ratio: f32,
}

impl Blocks {
    pub fn new(ratio: f32) -> Blocks {
        Blocks { ratio }
    }

    fn advance(&self, size: f32) -> i32 {
        (self.ratio * size).round() as i32
    }
}

impl Rasterizer for Blocks {
    fn measure_text(&self, _: FontId, size: f32, text: &str) -> Result<TextExtent, TextBoxError> {
        let width = text.chars().count() as i32 * self.advance(size);
        let ascent = (size * 0.8).round() as i32;
        Ok(TextExtent {
            bounds: Rect::new(0, -ascent, width, size.round() as i32),
            advance: width,
        })
    }

    fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        _: FontId,
        size: f32,
        origin: Point,
        colour: ColourIndex,
        text: &str,
    ) -> Result<(), TextBoxError> {
        let advance = self.advance(size);
        let ascent = (size * 0.8).round() as i32;
        let height = size.round() as i32;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = origin.x + i as i32 * advance;
            for y in origin.y - ascent..origin.y - ascent + height {
                for x in left..left + advance {
                    canvas.blend_pixel(x, y, colour, 255);
                }
            }
        }
        Ok(())
    }
}
