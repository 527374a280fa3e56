//! Drawing a laid out text box: debug fills, backgrounds, shadows, strokes and the glyphs
//! themselves, in that order.

use crate::canvas::{Canvas, ColourIndex};
use crate::colour::Colour;
use crate::font::FontId;
use crate::layout::TextLayout;
use crate::rasterizer::Rasterizer;
use crate::rect::{Point, Rect};
use crate::textbox::TextBox;
use crate::TextBoxError;
use rand::{Rng, RngCore};

/// Empirical offset that centres the background band behind the glyphs when the line height
/// differs from 1. Tuned visually, not derived from font metrics.
pub const BACKGROUND_CALIBRATION: f32 = 13.0;

/// Reference string used to cancel out the rasterizer's own spacing when characters are
/// drawn one at a time
const SPACING_PROBE: &str = "test";

/// Translucent light colour for debug fills of whole areas
fn debug_pastel(rng: &mut dyn RngCore) -> Colour {
    Colour::new_alpha(
        rng.gen_range(180..=255),
        rng.gen_range(180..=255),
        rng.gen_range(180..=255),
        80,
    )
}

/// Opaque mid-tone colour for debug fills of single lines
fn debug_mid_tone(rng: &mut dyn RngCore) -> Colour {
    Colour::new(
        rng.gen_range(1..=180),
        rng.gen_range(1..=180),
        rng.gen_range(1..=180),
    )
}

fn fill(canvas: &mut dyn Canvas, rect: Rect, colour: &Colour) -> Result<(), TextBoxError> {
    let index = colour.resolve_index(canvas)?;
    canvas.fill_rect(rect, index);
    Ok(())
}

/// Everything needed to put the glyphs of one line on the canvas
struct Pen<'a> {
    text_box: &'a TextBox,
    rasterizer: &'a dyn Rasterizer,
    font: FontId,
    font_size: u32,
}

impl Pen<'_> {
    /// Draw `text` with its baseline starting at `origin`
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        colour: ColourIndex,
        text: &str,
        rng: &mut dyn RngCore,
    ) -> Result<(), TextBoxError> {
        let size = self.font_size as f32;
        let spacing = self.text_box.spacing;
        if spacing == 0.0 {
            return self
                .rasterizer
                .draw_text(canvas, self.font, size, origin, colour, text);
        }

        let probe_width = self
            .rasterizer
            .measure_text(self.font, size, SPACING_PROBE)?
            .bounds
            .width;

        let mut x = origin.x as f32;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let ch: &str = ch.encode_utf8(&mut buf);
            if self.text_box.debug {
                let own = self.rasterizer.measure_text(self.font, size, ch)?.bounds;
                let rect = Rect::new(
                    (x - own.left() as f32).round() as i32,
                    origin.y - own.height,
                    own.width,
                    own.height,
                );
                fill(canvas, rect, &debug_pastel(rng))?;
            }

            // measuring the character in front of the probe includes the rasterizer's own
            // spacing between them, which is then added to the configured spacing
            let full = self
                .rasterizer
                .measure_text(self.font, size, &format!("{ch}{SPACING_PROBE}"))?
                .bounds;
            let position = Point::new((x - full.left() as f32).round() as i32, origin.y);
            self.rasterizer
                .draw_text(canvas, self.font, size, position, colour, ch)?;
            x += spacing + (full.width - probe_width) as f32;
        }

        Ok(())
    }
}

/// Draw a laid out text box onto `canvas`
pub(crate) fn paint(
    text_box: &TextBox,
    rasterizer: &dyn Rasterizer,
    canvas: &mut dyn Canvas,
    layout: &TextLayout,
    rng: &mut dyn RngCore,
) -> Result<(), TextBoxError> {
    let font = text_box.font.ok_or(TextBoxError::MissingFont)?;
    let font_size = layout.font_size;
    let pen = Pen {
        text_box,
        rasterizer,
        font,
        font_size,
    };

    tracing::debug!(
        lines = layout.lines.len(),
        font_size,
        bounds = %layout.bounds,
        "drawing text box"
    );

    // resolve every colour before touching any pixels
    let font_colour = text_box.font_colour.resolve_index(canvas)?;
    let stroke_colour = match text_box.stroke_size {
        0 => None,
        _ => Some(text_box.stroke_colour.resolve_index(canvas)?),
    };
    let shadow = match text_box.shadow {
        Some(shadow) => Some((shadow.offset, shadow.colour.resolve_index(canvas)?)),
        None => None,
    };

    if text_box.debug {
        fill(canvas, text_box.region, &debug_pastel(rng))?;
    }

    let line_height = layout.line_height;
    for line in layout.lines.iter() {
        if let Some(background) = &text_box.background_colour {
            if !line.text.is_empty() {
                let band_height = font_size as f32;
                let correction = (1.0 - text_box.line_height)
                    * BACKGROUND_CALIBRATION
                    * (font_size as f32 / 50.0);
                let y = line.top + (line_height - band_height) + correction;
                let rect = Rect::new(
                    line.origin.x,
                    y.round() as i32,
                    line.width,
                    font_size as i32,
                );
                fill(canvas, rect, background)?;
            }
        }

        if text_box.debug {
            let rect = Rect::new(
                line.origin.x,
                line.top.round() as i32,
                line.width,
                line_height.round() as i32,
            );
            fill(canvas, rect, &debug_mid_tone(rng))?;
        }

        if let Some((offset, colour)) = shadow {
            pen.draw(canvas, line.origin + offset, colour, &line.text, rng)?;
        }

        if let Some(colour) = stroke_colour {
            let k = text_box.stroke_size as i32;
            for c1 in -k..=k {
                for c2 in -k..=k {
                    pen.draw(canvas, line.origin + Point::new(c1, c2), colour, &line.text, rng)?;
                }
            }
        }

        pen.draw(canvas, line.origin, font_colour, &line.text, rng)?;
    }

    Ok(())
}
