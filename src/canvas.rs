//! Drawing surfaces that text boxes can render onto.
//!
//! A [Canvas] only needs to know how to resolve colours to indices, fill
//! rectangles and blend single glyph pixels; everything else (wrapping,
//! alignment, decorations) happens in the layout engine. Two surfaces are
//! provided: true-colour [image::RgbaImage] buffers and the indexed
//! [PaletteImage](crate::PaletteImage).

use crate::colour::Colour;
use crate::error::TextBoxError;
use crate::rect::Rect;
use image::{Pixel, Rgba, RgbaImage};

/// A colour resolved against a particular canvas. For true-colour canvases this is the packed
/// colour value itself, for palette canvases it is the position in the palette.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColourIndex(pub u32);

/// A pixel buffer that text can be drawn into
pub trait Canvas {
    /// Width and height of the canvas, in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Look for an exact match of `colour` (including its alpha, if it has one)
    fn find_colour(&self, colour: &Colour) -> Option<ColourIndex>;

    /// Make `colour` available on the canvas, returning its new index
    fn allocate_colour(&mut self, colour: &Colour) -> Result<ColourIndex, TextBoxError>;

    /// Fill the pixels covered by `rect`, clipped to the canvas
    fn fill_rect(&mut self, rect: Rect, index: ColourIndex);

    /// Blend a single pixel with the given glyph coverage (0 = untouched, 255 = fully covered)
    fn blend_pixel(&mut self, x: i32, y: i32, index: ColourIndex, coverage: u8);
}

/// Clip `rect` to a canvas of the given size, returning the half-open pixel ranges
/// `(x0, y0, x1, y1)` or [None] if nothing remains
pub(crate) fn clip(rect: Rect, (width, height): (u32, u32)) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.left().max(0);
    let y0 = rect.top().max(0);
    let x1 = rect.right().min(width as i32);
    let y1 = rect.bottom().min(height as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

fn pack(colour: &Colour) -> ColourIndex {
    let [r, g, b] = colour.to_array();
    let alpha = colour.alpha().unwrap_or(0) as u32;
    ColourIndex((alpha << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
}

fn unpack(ColourIndex(index): ColourIndex) -> ([u8; 3], f32) {
    let alpha = ((index >> 24) & 0x7f) as f32;
    let rgb = [(index >> 16) as u8, (index >> 8) as u8, index as u8];
    (rgb, (Colour::MAX_ALPHA as f32 - alpha) / Colour::MAX_ALPHA as f32)
}

/// Source-over compositing of `rgb` at `opacity` onto `dst`
fn composite(dst: &mut Rgba<u8>, [r, g, b]: [u8; 3], opacity: f32) {
    let alpha = (opacity * 255.0).round().clamp(0.0, 255.0) as u8;
    dst.blend(&Rgba([r, g, b, alpha]));
}

/// True-colour canvas: every colour exists already, so lookups never allocate
impl Canvas for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn find_colour(&self, colour: &Colour) -> Option<ColourIndex> {
        Some(pack(colour))
    }

    fn allocate_colour(&mut self, colour: &Colour) -> Result<ColourIndex, TextBoxError> {
        Ok(pack(colour))
    }

    fn fill_rect(&mut self, rect: Rect, index: ColourIndex) {
        let Some((x0, y0, x1, y1)) = clip(rect, Canvas::dimensions(self)) else {
            return;
        };
        let (rgb, opacity) = unpack(index);
        for y in y0..y1 {
            for x in x0..x1 {
                composite(self.get_pixel_mut(x, y), rgb, opacity);
            }
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, index: ColourIndex, coverage: u8) {
        let (width, height) = Canvas::dimensions(self);
        if coverage == 0 || x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }
        let (rgb, opacity) = unpack(index);
        composite(
            self.get_pixel_mut(x as u32, y as u32),
            rgb,
            opacity * coverage as f32 / 255.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_colour_lookup_never_misses() {
        let image = RgbaImage::new(1, 1);
        let blue = Colour::new(0, 0, 255);
        assert_eq!(image.find_colour(&blue), Some(ColourIndex(0x0000ff)));
        let translucent = Colour::new_alpha(255, 0, 0, 127);
        assert_eq!(image.find_colour(&translucent), Some(ColourIndex(0x7fff0000)));
    }

    #[test]
    fn fill_is_clipped_and_half_open() {
        let mut image = RgbaImage::new(4, 4);
        let index = pack(&Colour::new(10, 20, 30));
        image.fill_rect(Rect::new(-2, 1, 4, 2), index);

        assert_eq!(image.get_pixel(0, 1).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(1, 2).0, [10, 20, 30, 255]);
        // right and bottom edges are exclusive
        assert_eq!(image.get_pixel(2, 1).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(0, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn blending_respects_coverage_and_alpha() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        let black = pack(&Colour::new(0, 0, 0));
        image.blend_pixel(0, 0, black, 255);
        image.blend_pixel(1, 0, black, 0);
        image.blend_pixel(5, 5, black, 255);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255, 255]);

        let mut image = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        image.fill_rect(Rect::new(0, 0, 1, 1), pack(&Colour::new_alpha(0, 0, 0, 127)));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn partial_coverage_mixes_with_the_background() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        image.blend_pixel(0, 0, pack(&Colour::new(0, 0, 0)), 128);
        let [r, g, b, a] = image.get_pixel(0, 0).0;
        assert!((120..=135).contains(&r), "{r}");
        assert_eq!((r, r), (g, b));
        assert!(a >= 254);

        // translucent pixels become more opaque underneath opaque paint
        let mut image = RgbaImage::new(1, 1);
        image.blend_pixel(0, 0, pack(&Colour::new(10, 20, 30)), 255);
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
