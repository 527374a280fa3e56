use crate::canvas::{clip, Canvas, ColourIndex};
use crate::colour::Colour;
use crate::error::TextBoxError;
use crate::rect::Rect;
use image::{Rgba, RgbaImage};

/// An indexed image: every pixel refers to an entry of a palette of at most 256 colours.
///
/// Colours have to be allocated in the palette before they can be drawn, so resolving a
/// colour that is not in the palette yet grows it. Glyphs are not anti-aliased on palette
/// images; a pixel is set when the glyph covers at least half of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteImage {
    width: u32,
    height: u32,
    palette: Vec<Colour>,
    pixels: Vec<u8>,
}

impl PaletteImage {
    /// Palette images can address at most this many colours
    pub const MAX_COLOURS: usize = 256;

    /// Create a new image filled with `background`, which becomes palette entry 0
    pub fn new(width: u32, height: u32, background: Colour) -> PaletteImage {
        PaletteImage {
            width,
            height,
            palette: vec![background],
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn palette(&self) -> &[Colour] {
        &self.palette
    }

    /// The palette index of the pixel at `(x, y)`, if it is inside the image
    pub fn index_at(&self, x: u32, y: u32) -> Option<ColourIndex> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(ColourIndex(
            self.pixels[(y * self.width + x) as usize] as u32,
        ))
    }

    /// The colour of the pixel at `(x, y)`, if it is inside the image
    pub fn colour_at(&self, x: u32, y: u32) -> Option<Colour> {
        self.index_at(x, y)
            .and_then(|ColourIndex(i)| self.palette.get(i as usize).copied())
    }

    /// Expand the palette into a true-colour image, e.g. to encode it with [image]
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let colour = self.colour_at(x, y).unwrap_or_default();
            let [r, g, b] = colour.to_array();
            let alpha = colour.alpha().unwrap_or(0) as f32;
            let opacity = (Colour::MAX_ALPHA as f32 - alpha) / Colour::MAX_ALPHA as f32;
            Rgba([r, g, b, (opacity * 255.0).round() as u8])
        })
    }

    fn set(&mut self, x: u32, y: u32, ColourIndex(index): ColourIndex) {
        if let Ok(index) = u8::try_from(index) {
            self.pixels[(y * self.width + x) as usize] = index;
        }
    }
}

impl Canvas for PaletteImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn find_colour(&self, colour: &Colour) -> Option<ColourIndex> {
        // opaque lookups match entries regardless of how they were allocated
        let matches = |entry: &Colour| match colour.alpha() {
            Some(alpha) => entry.to_array() == colour.to_array() && entry.alpha() == Some(alpha),
            None => entry.to_array() == colour.to_array() && entry.alpha().unwrap_or(0) == 0,
        };
        self.palette
            .iter()
            .position(matches)
            .map(|i| ColourIndex(i as u32))
    }

    fn allocate_colour(&mut self, colour: &Colour) -> Result<ColourIndex, TextBoxError> {
        if self.palette.len() >= Self::MAX_COLOURS {
            return Err(TextBoxError::PaletteFull);
        }
        self.palette.push(*colour);
        Ok(ColourIndex(self.palette.len() as u32 - 1))
    }

    fn fill_rect(&mut self, rect: Rect, index: ColourIndex) {
        let Some((x0, y0, x1, y1)) = clip(rect, (self.width, self.height)) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, index);
            }
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, index: ColourIndex, coverage: u8) {
        if coverage < 128 || x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32
        {
            return;
        }
        self.set(x as u32, y as u32, index);
    }
}
