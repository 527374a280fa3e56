use crate::TextBoxError;
use fontdue::FontSettings;
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use std::path::Path;

/// A parsed font object. Fonts can be TTF or OTF fonts. The font is parsed twice: once for
/// its metrics (which drive all of the layout), and once into a coverage rasterizer which is
/// only used when glyphs are actually drawn.
///
/// Typically, fonts are referred to throughout user applications by their [FontId] within a
/// [FontLibrary], and not by any typed references
pub struct Font {
    pub face: OwnedFace,
    raster: fontdue::Font,
}

/// The opaque handle a [crate::TextBox] uses to refer to a font
pub type FontId = Id<Font>;

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TextBoxError> {
        let raster = fontdue::Font::from_bytes(bytes.as_slice(), FontSettings::default())
            .map_err(|e| TextBoxError::FontRaster(e.to_string()))?;
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face, raster })
    }

    /// Read and load a font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, TextBoxError> {
        let bytes = std::fs::read(path)?;
        Self::load(bytes)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// Obtain the full name of the font, if the font has one
    pub fn name(&self) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if the font has one
    pub fn family(&self) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Pixels per font unit at the given pixel size
    pub fn scaling(&self, size: f32) -> f32 {
        size / self.face().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: f32) -> f32 {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: f32) -> f32 {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: f32) -> f32 {
        self.scaling(size) * self.face().line_gap() as f32
    }

    /// Calculate the default line height of the font for the given size. Text boxes use their
    /// own line height multiplier instead; this is the font designer's suggestion.
    pub fn line_height(&self, size: f32) -> f32 {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// The glyph used to render `ch`: the character's own glyph, the replacement character,
    /// a question mark, or the `.notdef` glyph, whichever exists first
    pub(crate) fn glyph_for(&self, ch: char) -> GlyphId {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .map(GlyphId)
            .unwrap_or(GlyphId(0))
    }

    /// Horizontal advance of a glyph, in pixels
    pub(crate) fn advance(&self, glyph: GlyphId, size: f32) -> f32 {
        self.scaling(size) * self.face().glyph_hor_advance(glyph).unwrap_or_default() as f32
    }

    /// Glyph outline bounds in pixels as `(x_min, y_min, x_max, y_max)`, y growing upwards
    pub(crate) fn glyph_bounds(&self, glyph: GlyphId, size: f32) -> Option<(f32, f32, f32, f32)> {
        let scaling = self.scaling(size);
        self.face().glyph_bounding_box(glyph).map(|bbox| {
            (
                scaling * bbox.x_min as f32,
                scaling * bbox.y_min as f32,
                scaling * bbox.x_max as f32,
                scaling * bbox.y_max as f32,
            )
        })
    }

    /// Rasterize a glyph into a coverage bitmap
    pub(crate) fn rasterize(&self, glyph: GlyphId, size: f32) -> (fontdue::Metrics, Vec<u8>) {
        self.raster.rasterize_indexed(glyph.0, size)
    }
}

/// Owns every font a set of text boxes can use
#[derive(Default)]
pub struct FontLibrary {
    pub fonts: Arena<Font>,
}

impl FontLibrary {
    pub fn new() -> FontLibrary {
        FontLibrary::default()
    }

    /// Register a font, returning the handle text boxes refer to it by
    pub fn add_font(&mut self, font: Font) -> FontId {
        self.fonts.alloc(font)
    }

    /// Load a font file and register it
    pub fn load_from_disk<P: AsRef<Path>>(&mut self, path: P) -> Result<FontId, TextBoxError> {
        let font = Font::load_from_disk(path)?;
        Ok(self.add_font(font))
    }

    pub fn get(&self, id: FontId) -> Result<&Font, TextBoxError> {
        self.fonts.get(id).ok_or(TextBoxError::UnknownFont)
    }
}
