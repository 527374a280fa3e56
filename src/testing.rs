//! Deterministic stand-ins for fonts and canvases, shared by the unit tests.

use crate::{Canvas, Colour, ColourIndex, Font, FontId, Point, Rasterizer, Rect, TextBoxError, TextExtent};
use id_arena::Arena;
use std::cell::RefCell;

/// A font handle that no real font stands behind; the test rasterizer ignores it
pub fn font_id() -> FontId {
    Arena::<Font>::new().next_id()
}

/// Every character is `ratio * size` pixels wide; glyphs are `size` pixels tall with their
/// baseline at 80 %
pub struct FixedAdvance {
    pub ratio: f32,
    pub measured: RefCell<usize>,
}

impl FixedAdvance {
    pub fn new(ratio: f32) -> FixedAdvance {
        FixedAdvance {
            ratio,
            measured: RefCell::new(0),
        }
    }
}

impl Rasterizer for FixedAdvance {
    fn measure_text(&self, _: FontId, size: f32, text: &str) -> Result<TextExtent, TextBoxError> {
        *self.measured.borrow_mut() += 1;
        let width = (text.chars().count() as f32 * self.ratio * size).round() as i32;
        let ascent = (size * 0.8).round() as i32;
        Ok(TextExtent {
            bounds: Rect::new(0, -ascent, width, size.round() as i32),
            advance: width,
        })
    }

    /// Marks the pen position with a single pixel, so the canvas sees one operation per draw
    fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        _: FontId,
        _: f32,
        origin: Point,
        colour: ColourIndex,
        _: &str,
    ) -> Result<(), TextBoxError> {
        canvas.blend_pixel(origin.x, origin.y, colour, 255);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill(Rect, Colour),
    Text(Point, Colour),
}

/// Records every fill and text draw, in order
#[derive(Default)]
pub struct RecordingCanvas {
    pub palette: Vec<Colour>,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<(Point, Colour)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(p, c) => Some((*p, *c)),
                Op::Fill(..) => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(Rect, Colour)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(r, c) => Some((*r, *c)),
                Op::Text(..) => None,
            })
            .collect()
    }

    fn colour(&self, ColourIndex(i): ColourIndex) -> Colour {
        self.palette[i as usize]
    }
}

impl Canvas for RecordingCanvas {
    fn dimensions(&self) -> (u32, u32) {
        (1000, 1000)
    }

    fn find_colour(&self, colour: &Colour) -> Option<ColourIndex> {
        self.palette
            .iter()
            .position(|c| c == colour)
            .map(|i| ColourIndex(i as u32))
    }

    fn allocate_colour(&mut self, colour: &Colour) -> Result<ColourIndex, TextBoxError> {
        self.palette.push(*colour);
        Ok(ColourIndex(self.palette.len() as u32 - 1))
    }

    fn fill_rect(&mut self, rect: Rect, index: ColourIndex) {
        let colour = self.colour(index);
        self.ops.push(Op::Fill(rect, colour));
    }

    fn blend_pixel(&mut self, x: i32, y: i32, index: ColourIndex, _: u8) {
        let colour = self.colour(index);
        self.ops.push(Op::Text(Point::new(x, y), colour));
    }
}
