use crate::canvas::Canvas;
use crate::colour::{colours, Colour};
use crate::font::FontId;
use crate::layout::{self, FitOptions, Fitted, TextLayout};
use crate::paint;
use crate::rasterizer::Rasterizer;
use crate::rect::{Point, Rect};
use crate::TextBoxError;
use rand::RngCore;
use std::str::FromStr;

/// Horizontal placement of every line within the box
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for HorizontalAlignment {
    type Err = TextBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(HorizontalAlignment::Left),
            "center" => Ok(HorizontalAlignment::Center),
            "right" => Ok(HorizontalAlignment::Right),
            _ => Err(TextBoxError::InvalidAlignment(s.to_string())),
        }
    }
}

/// Vertical placement of the whole block of lines within the box
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl FromStr for VerticalAlignment {
    type Err = TextBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalAlignment::Top),
            "center" => Ok(VerticalAlignment::Center),
            "bottom" => Ok(VerticalAlignment::Bottom),
            _ => Err(TextBoxError::InvalidAlignment(s.to_string())),
        }
    }
}

/// How lines longer than the box are treated
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextWrapping {
    /// Greedy word wrapping. A single word wider than the box is kept whole and overflows.
    #[default]
    WrapWithOverflow,
    /// Only explicit newlines start a new line; long lines overflow the box
    NoWrap,
}

impl FromStr for TextWrapping {
    type Err = TextBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" | "wrap-with-overflow" | "wrapwithoverflow" => Ok(TextWrapping::WrapWithOverflow),
            "nowrap" | "no-wrap" => Ok(TextWrapping::NoWrap),
            _ => Err(TextBoxError::InvalidWrapping(s.to_string())),
        }
    }
}

/// A copy of the text drawn underneath it, offset by a few pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Shadow {
    pub colour: Colour,
    /// Positive x moves the shadow right, positive y moves it down
    pub offset: Point,
}

/// A rectangular region of a canvas that text is wrapped, aligned and drawn into, together
/// with every style setting used to draw it.
///
/// A text box is a plain value: it never owns the canvas it draws on, and none of the drawing
/// methods modify it. Setters return `&mut Self` so they can be chained:
///
/// ```no_run
/// use text_box::{colours, FontLibrary, HorizontalAlignment, TextBox, VerticalAlignment};
///
/// let mut fonts = FontLibrary::new();
/// let font = fonts.load_from_disk("LinLibertine_R.ttf").expect("can load font");
/// let mut image = image::RgbaImage::new(400, 200);
///
/// let mut text_box = TextBox::new(font);
/// text_box
///     .set_box(20, 20, 360, 160)
///     .set_font_size(24)
///     .set_font_colour(colours::WHITE)
///     .set_text_align(HorizontalAlignment::Center, VerticalAlignment::Center);
/// text_box.draw(&fonts, &mut image, "Owls are birds").expect("can draw");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub(crate) region: Rect,
    pub(crate) font: Option<FontId>,
    pub(crate) font_size: u32,
    pub(crate) font_colour: Colour,
    pub(crate) stroke_size: u32,
    pub(crate) stroke_colour: Colour,
    pub(crate) background_colour: Option<Colour>,
    pub(crate) shadow: Option<Shadow>,
    pub(crate) align_x: HorizontalAlignment,
    pub(crate) align_y: VerticalAlignment,
    pub(crate) wrapping: TextWrapping,
    pub(crate) line_height: f32,
    pub(crate) baseline: f32,
    pub(crate) spacing: f32,
    pub(crate) debug: bool,
}

impl Default for TextBox {
    fn default() -> Self {
        TextBox {
            region: Rect::new(0, 0, 100, 100),
            font: None,
            font_size: 12,
            font_colour: colours::BLACK,
            stroke_size: 0,
            stroke_colour: colours::BLACK,
            background_colour: None,
            shadow: None,
            align_x: HorizontalAlignment::Left,
            align_y: VerticalAlignment::Top,
            wrapping: TextWrapping::WrapWithOverflow,
            line_height: 1.25,
            baseline: 0.2,
            spacing: 0.0,
            debug: false,
        }
    }
}

impl TextBox {
    /// Create a text box using `font`, with every other setting at its default
    pub fn new(font: FontId) -> TextBox {
        TextBox {
            font: Some(font),
            ..TextBox::default()
        }
    }

    /// Position and size the box. `x` and `y` are the distance in pixels from the left and
    /// top edges of the canvas. Sizes beyond `i32::MAX` are clamped to it.
    pub fn set_box(&mut self, x: i32, y: i32, width: u32, height: u32) -> &mut Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        self.region = Rect::new(x, y, clamp(width), clamp(height));
        self
    }

    pub fn set_font(&mut self, font: FontId) -> &mut Self {
        self.font = Some(font);
        self
    }

    /// Font size in *pixels*
    pub fn set_font_size(&mut self, size: u32) -> &mut Self {
        self.font_size = size;
        self
    }

    pub fn set_font_colour(&mut self, colour: Colour) -> &mut Self {
        self.font_colour = colour;
        self
    }

    pub fn set_stroke_colour(&mut self, colour: Colour) -> &mut Self {
        self.stroke_colour = colour;
        self
    }

    /// Stroke size in *pixels*, 0 disables the stroke
    pub fn set_stroke_size(&mut self, size: u32) -> &mut Self {
        self.stroke_size = size;
        self
    }

    /// Draw a shadow of the text, shifted by `x_shift` pixels to the right and `y_shift`
    /// pixels down (negative values move it left / up)
    pub fn set_text_shadow(&mut self, colour: Colour, x_shift: i32, y_shift: i32) -> &mut Self {
        self.shadow = Some(Shadow {
            colour,
            offset: Point::new(x_shift, y_shift),
        });
        self
    }

    pub fn clear_text_shadow(&mut self) -> &mut Self {
        self.shadow = None;
        self
    }

    /// Fill a band behind every non-empty line
    pub fn set_background_colour(&mut self, colour: Colour) -> &mut Self {
        self.background_colour = Some(colour);
        self
    }

    pub fn clear_background_colour(&mut self) -> &mut Self {
        self.background_colour = None;
        self
    }

    /// Height of a single line, as a multiple of the font size
    pub fn set_line_height(&mut self, line_height: f32) -> &mut Self {
        self.line_height = line_height;
        self
    }

    /// Position of the baseline as a fraction of the line height, measured from the bottom
    /// of the line
    pub fn set_baseline(&mut self, baseline: f32) -> &mut Self {
        self.baseline = baseline;
        self
    }

    pub fn set_text_align(
        &mut self,
        x: HorizontalAlignment,
        y: VerticalAlignment,
    ) -> &mut Self {
        self.align_x = x;
        self.align_y = y;
        self
    }

    /// Set the alignment from loose tokens: `left`, `center`, `right` and `top`, `center`,
    /// `bottom`. Nothing is changed if either token is invalid.
    pub fn set_text_align_str(&mut self, x: &str, y: &str) -> Result<&mut Self, TextBoxError> {
        let x = x.parse()?;
        let y = y.parse()?;
        Ok(self.set_text_align(x, y))
    }

    /// Extra space between characters, in pixels; added to the font's own advances
    pub fn set_spacing(&mut self, spacing: f32) -> &mut Self {
        self.spacing = spacing;
        self
    }

    pub fn set_text_wrapping(&mut self, wrapping: TextWrapping) -> &mut Self {
        self.wrapping = wrapping;
        self
    }

    /// Fill the whole box and every line with random colours when drawing
    pub fn enable_debug(&mut self) -> &mut Self {
        self.debug = true;
        self
    }

    pub fn disable_debug(&mut self) -> &mut Self {
        self.debug = false;
        self
    }

    /// The configured box
    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn text_align(&self) -> (HorizontalAlignment, VerticalAlignment) {
        (self.align_x, self.align_y)
    }

    pub fn text_wrapping(&self) -> TextWrapping {
        self.wrapping
    }

    /// Wrap and position `text` without drawing anything
    pub fn layout(
        &self,
        rasterizer: &dyn Rasterizer,
        text: &str,
    ) -> Result<TextLayout, TextBoxError> {
        layout::layout_text(self, rasterizer, text, self.font_size)
    }

    /// The area that drawing `text` would cover
    pub fn measure(&self, rasterizer: &dyn Rasterizer, text: &str) -> Result<Rect, TextBoxError> {
        Ok(self.layout(rasterizer, text)?.bounds)
    }

    /// Draw `text` onto `canvas`. The text may contain newlines.
    ///
    /// Returns the area covered by the drawn text.
    pub fn draw(
        &self,
        rasterizer: &dyn Rasterizer,
        canvas: &mut dyn Canvas,
        text: &str,
    ) -> Result<Rect, TextBoxError> {
        self.draw_with_rng(rasterizer, canvas, text, &mut rand::thread_rng())
    }

    /// Like [TextBox::draw], with the random source used for debug colours supplied by the
    /// caller. Debug colours never influence the layout.
    pub fn draw_with_rng(
        &self,
        rasterizer: &dyn Rasterizer,
        canvas: &mut dyn Canvas,
        text: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Rect, TextBoxError> {
        let layout = self.layout(rasterizer, text)?;
        paint::paint(self, rasterizer, canvas, &layout, rng)?;
        Ok(layout.bounds)
    }

    /// Search for the font size that best fits `text` into the box, without drawing. The
    /// text box itself is left untouched; use [TextBox::set_font_size] with the result to
    /// keep the size.
    pub fn fit_font_size(
        &self,
        rasterizer: &dyn Rasterizer,
        text: &str,
        options: FitOptions,
    ) -> Result<Fitted, TextBoxError> {
        layout::fit_font_size(self, rasterizer, text, options)
    }

    /// Draw `text` at the font size found by [TextBox::fit_font_size]
    pub fn draw_fit_font_size(
        &self,
        rasterizer: &dyn Rasterizer,
        canvas: &mut dyn Canvas,
        text: &str,
        options: FitOptions,
    ) -> Result<Fitted, TextBoxError> {
        self.draw_fit_font_size_with_rng(rasterizer, canvas, text, options, &mut rand::thread_rng())
    }

    /// Like [TextBox::draw_fit_font_size], with the random source used for debug colours
    /// supplied by the caller
    pub fn draw_fit_font_size_with_rng(
        &self,
        rasterizer: &dyn Rasterizer,
        canvas: &mut dyn Canvas,
        text: &str,
        options: FitOptions,
        rng: &mut dyn RngCore,
    ) -> Result<Fitted, TextBoxError> {
        let fitted = self.fit_font_size(rasterizer, text, options)?;
        let layout = layout::layout_text(self, rasterizer, text, fitted.font_size)?;
        paint::paint(self, rasterizer, canvas, &layout, rng)?;
        Ok(Fitted {
            bounds: layout.bounds,
            font_size: fitted.font_size,
        })
    }
}
