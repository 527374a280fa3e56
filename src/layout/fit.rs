use super::text::{layout_text, validate};
use crate::rasterizer::Rasterizer;
use crate::rect::Rect;
use crate::textbox::TextBox;
use crate::TextBoxError;

/// Largest font size the fit search will try when no maximum is given
pub const MAX_FIT_FONT_SIZE: u32 = 4096;

/// Parameters of the search for the font size that fits a text box
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FitOptions {
    /// How much the font size changes per step. Only the magnitude is used: the search
    /// shrinks the font when the text overflows and grows it when it fits. Must not be 0.
    pub precision: i32,
    /// The font size is kept below this value when growing
    pub max_font_size: Option<u32>,
    /// The font size is never shrunk below this value (and never below 1)
    pub min_font_size: Option<u32>,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            precision: -1,
            max_font_size: None,
            min_font_size: None,
        }
    }
}

impl FitOptions {
    pub fn new(precision: i32) -> FitOptions {
        FitOptions {
            precision,
            ..FitOptions::default()
        }
    }

    pub fn with_max_font_size(self, max_font_size: u32) -> FitOptions {
        FitOptions {
            max_font_size: Some(max_font_size),
            ..self
        }
    }

    pub fn with_min_font_size(self, min_font_size: u32) -> FitOptions {
        FitOptions {
            min_font_size: Some(min_font_size),
            ..self
        }
    }
}

/// A font size chosen to fit a text box, with the area the text covers at that size
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fitted {
    pub bounds: Rect,
    pub font_size: u32,
}

fn overflows(bounds: Rect, region: Rect) -> bool {
    bounds.height > region.height || bounds.width > region.width
}

fn strictly_inside(bounds: Rect, region: Rect) -> bool {
    bounds.height < region.height && bounds.width < region.width
}

/// Find the font size at which `text` best fits the text box, starting from the box's own
/// font size.
///
/// If the text overflows the box at the starting size, the size shrinks one step at a time
/// until it fits or the minimum is reached; a step that would go below the minimum is
/// shortened to land on it. A starting size below the minimum that overflows is replaced by
/// the minimum. Otherwise the size grows one
/// step at a time for as long as the text stays strictly inside the box on both axes and the
/// size stays below the maximum. The result is the last size measured to fit (or the
/// smallest size allowed).
pub(crate) fn fit_font_size(
    text_box: &TextBox,
    rasterizer: &dyn Rasterizer,
    text: &str,
    options: FitOptions,
) -> Result<Fitted, TextBoxError> {
    validate(text_box, text_box.font_size)?;
    let step = options.precision.unsigned_abs();
    if step == 0 {
        return Err(TextBoxError::InvalidPrecision);
    }
    let floor = options.min_font_size.unwrap_or(1).max(1);
    let ceiling = options.max_font_size.unwrap_or(MAX_FIT_FONT_SIZE);
    let region = text_box.region;

    let measure = |size: u32| -> Result<Rect, TextBoxError> {
        let bounds = layout_text(text_box, rasterizer, text, size)?.bounds;
        tracing::debug!(size, width = bounds.width, height = bounds.height, "measured font size");
        Ok(bounds)
    };

    let mut size = text_box.font_size;
    let mut bounds = measure(size)?;

    if overflows(bounds, region) {
        while overflows(bounds, region) && size != floor {
            // the last step lands on the floor rather than jumping past it
            size = size.saturating_sub(step).max(floor);
            bounds = measure(size)?;
        }
    } else {
        while strictly_inside(bounds, region) {
            let next = size.saturating_add(step);
            if next >= ceiling {
                break;
            }
            let next_bounds = measure(next)?;
            if !strictly_inside(next_bounds, region) {
                break;
            }
            size = next;
            bounds = next_bounds;
        }
    }

    tracing::debug!(
        from = text_box.font_size,
        to = size,
        "fitted font size to box"
    );
    Ok(Fitted {
        bounds,
        font_size: size,
    })
}
