use super::wrap::wrap_text;
use crate::font::FontId;
use crate::rasterizer::Rasterizer;
use crate::rect::{Point, Rect};
use crate::textbox::{HorizontalAlignment, TextBox, VerticalAlignment};
use crate::TextBoxError;

/// A single wrapped line, positioned within its text box
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub text: String,
    /// Zero-based position of the line within the text box
    pub index: usize,
    /// Measured width (including character spacing) and glyph height of the line
    pub width: i32,
    pub height: i32,
    /// Where the line is drawn from: the left edge of the line on its baseline
    pub origin: Point,
    /// The top edge of the line's band of `line_height` pixels
    pub top: f32,
}

/// The result of wrapping and positioning some text within a text box
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LineLayout>,
    /// The font size the text was laid out at, in pixels
    pub font_size: u32,
    /// Height of each line in pixels
    pub line_height: f32,
    /// The area covered by all of the lines
    pub bounds: Rect,
}

/// Width of `text` as drawn: the rasterizer's bounding box plus the extra character spacing
pub(crate) fn line_width(
    rasterizer: &dyn Rasterizer,
    font: FontId,
    size: u32,
    spacing: f32,
    text: &str,
) -> Result<(i32, i32), TextBoxError> {
    let extent = rasterizer.measure_text(font, size as f32, text)?;
    let width = extent.bounds.width as f32 + text.chars().count() as f32 * spacing;
    Ok((width.round() as i32, extent.bounds.height))
}

/// Reject configurations that cannot be laid out, before anything is measured or drawn
pub(crate) fn validate(text_box: &TextBox, font_size: u32) -> Result<FontId, TextBoxError> {
    let font = text_box.font.ok_or(TextBoxError::MissingFont)?;
    let region = text_box.region;
    if region.width <= 0 || region.height <= 0 {
        return Err(TextBoxError::DegenerateGeometry(format!(
            "the box must have a positive size, got {}x{}",
            region.width, region.height
        )));
    }
    if font_size == 0 {
        return Err(TextBoxError::DegenerateGeometry(
            "the font size must be at least 1px".to_string(),
        ));
    }
    if !text_box.line_height.is_finite() || text_box.line_height <= 0.0 {
        return Err(TextBoxError::DegenerateGeometry(format!(
            "the line height must be positive, got {}",
            text_box.line_height
        )));
    }
    Ok(font)
}

/// Wrap `text` and position every line within the text box, using `font_size` instead of the
/// text box's own font size
pub(crate) fn layout_text(
    text_box: &TextBox,
    rasterizer: &dyn Rasterizer,
    text: &str,
    font_size: u32,
) -> Result<TextLayout, TextBoxError> {
    let font = validate(text_box, font_size)?;
    let region = text_box.region;
    let spacing = text_box.spacing;

    let lines = wrap_text(text, text_box.wrapping, region.width, |candidate| {
        line_width(rasterizer, font, font_size, spacing, candidate).map(|(w, _)| w)
    })?;

    let line_height = text_box.line_height * font_size as f32;
    let text_height = lines.len() as f32 * line_height;

    let y_align = match text_box.align_y {
        VerticalAlignment::Top => 0.0,
        VerticalAlignment::Center => (region.height as f32 / 2.0) - (text_height / 2.0),
        VerticalAlignment::Bottom => region.height as f32 - text_height,
    };
    // distance from the top of a line to its baseline
    let y_shift = line_height * (1.0 - text_box.baseline);

    let mut drawn_x = i32::MAX;
    let mut drawn_y = f32::MAX;
    let mut drawn_w = 0;
    let mut drawn_h = 0.0_f32;

    let mut laid_out = Vec::with_capacity(lines.len());
    for (n, text) in lines.into_iter().enumerate() {
        let (width, height) = line_width(rasterizer, font, font_size, spacing, &text)?;
        let x_align = match text_box.align_x {
            HorizontalAlignment::Left => 0,
            HorizontalAlignment::Center => ((region.width - width) as f32 / 2.0).round() as i32,
            HorizontalAlignment::Right => region.width - width,
        };

        let top = region.y() as f32 + y_align + n as f32 * line_height;
        let origin = Point::new(region.x() + x_align, (top + y_shift).round() as i32);

        drawn_x = drawn_x.min(origin.x);
        drawn_y = drawn_y.min(top);
        drawn_w = drawn_w.max(width);
        drawn_h += line_height;

        laid_out.push(LineLayout {
            text,
            index: n,
            width,
            height,
            origin,
            top,
        });
    }

    Ok(TextLayout {
        lines: laid_out,
        font_size,
        line_height,
        bounds: Rect::new(
            drawn_x,
            drawn_y.round() as i32,
            drawn_w,
            drawn_h.round() as i32,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{font_id, FixedAdvance};

    fn text_box(x: i32, y: i32, width: u32, height: u32, size: u32) -> TextBox {
        let mut text_box = TextBox::new(font_id());
        text_box.set_box(x, y, width, height).set_font_size(size);
        text_box
    }

    #[test]
    fn wraps_and_places_lines_on_their_baselines() {
        // "AA BB" is 240px wide, "AA" only 96px
        let rasterizer = FixedAdvance::new(3.0);
        let layout = layout_text(&text_box(0, 0, 200, 100, 16), &rasterizer, "AA BB", 16).unwrap();

        let texts: Vec<&str> = layout.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["AA", "BB"]);
        assert_eq!(layout.line_height, 20.0);
        assert_eq!(layout.lines[0].origin, Point::new(0, 16));
        assert_eq!(layout.lines[1].origin, Point::new(0, 36));
        assert_eq!(layout.lines[1].top, 20.0);
        assert_eq!(layout.bounds, Rect::new(0, 0, 96, 40));
    }

    #[test]
    fn centred_in_both_directions() {
        let rasterizer = FixedAdvance::new(1.0);
        let mut text_box = text_box(10, 20, 200, 100, 10);
        text_box.set_text_align(HorizontalAlignment::Center, VerticalAlignment::Center);
        let layout = layout_text(&text_box, &rasterizer, "abc", 10).unwrap();

        // 12.5px line centred in 100px: top at 20 + 43.75, baseline 10px further down
        assert_eq!(layout.lines[0].origin, Point::new(95, 74));
        assert_eq!(layout.bounds, Rect::new(95, 64, 30, 13));
    }

    #[test]
    fn bottom_right_alignment() {
        let rasterizer = FixedAdvance::new(1.0);
        let mut text_box = text_box(0, 0, 200, 100, 10);
        text_box.set_text_align(HorizontalAlignment::Right, VerticalAlignment::Bottom);
        let layout = layout_text(&text_box, &rasterizer, "abc\nde", 10).unwrap();

        assert_eq!(layout.lines[0].origin, Point::new(170, 85));
        assert_eq!(layout.lines[1].origin, Point::new(180, 98));
        assert_eq!(layout.bounds, Rect::new(170, 75, 30, 25));
    }

    #[test]
    fn right_alignment_of_a_full_width_line_starts_at_the_box_edge() {
        let rasterizer = FixedAdvance::new(1.0);
        let mut text_box = text_box(7, 0, 30, 100, 10);
        text_box.set_text_align(HorizontalAlignment::Right, VerticalAlignment::Top);
        let layout = layout_text(&text_box, &rasterizer, "abc", 10).unwrap();
        assert_eq!(layout.lines[0].origin.x, 7);
    }

    #[test]
    fn spacing_widens_lines() {
        let rasterizer = FixedAdvance::new(1.0);
        let mut text_box = text_box(0, 0, 200, 100, 10);
        text_box.set_spacing(2.0);
        let layout = layout_text(&text_box, &rasterizer, "abc", 10).unwrap();
        assert_eq!(layout.lines[0].width, 36);
    }

    #[test]
    fn line_height_and_baseline_are_configurable() {
        let rasterizer = FixedAdvance::new(1.0);
        let mut text_box = text_box(0, 0, 200, 100, 10);
        text_box.set_line_height(2.0).set_baseline(0.5);
        let layout = layout_text(&text_box, &rasterizer, "a\nb", 10).unwrap();
        assert_eq!(layout.lines[0].origin.y, 10);
        assert_eq!(layout.lines[1].origin.y, 30);
        assert_eq!(layout.bounds.height, 40);
    }

    #[test]
    fn layout_is_deterministic() {
        let rasterizer = FixedAdvance::new(0.6);
        let mut text_box = text_box(3, 4, 120, 80, 13);
        text_box.enable_debug();
        let text = "Owls are birds from the order Strigiformes";
        let first = layout_text(&text_box, &rasterizer, text, 13).unwrap();
        let second = layout_text(&text_box, &rasterizer, text, 13).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_font_is_reported_before_measuring() {
        let rasterizer = FixedAdvance::new(1.0);
        let result = layout_text(&TextBox::default(), &rasterizer, "abc", 12);
        assert!(matches!(result, Err(TextBoxError::MissingFont)));
        assert_eq!(*rasterizer.measured.borrow(), 0);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let rasterizer = FixedAdvance::new(1.0);
        let cases = [
            (text_box(0, 0, 0, 100, 10), 10),
            (text_box(0, 0, 100, 0, 10), 10),
            (text_box(0, 0, 100, 100, 10), 0),
        ];
        for (text_box, size) in cases {
            assert!(matches!(
                layout_text(&text_box, &rasterizer, "abc", size),
                Err(TextBoxError::DegenerateGeometry(_))
            ));
        }

        let mut text_box = text_box(0, 0, 100, 100, 10);
        text_box.set_line_height(0.0);
        assert!(matches!(
            layout_text(&text_box, &rasterizer, "abc", 10),
            Err(TextBoxError::DegenerateGeometry(_))
        ));
    }
}
