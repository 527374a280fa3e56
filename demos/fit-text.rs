use text_box::image::{Rgba, RgbaImage};
use text_box::layout::FitOptions;
use text_box::{
    colours, Colour, FontLibrary, HorizontalAlignment, TextBox, TextBoxError, VerticalAlignment,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TextBoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // the font to set the text in, e.g. `cargo run --example fit-text -- CrimsonPro-Regular.ttf`
    let font_path = std::env::args().nth(1).expect("usage: fit-text <font.ttf>");

    let mut fonts = FontLibrary::new();
    let font = fonts.load_from_disk(&font_path)?;

    let mut image = RgbaImage::from_pixel(600, 400, image_rgba(colours::WHITE));

    let mut text_box = TextBox::new(font);
    text_box
        .set_box(40, 40, 520, 320)
        .set_font_size(64)
        .set_font_colour(Colour::parse("#333")?)
        .set_background_colour(Colour::parse("rgba(255, 220, 120, 0.6)")?)
        .set_text_shadow(Colour::new_alpha(0, 0, 0, 100), 2, 2)
        .set_text_align(HorizontalAlignment::Center, VerticalAlignment::Center);

    let text = format!("{}\n\n{}", lipsum::lipsum_title(), lipsum::lipsum(40));
    let fitted = text_box
        .draw_fit_font_size(&fonts, &mut image, &text, FitOptions::new(-1).with_min_font_size(6))?;
    println!("fitted text at {}px, covering {}", fitted.font_size, fitted.bounds);

    image.save("fit-text.png")?;
    Ok(())
}

fn image_rgba(colour: Colour) -> Rgba<u8> {
    let [r, g, b] = colour.to_array();
    Rgba([r, g, b, 255])
}
