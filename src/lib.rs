mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod font;
pub use font::*;

/// Wrapping, alignment and font size fitting for text boxes
pub mod layout;

mod paint;
pub use paint::BACKGROUND_CALIBRATION;

mod palette;
pub use palette::*;

mod rasterizer;
pub use rasterizer::*;

mod rect;
pub use rect::*;

mod textbox;
pub use textbox::*;

mod error;
pub use error::*;

#[cfg(test)]
pub(crate) mod testing;

/// Re-export of the image crate, for creating and encoding the canvases text is drawn onto
pub use image;
