//! Text layout within a text box.
//!
//! Laying out text happens in three stages:
//!
//! - [`wrap_text`](crate::layout::wrap_text) splits the text on explicit newlines and greedily
//!   word-wraps every line to the width of the box
//! - the lines are then aligned horizontally and vertically within the box, giving every line
//!   a baseline origin and the whole text a covering rectangle ([`TextLayout`](crate::layout::TextLayout))
//! - optionally, [`FitOptions`](crate::layout::FitOptions) drive a search for the font size
//!   that makes the text fit the box
//!
//! None of this draws anything; drawing is done by [`TextBox::draw`](crate::TextBox::draw).
//!
//! # Example
//!
//! ```no_run
//! use text_box::{FontLibrary, TextBox};
//! use text_box::layout::FitOptions;
//!
//! let mut fonts = FontLibrary::new();
//! let font = fonts.load_from_disk("FiraMono-Regular.ttf").expect("can load font");
//!
//! let mut text_box = TextBox::new(font);
//! text_box.set_box(0, 0, 200, 100).set_font_size(40);
//!
//! let layout = text_box.layout(&fonts, "Hello,\nworld!").expect("can lay out");
//! for line in &layout.lines {
//!     println!("{:?} at {}", line.text, line.origin);
//! }
//!
//! let fitted = text_box
//!     .fit_font_size(&fonts, "Hello, world!", FitOptions::new(-1))
//!     .expect("can fit");
//! println!("fits at {}px", fitted.font_size);
//! ```

mod fit;
mod text;
mod wrap;

pub use fit::{FitOptions, Fitted, MAX_FIT_FONT_SIZE};
pub use text::{LineLayout, TextLayout};
pub use wrap::{explicit_lines, wrap_text};

pub(crate) use fit::fit_font_size;
pub(crate) use text::layout_text;
