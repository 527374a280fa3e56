use crate::canvas::{Canvas, ColourIndex};
use crate::error::TextBoxError;
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB colour with an optional alpha channel.
///
/// Alpha follows the raster convention rather than the CSS one: it ranges from 0 (completely
/// opaque) to 127 (completely transparent). A colour without alpha is resolved with an opaque
/// lookup, a colour with alpha (even an alpha of 0) with an alpha-aware one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Colour {
    red: u8,
    green: u8,
    blue: u8,
    alpha: Option<u8>,
}

impl Colour {
    /// The most transparent alpha value
    pub const MAX_ALPHA: u8 = 127;

    /// Create a new opaque colour without an alpha channel
    pub const fn new(red: u8, green: u8, blue: u8) -> Colour {
        Colour {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    /// Create a new colour with an alpha channel, alpha ranges from 0 (opaque) to 127
    /// (transparent) and is clamped to that range
    pub fn new_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Colour {
        Colour {
            red,
            green,
            blue,
            alpha: Some(alpha.min(Self::MAX_ALPHA)),
        }
    }

    /// The same colour with the given alpha (clamped to 0..=127)
    pub fn with_alpha(self, alpha: u8) -> Colour {
        Colour::new_alpha(self.red, self.green, self.blue, alpha)
    }

    /// The same colour with the alpha channel removed
    pub fn without_alpha(self) -> Colour {
        Colour {
            alpha: None,
            ..self
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> Option<u8> {
        self.alpha
    }

    /// `true` when an alpha channel was specified
    pub fn has_alpha_channel(&self) -> bool {
        self.alpha.is_some()
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Parse a CSS-like colour string:
    ///
    /// * `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, the `#` being optional
    /// * `rgb(r, g, b)` and `rgba(r, g, b, a)`
    ///
    /// Alpha components are CSS opacities (1 = opaque, 0 = transparent) and are converted
    /// to the 0..=127 alpha scale. Out of range components are clamped.
    pub fn parse(s: &str) -> Result<Colour, TextBoxError> {
        let invalid = || TextBoxError::InvalidColour(s.to_string());
        let stripped: String = s.trim().chars().filter(|&c| c != '#').collect();
        let lower = stripped.to_ascii_lowercase();

        let (rgb, opacity) = if let Some(args) = function_args(&lower, "rgba") {
            let mut values = parse_components(args).ok_or_else(invalid)?;
            let opacity = match values.len() {
                4 => values.pop(),
                3 => None,
                _ => return Err(invalid()),
            };
            (values, opacity)
        } else if let Some(args) = function_args(&lower, "rgb") {
            let values = parse_components(args).ok_or_else(invalid)?;
            if values.len() != 3 {
                return Err(invalid());
            }
            (values, None)
        } else {
            let digits: Vec<u8> = lower
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            let pair = |hi: u8, lo: u8| (hi * 16 + lo) as f64;
            match digits.as_slice() {
                &[r, g, b] => (vec![pair(r, r), pair(g, g), pair(b, b)], None),
                &[r, g, b, a] => (
                    vec![pair(r, r), pair(g, g), pair(b, b)],
                    Some(hex_opacity(pair(a, a))),
                ),
                &[r1, r2, g1, g2, b1, b2] => {
                    (vec![pair(r1, r2), pair(g1, g2), pair(b1, b2)], None)
                }
                &[r1, r2, g1, g2, b1, b2, a1, a2] => (
                    vec![pair(r1, r2), pair(g1, g2), pair(b1, b2)],
                    Some(hex_opacity(pair(a1, a2))),
                ),
                _ => return Err(invalid()),
            }
        };

        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        let mut colour = Colour::new(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]));
        if let Some(opacity) = opacity {
            let opacity = opacity.clamp(0.0, 1.0);
            colour = colour.with_alpha(((1.0 - opacity) * Self::MAX_ALPHA as f64).round() as u8);
        }
        Ok(colour)
    }

    /// Create a colour from hue, saturation and lightness, all ranging from 0.0 to 1.0. The
    /// hue is a fraction of a full turn and must be smaller than 1.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Result<Colour, TextBoxError> {
        let from_float = |[r, g, b]: [f64; 3]| {
            let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
            Colour::new(channel(r), channel(g), channel(b))
        };

        // no saturation means grey, only the lightness matters
        if s == 0.0 {
            return Ok(from_float([l, l, l]));
        }

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_ = h * 6.0;
        let x = chroma * (1.0 - ((h_ % 2.0) - 1.0).abs());
        let m = l - chroma / 2.0;

        let rgb = match h_ {
            h_ if (0.0..1.0).contains(&h_) => [chroma + m, x + m, m],
            h_ if (1.0..2.0).contains(&h_) => [x + m, chroma + m, m],
            h_ if (2.0..3.0).contains(&h_) => [m, chroma + m, x + m],
            h_ if (3.0..4.0).contains(&h_) => [m, x + m, chroma + m],
            h_ if (4.0..5.0).contains(&h_) => [x + m, m, chroma + m],
            h_ if (5.0..6.0).contains(&h_) => [chroma + m, m, x + m],
            _ => return Err(TextBoxError::InvalidHue(h)),
        };
        Ok(from_float(rgb))
    }

    /// Serialise as `#rrggbb`, or `#rrggbbaa` when the colour has an alpha channel
    pub fn to_hex_string(&self) -> String {
        match self.alpha {
            None => format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue),
            Some(alpha) => {
                let opacity = 1.0 - alpha as f64 / Self::MAX_ALPHA as f64;
                format!(
                    "#{:02x}{:02x}{:02x}{:02x}",
                    self.red,
                    self.green,
                    self.blue,
                    (opacity * 255.0).round() as u8
                )
            }
        }
    }

    /// Resolve this colour on `canvas`: an existing exact match is reused, otherwise the
    /// colour is allocated (which may grow the palette of palette based canvases)
    pub fn resolve_index<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
    ) -> Result<ColourIndex, TextBoxError> {
        match canvas.find_colour(self) {
            Some(index) => Ok(index),
            None => canvas.allocate_colour(self),
        }
    }
}

/// The text between `name(` and the closing `)`, if `s` is a call to `name`
fn function_args<'s>(s: &'s str, name: &str) -> Option<&'s str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .trim_end()
        .strip_suffix(')')
}

fn parse_components(args: &str) -> Option<Vec<f64>> {
    args.split(',')
        .map(|v| v.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

/// Alpha byte to CSS opacity, with the two decimal precision the hex forms carry
fn hex_opacity(byte: f64) -> f64 {
    (byte / 255.0 * 100.0).round() / 100.0
}

impl FromStr for Colour {
    type Err = TextBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::parse(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Colour::new(r, g, b)
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Colour::new(r, g, b)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::new(0, 0, 0);
    pub const WHITE: Colour = Colour::new(255, 255, 255);
    pub const RED: Colour = Colour::new(255, 0, 0);
    pub const GREEN: Colour = Colour::new(0, 255, 0);
    pub const BLUE: Colour = Colour::new(0, 0, 255);
}
