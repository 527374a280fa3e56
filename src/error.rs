use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TextBoxError {
    #[error("no font has been specified for the text box")]
    /// Layout or drawing was attempted before a font was set
    MissingFont,

    #[error("the font is not registered in this font library")]
    /// A [crate::FontId] was used with a library it did not come from
    UnknownFont,

    #[error("invalid alignment `{0}`")]
    /// An alignment token supplied as a string was not recognised
    InvalidAlignment(String),

    #[error("invalid text wrapping `{0}`")]
    /// A wrapping token supplied as a string was not recognised
    InvalidWrapping(String),

    #[error("unrecognized colour `{0}`")]
    /// A colour string could not be parsed
    InvalidColour(String),

    #[error("invalid hue {0}, it should be a value between 0 and 1")]
    /// A hue outside of `[0, 1)` was passed to [crate::Colour::from_hsl]
    InvalidHue(f64),

    #[error("degenerate geometry: {0}")]
    /// The box or font size cannot produce a meaningful layout
    DegenerateGeometry(String),

    #[error("font size search precision must not be 0")]
    /// The fit-to-box search was asked to step by 0
    InvalidPrecision,

    #[error("the image palette has no free entries")]
    /// A palette image already holds 256 colours
    PaletteFull,

    #[error("font rasterizer error: {0}")]
    /// [fontdue] rejected the font data
    FontRaster(String),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to encode or decode an image
    Image(#[from] image::ImageError),
}
