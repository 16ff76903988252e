/// Failures raised by the image engine while decoding, transforming or encoding.
///
/// Messages are returned to the client verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Input image could not be decoded: {0}")]
    Decode(String),

    #[error(
        "bad extract area: {width}x{height} at ({left}, {top}) does not fit a {image_width}x{image_height} image"
    )]
    BadExtractArea {
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Expected number between 0.3 and 1000 for sigma but received {0}")]
    InvalidBlurSigma(f32),

    #[error("Image dimensions {width}x{height} exceed the maximum of {max}x{max}")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },

    #[error("Composite input could not be decoded: {0}")]
    Composite(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode {format}: {message}")]
    Encode { format: String, message: String },

    #[error("Step '{0}' cannot be applied to an image handle")]
    UnexpectedStep(&'static str),

    #[error("Pipeline does not end with an encode step")]
    MissingEncode,
}
