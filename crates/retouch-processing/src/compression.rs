use crate::error::EngineError;
use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

const JPEG_QUALITY: f32 = 80.0;
const WEBP_QUALITY: f32 = 80.0;
const AVIF_QUALITY: f32 = 50.0;
const AVIF_SPEED: u8 = 6;
/// libwebp cannot encode images wider or taller than this
pub const WEBP_MAX_DIMENSION: u32 = 16_383;

/// Output format for encoded images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Avif,
    Gif,
}

impl OutputFormat {
    /// Format identifiers are matched exactly (lowercase), `jpg` is an alias of `jpeg`.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        match s {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "avif" => Ok(OutputFormat::Avif),
            "gif" => Ok(OutputFormat::Gif),
            _ => Err(EngineError::UnsupportedFormat(s.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Avif => "avif",
            OutputFormat::Gif => "gif",
        }
    }
}

pub struct ImageCompressor;

impl ImageCompressor {
    pub fn compress(img: &DynamicImage, format: OutputFormat) -> Result<Bytes, EngineError> {
        let encode_err = |message: String| EngineError::Encode {
            format: format.as_str().to_string(),
            message,
        };

        match format {
            OutputFormat::Jpeg => Self::compress_jpeg(img).map_err(|e| encode_err(e.to_string())),
            OutputFormat::Png => {
                Self::write_with_image_crate(img, ImageFormat::Png).map_err(encode_err)
            }
            OutputFormat::Gif => {
                // GIF encoder only takes 8-bit RGBA
                let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
                Self::write_with_image_crate(&rgba, ImageFormat::Gif).map_err(encode_err)
            }
            OutputFormat::WebP => Self::compress_webp(img).map_err(encode_err),
            OutputFormat::Avif => Self::compress_avif(img).map_err(encode_err),
        }
    }

    fn write_with_image_crate(img: &DynamicImage, format: ImageFormat) -> Result<Bytes, String> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        img.write_to(&mut cursor, format).map_err(|e| e.to_string())?;
        Ok(Bytes::from(buffer))
    }

    /// Compress to JPEG with mozjpeg (no alpha channel)
    fn compress_jpeg(img: &DynamicImage) -> std::io::Result<Bytes> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(JPEG_QUALITY);
        comp.set_optimize_coding(true);

        let mut comp = comp.start_compress(Vec::new())?;
        comp.write_scanlines(&rgb_img)?;
        let jpeg_data = comp.finish()?;

        Ok(Bytes::from(jpeg_data))
    }

    /// Compress to lossy WebP with libwebp
    fn compress_webp(img: &DynamicImage) -> Result<Bytes, String> {
        let (width, height) = img.dimensions();
        if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
            return Err(format!(
                "{}x{} exceeds the WebP limit of {}x{}",
                width, height, WEBP_MAX_DIMENSION, WEBP_MAX_DIMENSION
            ));
        }
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = encoder
            .encode_simple(false, WEBP_QUALITY)
            .map_err(|e| format!("{:?}", e))?;

        Ok(Bytes::copy_from_slice(&webp_data))
    }

    /// Compress to AVIF with ravif, keeping transparency
    fn compress_avif(img: &DynamicImage) -> Result<Bytes, String> {
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();

        let rgba_data: Vec<rgb::RGBA8> = rgba_img
            .as_raw()
            .chunks_exact(4)
            .map(|chunk| rgb::RGBA8::new(chunk[0], chunk[1], chunk[2], chunk[3]))
            .collect();

        let img_buf = ravif::Img::new(rgba_data.as_slice(), width as usize, height as usize);

        let encoder = ravif::Encoder::new()
            .with_quality(AVIF_QUALITY)
            .with_speed(AVIF_SPEED);

        let avif_data = encoder.encode_rgba(img_buf).map_err(|e| e.to_string())?;

        Ok(Bytes::from(avif_data.avif_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 12, Rgba([10, 200, 30, 128])))
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::parse("avif").unwrap(), OutputFormat::Avif);
        assert_eq!(OutputFormat::parse("gif").unwrap(), OutputFormat::Gif);
        assert_eq!(
            OutputFormat::parse("tiff").unwrap_err(),
            EngineError::UnsupportedFormat("tiff".to_string())
        );
        assert!(OutputFormat::parse("PNG").is_err());
    }

    #[test]
    fn test_png_output_decodes_back() {
        let bytes = ImageCompressor::compress(&sample(), OutputFormat::Png).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 12));
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let bytes = ImageCompressor::compress(&sample(), OutputFormat::Jpeg).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 12));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_webp_and_gif_are_recognised() {
        let webp = ImageCompressor::compress(&sample(), OutputFormat::WebP).unwrap();
        assert_eq!(image::guess_format(&webp).unwrap(), ImageFormat::WebP);

        let gif = ImageCompressor::compress(&sample(), OutputFormat::Gif).unwrap();
        assert_eq!(image::guess_format(&gif).unwrap(), ImageFormat::Gif);
    }

    #[test]
    fn test_webp_over_size_limit_is_an_error() {
        let wide = DynamicImage::ImageRgba8(RgbaImage::new(WEBP_MAX_DIMENSION + 1, 2));
        let err = ImageCompressor::compress(&wide, OutputFormat::WebP).unwrap_err();
        assert!(
            matches!(&err, EngineError::Encode { format, .. } if format == "webp"),
            "{err:?}"
        );

        let edge = DynamicImage::ImageRgba8(RgbaImage::new(WEBP_MAX_DIMENSION, 1));
        assert!(ImageCompressor::compress(&edge, OutputFormat::WebP).is_ok());
    }

    #[test]
    fn test_grayscale_input_encodes() {
        let gray = sample().grayscale();
        for format in [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::WebP] {
            let bytes = ImageCompressor::compress(&gray, format).unwrap();
            assert!(!bytes.is_empty(), "{:?}", format);
        }
    }
}
