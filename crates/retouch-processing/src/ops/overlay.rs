use crate::asset::ImageAsset;
use crate::error::EngineError;
use image::{imageops, DynamicImage, ImageReader};
use std::io::Cursor;

pub struct Overlay;

impl Overlay {
    /// Decode a composite layer; supports the same formats as the main image.
    pub fn decode_layer(layer: &ImageAsset) -> Result<DynamicImage, EngineError> {
        ImageReader::new(Cursor::new(layer.data.as_ref()))
            .with_guessed_format()
            .map_err(|e| EngineError::Composite(e.to_string()))?
            .decode()
            .map_err(|e| EngineError::Composite(e.to_string()))
    }

    /// Alpha-blend `layer` over `img` with its top-left corner at
    /// (`left`, `top`). Parts outside the base image are clipped.
    pub fn apply(
        img: &DynamicImage,
        layer: &ImageAsset,
        left: i64,
        top: i64,
    ) -> Result<DynamicImage, EngineError> {
        let layer_img = Self::decode_layer(layer)?.to_rgba8();

        let mut img_rgba = img.to_rgba8();
        imageops::overlay(&mut img_rgba, &layer_img, left, top);

        Ok(DynamicImage::ImageRgba8(img_rgba))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};

    fn png_layer(width: u32, height: u32, color: Rgba<u8>) -> ImageAsset {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        ImageAsset::png(buffer)
    }

    fn base() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn test_overlay_at_offset() {
        let layer = png_layer(2, 2, Rgba([255, 0, 0, 255]));
        let out = Overlay::apply(&base(), &layer, 3, 4).unwrap();
        assert_eq!(out.get_pixel(3, 4), Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(2, 4), Rgba([255, 255, 255, 255]));
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn test_larger_layer_is_clipped() {
        let layer = png_layer(40, 40, Rgba([0, 0, 255, 255]));
        let out = Overlay::apply(&base(), &layer, -5, -5).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.get_pixel(9, 9), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_transparent_layer_leaves_base() {
        let layer = png_layer(10, 10, Rgba([0, 0, 0, 0]));
        let out = Overlay::apply(&base(), &layer, 0, 0).unwrap();
        assert_eq!(out.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_undecodable_layer_fails() {
        let layer = ImageAsset::png(b"not an image".to_vec());
        let err = Overlay::apply(&base(), &layer, 0, 0).unwrap_err();
        assert!(matches!(err, EngineError::Composite(_)));
    }
}
