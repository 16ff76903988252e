use crate::error::EngineError;
use image::DynamicImage;

pub const MIN_BLUR_SIGMA: f32 = 0.3;
pub const MAX_BLUR_SIGMA: f32 = 1000.0;

pub struct ImageFilters;

impl ImageFilters {
    /// Convert image to grayscale, alpha is kept
    pub fn apply_grayscale(img: &DynamicImage) -> DynamicImage {
        img.grayscale()
    }

    /// Gaussian blur with standard deviation `sigma`
    pub fn apply_blur(img: &DynamicImage, sigma: f32) -> Result<DynamicImage, EngineError> {
        if !(MIN_BLUR_SIGMA..=MAX_BLUR_SIGMA).contains(&sigma) {
            return Err(EngineError::InvalidBlurSigma(sigma));
        }
        Ok(img.blur(sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn test_grayscale() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])));
        let gray = ImageFilters::apply_grayscale(&img);
        let pixel = gray.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
        assert_eq!(gray.dimensions(), (4, 4));
    }

    #[test]
    fn test_blur_softens_edge() {
        let img = RgbaImage::from_fn(20, 1, |x, _| {
            if x < 10 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let blurred = ImageFilters::apply_blur(&DynamicImage::ImageRgba8(img), 2.0).unwrap();
        let edge = blurred.to_rgba8().get_pixel(10, 0).0[0];
        assert!(edge > 0 && edge < 255, "edge value {edge}");
    }

    #[test]
    fn test_blur_sigma_range() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert!(ImageFilters::apply_blur(&img, 0.3).is_ok());
        assert_eq!(
            ImageFilters::apply_blur(&img, 0.1).unwrap_err(),
            EngineError::InvalidBlurSigma(0.1)
        );
        assert!(ImageFilters::apply_blur(&img, 1000.5).is_err());
        assert!(ImageFilters::apply_blur(&img, -1.0).is_err());
    }
}
