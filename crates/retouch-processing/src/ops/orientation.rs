use super::check_dimensions;
use crate::error::EngineError;
use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct ImageOrientation;

impl ImageOrientation {
    /// Rotate clockwise by `degrees`. Right angles are lossless; any other
    /// angle grows the canvas to fit the rotated image and fills the corners
    /// with opaque black. Transparency inside the source is kept.
    pub fn rotate(img: DynamicImage, degrees: f32) -> Result<DynamicImage, EngineError> {
        let normalized = degrees.rem_euclid(360.0);

        if normalized == 0.0 {
            return Ok(img);
        }
        if normalized == 90.0 {
            return Ok(img.rotate90());
        }
        if normalized == 180.0 {
            return Ok(img.rotate180());
        }
        if normalized == 270.0 {
            return Ok(img.rotate270());
        }

        Self::rotate_arbitrary(&img, normalized)
    }

    /// Bounding box of a `width`x`height` rectangle rotated by `degrees`
    pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (width as f32, height as f32);
        let new_width = (w * cos.abs() + h * sin.abs()).round().max(1.0) as u32;
        let new_height = (w * sin.abs() + h * cos.abs()).round().max(1.0) as u32;
        (new_width, new_height)
    }

    fn rotate_arbitrary(img: &DynamicImage, degrees: f32) -> Result<DynamicImage, EngineError> {
        let (width, height) = img.dimensions();
        let (out_width, out_height) = Self::rotated_bounds(width, height, degrees);
        check_dimensions(out_width, out_height)?;

        // Square working canvas large enough to hold the source at any angle
        let side = out_width.max(out_height).max(width).max(height);
        let mut canvas = RgbaImage::from_pixel(side, side, BACKGROUND);
        imageops::replace(
            &mut canvas,
            &img.to_rgba8(),
            i64::from((side - width) / 2),
            i64::from((side - height) / 2),
        );

        let rotated = rotate_about_center(
            &canvas,
            degrees.to_radians(),
            Interpolation::Bilinear,
            BACKGROUND,
        );

        let cropped = imageops::crop_imm(
            &rotated,
            (side - out_width) / 2,
            (side - out_height) / 2,
            out_width,
            out_height,
        )
        .to_image();

        Ok(DynamicImage::ImageRgba8(cropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255])))
    }

    #[test]
    fn test_right_angles_swap_dimensions() {
        let img = image(4, 2);
        assert_eq!(ImageOrientation::rotate(img.clone(), 90.0).unwrap().dimensions(), (2, 4));
        assert_eq!(ImageOrientation::rotate(img.clone(), 180.0).unwrap().dimensions(), (4, 2));
        assert_eq!(ImageOrientation::rotate(img.clone(), 270.0).unwrap().dimensions(), (2, 4));
        assert_eq!(ImageOrientation::rotate(img, 360.0).unwrap().dimensions(), (4, 2));
    }

    #[test]
    fn test_negative_angle_is_normalized() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let img = DynamicImage::ImageRgba8(img);
        let left = ImageOrientation::rotate(img.clone(), -90.0).unwrap();
        let right = ImageOrientation::rotate(img, 270.0).unwrap();
        assert_eq!(left.to_rgba8(), right.to_rgba8());
    }

    #[test]
    fn test_arbitrary_angle_expands_canvas() {
        let rotated = ImageOrientation::rotate(image(100, 100), 45.0).unwrap();
        assert_eq!(rotated.dimensions(), (141, 141));
        // corners are filled with opaque black
        assert_eq!(rotated.to_rgba8().get_pixel(0, 0), &BACKGROUND);
        // the centre is still (approximately) the source colour
        let centre = rotated.to_rgba8().get_pixel(70, 70).0;
        assert!(centre[0] <= 2 && centre[2] >= 253 && centre[3] >= 253, "{centre:?}");
    }

    #[test]
    fn test_transparent_source_stays_transparent() {
        let clear =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(60, 60, Rgba([255, 255, 255, 0])));
        let rotated = ImageOrientation::rotate(clear, 30.0).unwrap().to_rgba8();
        let (w, h) = rotated.dimensions();
        assert_eq!(rotated.get_pixel(w / 2, h / 2).0[3], 0);
        assert_eq!(rotated.get_pixel(0, 0), &BACKGROUND);
        assert_eq!(rotated.get_pixel(w - 1, h - 1), &BACKGROUND);
    }

    #[test]
    fn test_wide_image_keeps_content_at_shallow_angle() {
        let rotated = ImageOrientation::rotate(image(200, 10), 10.0).unwrap();
        let (w, h) = rotated.dimensions();
        assert!(w >= 195 && h > 10, "{w}x{h}");
    }
}
