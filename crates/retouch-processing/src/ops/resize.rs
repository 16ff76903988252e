use super::check_dimensions;
use crate::error::EngineError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Target size when only one axis is constrained; the other follows the
    /// source aspect ratio.
    pub fn calculate_dimensions(
        orig_width: u32,
        orig_height: u32,
        width: Option<u32>,
        height: Option<u32>,
    ) -> (u32, u32) {
        match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => {
                let aspect_ratio = orig_height as f64 / orig_width as f64;
                let h = (w as f64 * aspect_ratio).round() as u32;
                (w, h.max(1))
            }
            (None, Some(h)) => {
                let aspect_ratio = orig_width as f64 / orig_height as f64;
                let w = (h as f64 * aspect_ratio).round() as u32;
                (w.max(1), h)
            }
            (None, None) => (orig_width, orig_height),
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// With both axes the image covers the box and is centre-cropped to it.
    /// With one axis the aspect ratio is preserved.
    pub fn apply(
        img: &DynamicImage,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<DynamicImage, EngineError> {
        let (orig_width, orig_height) = img.dimensions();
        let (target_width, target_height) =
            Self::calculate_dimensions(orig_width, orig_height, width, height);
        check_dimensions(target_width, target_height)?;

        if (target_width, target_height) == (orig_width, orig_height) {
            return Ok(img.clone());
        }

        let filter = Self::select_filter(orig_width, orig_height, target_width, target_height);
        let resized = match (width, height) {
            (Some(_), Some(_)) => img.resize_to_fill(target_width, target_height, filter),
            _ => img.resize_exact(target_width, target_height, filter),
        };
        Ok(resized)
    }
}
