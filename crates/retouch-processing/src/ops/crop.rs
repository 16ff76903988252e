use crate::error::EngineError;
use crate::params::CropRect;
use image::{DynamicImage, GenericImageView};

pub struct ImageCrop;

impl ImageCrop {
    /// Extract `rect`; it must have non-zero area and lie fully inside the image.
    pub fn apply(img: &DynamicImage, rect: CropRect) -> Result<DynamicImage, EngineError> {
        let (image_width, image_height) = img.dimensions();

        let fits = rect.width > 0
            && rect.height > 0
            && u64::from(rect.left) + u64::from(rect.width) <= u64::from(image_width)
            && u64::from(rect.top) + u64::from(rect.height) <= u64::from(image_height);

        if !fits {
            return Err(EngineError::BadExtractArea {
                left: rect.left,
                top: rect.top,
                width: rect.width,
                height: rect.height,
                image_width,
                image_height,
            });
        }

        Ok(img.crop_imm(rect.left, rect.top, rect.width, rect.height))
    }
}
