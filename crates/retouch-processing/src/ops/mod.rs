//! Pixel operations backing each pipeline step

pub mod crop;
pub mod filters;
pub mod orientation;
pub mod overlay;
pub mod resize;

pub use crop::ImageCrop;
pub use filters::ImageFilters;
pub use orientation::ImageOrientation;
pub use overlay::Overlay;
pub use resize::ImageResize;

use crate::error::EngineError;

/// Largest width or height any step may produce
pub const MAX_DIMENSION: u32 = 16_384;

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), EngineError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(EngineError::DimensionsTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
