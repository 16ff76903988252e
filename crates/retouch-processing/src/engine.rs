//! Image engine abstraction
//!
//! The executor only talks to `ImageEngine`, so alternative backends (or a
//! recording engine in tests) can be plugged in without touching pipeline
//! code. `RasterEngine` is the in-process implementation built on `image`
//! and `imageproc`.

use crate::asset::ImageAsset;
use crate::compression::{ImageCompressor, OutputFormat};
use crate::error::EngineError;
use crate::ops::{
    check_dimensions, ImageCrop, ImageFilters, ImageOrientation, ImageResize, Overlay,
};
use crate::pipeline::TransformStep;
use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;

pub trait ImageEngine: Send + Sync {
    /// Decode the main image into a working handle.
    fn decode(&self, input: &ImageAsset) -> Result<DynamicImage, EngineError>;

    /// Apply one non-terminal step, consuming the handle.
    fn apply(&self, img: DynamicImage, step: &TransformStep) -> Result<DynamicImage, EngineError>;

    /// Encode the handle into the named output format.
    fn encode(&self, img: &DynamicImage, format: &str) -> Result<Bytes, EngineError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RasterEngine;

impl RasterEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ImageEngine for RasterEngine {
    fn decode(&self, input: &ImageAsset) -> Result<DynamicImage, EngineError> {
        let img = ImageReader::new(Cursor::new(input.data.as_ref()))
            .with_guessed_format()
            .map_err(|e| EngineError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| EngineError::Decode(e.to_string()))?;

        let (width, height) = img.dimensions();
        check_dimensions(width, height)?;

        tracing::debug!(
            width = width,
            height = height,
            color = ?img.color(),
            "Decoded input image"
        );
        Ok(img)
    }

    fn apply(&self, img: DynamicImage, step: &TransformStep) -> Result<DynamicImage, EngineError> {
        match step {
            TransformStep::Resize { width, height } => ImageResize::apply(&img, *width, *height),
            TransformStep::Crop(rect) => ImageCrop::apply(&img, *rect),
            TransformStep::Grayscale => Ok(ImageFilters::apply_grayscale(&img)),
            TransformStep::Rotate { degrees } => ImageOrientation::rotate(img, *degrees),
            TransformStep::Blur { sigma } => ImageFilters::apply_blur(&img, *sigma),
            TransformStep::Composite {
                input, left, top, ..
            } => Overlay::apply(&img, input, *left, *top),
            TransformStep::Encode { .. } => Err(EngineError::UnexpectedStep(step.name())),
        }
    }

    fn encode(&self, img: &DynamicImage, format: &str) -> Result<Bytes, EngineError> {
        let format = OutputFormat::parse(format)?;
        ImageCompressor::compress(img, format)
    }
}
