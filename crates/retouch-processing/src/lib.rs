//! Image processing core
//!
//! Form fields are parsed into `TransformParams`, turned into an ordered
//! `Pipeline` and run by `PipelineExecutor` against an `ImageEngine`.
//! Text overlays are rasterized into PNG layers by a `TextRasterizer`
//! before the pipeline is built.

pub mod asset;
pub mod compression;
pub mod engine;
pub mod error;
pub mod executor;
pub mod ops;
pub mod params;
pub mod pipeline;
pub mod text;
pub mod validator;

pub use asset::ImageAsset;
pub use compression::{ImageCompressor, OutputFormat};
pub use engine::{ImageEngine, RasterEngine};
pub use error::EngineError;
pub use executor::{PipelineExecutor, ProcessedImage, ProcessingResult};
pub use params::{CropRect, RawParameters, TransformParams, DEFAULT_FORMAT};
pub use pipeline::{CompositeSource, Pipeline, PipelineBuilder, TransformStep};
pub use text::{RasterizeError, SvgTextRasterizer, TextCanvas, TextRasterizer};
pub use validator::{UploadValidator, ValidationError};
