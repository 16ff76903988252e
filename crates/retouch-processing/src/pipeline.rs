//! Transform pipeline construction
//!
//! A `Pipeline` is the ordered list of steps applied to the main image. It is
//! built once per request and never modified afterwards. Step order is fixed
//! no matter which fields were sent:
//!
//! ```text
//! resize -> crop -> grayscale -> rotate -> blur
//!        -> text composite -> overlay composite -> encode
//! ```
//!
//! Resizing before cropping means crop coordinates refer to the resized
//! image, and composites land on the already rotated/blurred result.

use crate::asset::ImageAsset;
use crate::params::{CropRect, RawParameters, TransformParams};

/// Where a composite layer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeSource {
    Text,
    Overlay,
}

impl CompositeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeSource::Text => "text",
            CompositeSource::Overlay => "overlay",
        }
    }
}

/// One discrete image operation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformStep {
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    Crop(CropRect),
    Grayscale,
    Rotate {
        degrees: f32,
    },
    Blur {
        sigma: f32,
    },
    Composite {
        source: CompositeSource,
        input: ImageAsset,
        left: i64,
        top: i64,
    },
    Encode {
        format: String,
    },
}

impl TransformStep {
    pub fn name(&self) -> &'static str {
        match self {
            TransformStep::Resize { .. } => "resize",
            TransformStep::Crop(_) => "crop",
            TransformStep::Grayscale => "grayscale",
            TransformStep::Rotate { .. } => "rotate",
            TransformStep::Blur { .. } => "blur",
            TransformStep::Composite { .. } => "composite",
            TransformStep::Encode { .. } => "encode",
        }
    }
}

/// Ordered, immutable list of steps. The last step is always `Encode`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    steps: Vec<TransformStep>,
}

impl Pipeline {
    /// Parse raw form fields and build the pipeline in one go.
    pub fn from_raw(
        raw: &RawParameters,
        text: Option<ImageAsset>,
        overlay: Option<ImageAsset>,
    ) -> Self {
        PipelineBuilder::build(&TransformParams::from_raw(raw), text, overlay)
    }

    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Format requested by the terminal `Encode` step
    pub fn output_format(&self) -> &str {
        match self.steps.last() {
            Some(TransformStep::Encode { format }) => format,
            _ => crate::params::DEFAULT_FORMAT,
        }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(TransformStep::name).collect()
    }
}

pub struct PipelineBuilder;

impl PipelineBuilder {
    /// Build the ordered step list. Never fails: anything malformed has
    /// already been mapped to "step omitted" by `TransformParams`.
    pub fn build(
        params: &TransformParams,
        text: Option<ImageAsset>,
        overlay: Option<ImageAsset>,
    ) -> Pipeline {
        let mut steps = Vec::with_capacity(8);

        if params.has_resize() {
            steps.push(TransformStep::Resize {
                width: params.width,
                height: params.height,
            });
        }

        if let Some(rect) = params.crop {
            steps.push(TransformStep::Crop(rect));
        }

        if params.grayscale {
            steps.push(TransformStep::Grayscale);
        }

        if let Some(degrees) = params.rotate {
            steps.push(TransformStep::Rotate { degrees });
        }

        if let Some(sigma) = params.blur {
            steps.push(TransformStep::Blur { sigma });
        }

        if params.text.is_some() {
            match text {
                Some(input) => steps.push(TransformStep::Composite {
                    source: CompositeSource::Text,
                    input,
                    left: params.text_x,
                    top: params.text_y,
                }),
                None => {
                    tracing::warn!("Text requested but no rasterized text layer was provided");
                }
            }
        }

        if let Some(input) = overlay {
            steps.push(TransformStep::Composite {
                source: CompositeSource::Overlay,
                input,
                left: params.overlay_x,
                top: params.overlay_y,
            });
        }

        steps.push(TransformStep::Encode {
            format: params.format.clone(),
        });

        Pipeline { steps }
    }
}
