//! Runs a pipeline against an engine
//!
//! The main image is decoded once, every non-terminal step is folded through
//! `ImageEngine::apply` in order, and the terminal `Encode` step produces the
//! output bytes. The first failing step aborts the run.

use crate::asset::ImageAsset;
use crate::engine::ImageEngine;
use crate::error::EngineError;
use crate::pipeline::{Pipeline, TransformStep};
use bytes::Bytes;
use std::time::Instant;

/// Encoded output of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub data: Bytes,
    pub format: String,
}

impl ProcessedImage {
    /// `image/<format>` with the format exactly as requested
    pub fn content_type(&self) -> String {
        format!("image/{}", self.format)
    }

    pub fn file_name(&self) -> String {
        format!("processed-image.{}", self.format)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub type ProcessingResult = Result<ProcessedImage, EngineError>;

pub struct PipelineExecutor;

impl PipelineExecutor {
    pub fn execute(
        engine: &dyn ImageEngine,
        input: &ImageAsset,
        pipeline: &Pipeline,
    ) -> ProcessingResult {
        let started = Instant::now();
        let mut img = engine.decode(input)?;

        for (index, step) in pipeline.steps().iter().enumerate() {
            if let TransformStep::Encode { format } = step {
                let data = engine.encode(&img, format)?;
                tracing::debug!(
                    format = %format,
                    output_bytes = data.len(),
                    steps = pipeline.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Pipeline finished"
                );
                return Ok(ProcessedImage {
                    data,
                    format: format.clone(),
                });
            }

            img = engine.apply(img, step).map_err(|e| {
                tracing::debug!(step = step.name(), index = index, error = %e, "Step failed");
                e
            })?;
            match step {
                TransformStep::Composite { source, .. } => tracing::debug!(
                    step = step.name(),
                    layer = source.as_str(),
                    index = index,
                    "Applied step"
                ),
                _ => tracing::debug!(step = step.name(), index = index, "Applied step"),
            }
        }

        Err(EngineError::MissingEncode)
    }
}
