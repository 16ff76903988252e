//! `POST /processimage`
//!
//! Accepts a multipart form with a required `file` part, an optional
//! `overlay` part and any number of text fields, and answers with the
//! processed image as an attachment.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use retouch_core::AppError;
use retouch_processing::{
    ImageAsset, PipelineBuilder, PipelineExecutor, ProcessedImage, RawParameters,
    TransformParams,
};
use std::sync::Arc;

const FILE_FIELD: &str = "file";
const OVERLAY_FIELD: &str = "overlay";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Everything pulled out of one multipart body
#[derive(Debug, Default)]
pub struct ProcessImageForm {
    pub file: Option<ImageAsset>,
    pub overlay: Option<ImageAsset>,
    pub fields: RawParameters,
}

/// At most one `file` and one `overlay` part; any other part that carries a
/// filename is rejected. Text fields with repeated names keep the last value.
pub async fn extract_form(mut multipart: Multipart) -> Result<ProcessImageForm, HttpAppError> {
    let mut form = ProcessImageForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        let slot = match field_name.as_str() {
            FILE_FIELD => Some(&mut form.file),
            OVERLAY_FIELD => Some(&mut form.overlay),
            _ => None,
        };

        match slot {
            Some(slot) => {
                if slot.is_some() {
                    return Err(unexpected_field(&field_name));
                }
                let content_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await?;
                *slot = Some(ImageAsset::new(data, content_type));
            }
            None if field.file_name().is_some() => {
                return Err(unexpected_field(&field_name));
            }
            None => {
                let value = field.text().await?;
                form.fields.insert(field_name, value);
            }
        }
    }

    Ok(form)
}

fn unexpected_field(name: &str) -> HttpAppError {
    AppError::InvalidInput(format!("Unexpected field: {}", name)).into()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let form = extract_form(multipart?).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::InvalidInput("Main image was not uploaded".to_string()))?;

    state.validator.validate(&file)?;
    if let Some(overlay) = &form.overlay {
        state.validator.validate(overlay)?;
    }

    let params = TransformParams::from_raw(&form.fields);
    tracing::debug!(
        input_bytes = file.len(),
        input_type = %file.content_type,
        has_overlay = form.overlay.is_some(),
        has_text = params.text.is_some(),
        format = %params.format,
        "Processing image"
    );

    let engine = Arc::clone(&state.engine);
    let rasterizer = Arc::clone(&state.rasterizer);
    let overlay = form.overlay;

    let processed = tokio::task::spawn_blocking(move || -> Result<ProcessedImage, HttpAppError> {
        let text_layer = params
            .text
            .as_deref()
            .map(|text| {
                rasterizer.rasterize(text, params.text_color.as_deref(), params.text_size)
            })
            .transpose()?;

        let pipeline = PipelineBuilder::build(&params, text_layer, overlay);
        tracing::debug!(steps = ?pipeline.step_names(), "Built pipeline");

        Ok(PipelineExecutor::execute(engine.as_ref(), &file, &pipeline)?)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to spawn blocking task");
        AppError::Internal(e.to_string())
    })??;

    tracing::info!(
        output_bytes = processed.len(),
        content_type = %processed.content_type(),
        "Image processed"
    );

    let content_disposition = format!("attachment; filename=\"{}\"", processed.file_name());
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, processed.content_type())
        .header(header::CONTENT_DISPOSITION, content_disposition)
        .header(header::CONTENT_LENGTH, processed.len())
        .body(Body::from(processed.data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            AppError::Internal(e.to_string()).into()
        })
}
