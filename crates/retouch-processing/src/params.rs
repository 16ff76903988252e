//! Typed transformation parameters
//!
//! Form fields arrive as an untyped string map. `TransformParams::from_raw`
//! turns that map into named optional fields, mapping every absent, empty or
//! malformed value to `None` (or the documented default) instead of failing.

use std::collections::HashMap;

/// Form fields exactly as received, keyed by field name
pub type RawParameters = HashMap<String, String>;

pub const DEFAULT_FORMAT: &str = "png";

/// Crop rectangle in pixels, relative to the (possibly resized) image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<CropRect>,
    pub grayscale: bool,
    pub rotate: Option<f32>,
    pub blur: Option<f32>,
    pub text: Option<String>,
    pub text_color: Option<String>,
    pub text_size: Option<f32>,
    pub text_x: i64,
    pub text_y: i64,
    pub overlay_x: i64,
    pub overlay_y: i64,
    pub format: String,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            crop: None,
            grayscale: false,
            rotate: None,
            blur: None,
            text: None,
            text_color: None,
            text_size: None,
            text_x: 0,
            text_y: 0,
            overlay_x: 0,
            overlay_y: 0,
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl TransformParams {
    pub fn from_raw(raw: &RawParameters) -> Self {
        let field = |name: &str| raw.get(name).map(String::as_str).filter(|v| !v.is_empty());

        let crop = match (
            field("cropLeft").and_then(parse_u32),
            field("cropTop").and_then(parse_u32),
            field("cropWidth").and_then(parse_u32),
            field("cropHeight").and_then(parse_u32),
        ) {
            (Some(left), Some(top), Some(width), Some(height)) => Some(CropRect {
                left,
                top,
                width,
                height,
            }),
            _ => None,
        };

        Self {
            width: field("width").and_then(parse_dimension),
            height: field("height").and_then(parse_dimension),
            crop,
            grayscale: field("grayscale") == Some("true"),
            rotate: field("rotate").and_then(parse_f32),
            blur: field("blur").and_then(parse_f32),
            text: field("text").map(str::to_string),
            text_color: field("textColor").map(str::to_string),
            text_size: field("textSize")
                .and_then(parse_f32)
                .filter(|size| *size > 0.0),
            text_x: field("textX").and_then(parse_i64).unwrap_or(0),
            text_y: field("textY").and_then(parse_i64).unwrap_or(0),
            overlay_x: field("overlayX").and_then(parse_i64).unwrap_or(0),
            overlay_y: field("overlayY").and_then(parse_i64).unwrap_or(0),
            format: field("format").unwrap_or(DEFAULT_FORMAT).to_string(),
        }
    }

    pub fn has_resize(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Zero means "no constraint on this axis", never a zero-sized image.
fn parse_dimension(value: &str) -> Option<u32> {
    parse_u32(value).filter(|v| *v > 0)
}

fn parse_i64(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_f32(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
}
