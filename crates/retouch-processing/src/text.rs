//! Text rasterization
//!
//! Text overlays are drawn on a fixed transparent canvas and handed to the
//! pipeline as an ordinary PNG composite layer. The SVG renderer resolves
//! fonts through a database built once at startup.

use crate::asset::ImageAsset;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use usvg::fontdb::Database;

/// Fixed geometry and defaults of the text layer
pub struct TextCanvas;

impl TextCanvas {
    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 150;
    /// Baseline origin of the first glyph
    pub const ORIGIN_X: u32 = 10;
    pub const ORIGIN_Y: u32 = 50;
    pub const DEFAULT_COLOR: &'static str = "#000000";
    pub const DEFAULT_SIZE_PX: f32 = 40.0;
    pub const FONT_FAMILY: &'static str = "Arial";
}

#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    #[error("Failed to build text layer: {0}")]
    Svg(String),

    #[error("Failed to allocate {width}x{height} text canvas")]
    Canvas { width: u32, height: u32 },

    #[error("Failed to encode text layer: {0}")]
    Encode(String),
}

pub trait TextRasterizer: Send + Sync {
    /// Render `text` into a transparent PNG of `TextCanvas` size.
    fn rasterize(
        &self,
        text: &str,
        color: Option<&str>,
        size_px: Option<f32>,
    ) -> Result<ImageAsset, RasterizeError>;
}

pub struct SvgTextRasterizer {
    fontdb: Arc<Database>,
}

impl SvgTextRasterizer {
    /// System fonts plus any `.ttf`/`.otf`/`.ttc` files found in `fonts_dir`.
    pub fn new(fonts_dir: Option<&Path>) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();

        if let Some(dir) = fonts_dir {
            load_fonts_from_dir(&mut db, dir);
        }

        tracing::info!(faces = db.len(), "Loaded font database for text layers");
        Self::with_fontdb(Arc::new(db))
    }

    pub fn with_fontdb(fontdb: Arc<Database>) -> Self {
        Self { fontdb }
    }

    fn svg_document(text: &str, color: &str, size_px: f32) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r#"<text x="{x}" y="{y}" font-family="{family}, sans-serif" font-size="{size}" fill="{fill}">{text}</text>"#,
                "</svg>"
            ),
            w = TextCanvas::WIDTH,
            h = TextCanvas::HEIGHT,
            x = TextCanvas::ORIGIN_X,
            y = TextCanvas::ORIGIN_Y,
            family = TextCanvas::FONT_FAMILY,
            size = size_px,
            fill = escape_xml(color),
            text = escape_xml(text),
        )
    }
}

impl TextRasterizer for SvgTextRasterizer {
    fn rasterize(
        &self,
        text: &str,
        color: Option<&str>,
        size_px: Option<f32>,
    ) -> Result<ImageAsset, RasterizeError> {
        let color = color.unwrap_or(TextCanvas::DEFAULT_COLOR);
        let size_px = size_px
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(TextCanvas::DEFAULT_SIZE_PX);
        let svg = Self::svg_document(text, color, size_px);

        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_family: TextCanvas::FONT_FAMILY.to_string(),
            font_resolver: font_resolver(),
            ..Default::default()
        };
        let tree =
            usvg::Tree::from_str(&svg, &opts).map_err(|e| RasterizeError::Svg(e.to_string()))?;

        let (width, height) = (TextCanvas::WIDTH, TextCanvas::HEIGHT);
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or(RasterizeError::Canvas { width, height })?;
        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let rgba: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let img = RgbaImage::from_raw(width, height, rgba)
            .ok_or(RasterizeError::Canvas { width, height })?;

        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| RasterizeError::Encode(e.to_string()))?;

        tracing::debug!(
            chars = text.chars().count(),
            size_px = size_px,
            png_bytes = buffer.len(),
            "Rasterized text layer"
        );
        Ok(ImageAsset::png(buffer))
    }
}

fn load_fonts_from_dir(db: &mut Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Fonts directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable font file");
        }
    }
}

/// Like usvg's default selector, but falls back through the generic families
/// and then to any loaded face instead of giving up when no serif is installed.
fn font_resolver() -> usvg::FontResolver<'static> {
    use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => Family::Serif,
                    usvg::FontFamily::SansSerif => Family::SansSerif,
                    usvg::FontFamily::Cursive => Family::Cursive,
                    usvg::FontFamily::Fantasy => Family::Fantasy,
                    usvg::FontFamily::Monospace => Family::Monospace,
                    usvg::FontFamily::Named(name) => Family::Name(name),
                })
                .collect();
            families.extend([Family::SansSerif, Family::Serif, Family::Monospace]);

            let stretch = match font.stretch() {
                usvg::FontStretch::UltraCondensed => Stretch::UltraCondensed,
                usvg::FontStretch::ExtraCondensed => Stretch::ExtraCondensed,
                usvg::FontStretch::Condensed => Stretch::Condensed,
                usvg::FontStretch::SemiCondensed => Stretch::SemiCondensed,
                usvg::FontStretch::Normal => Stretch::Normal,
                usvg::FontStretch::SemiExpanded => Stretch::SemiExpanded,
                usvg::FontStretch::Expanded => Stretch::Expanded,
                usvg::FontStretch::ExtraExpanded => Stretch::ExtraExpanded,
                usvg::FontStretch::UltraExpanded => Stretch::UltraExpanded,
            };
            let style = match font.style() {
                usvg::FontStyle::Normal => Style::Normal,
                usvg::FontStyle::Italic => Style::Italic,
                usvg::FontStyle::Oblique => Style::Oblique,
            };

            let query = Query {
                families: &families,
                weight: Weight(font.weight()),
                stretch,
                style,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
