use retouch_core::Config;
use retouch_processing::{
    ImageEngine, RasterEngine, SvgTextRasterizer, TextRasterizer, UploadValidator,
};
use std::path::Path;
use std::sync::Arc;

/// Shared, read-only per-process state. Nothing here changes between requests.
pub struct AppState {
    pub config: Config,
    pub engine: Arc<dyn ImageEngine>,
    pub rasterizer: Arc<dyn TextRasterizer>,
    pub validator: UploadValidator,
}

impl AppState {
    /// Production wiring: raster engine plus an SVG rasterizer over system fonts.
    pub fn new(config: Config) -> Self {
        let rasterizer = SvgTextRasterizer::new(config.fonts_dir.as_deref().map(Path::new));
        Self::with_components(config, Arc::new(RasterEngine::new()), Arc::new(rasterizer))
    }

    pub fn with_components(
        config: Config,
        engine: Arc<dyn ImageEngine>,
        rasterizer: Arc<dyn TextRasterizer>,
    ) -> Self {
        let validator = UploadValidator::new(config.max_file_size_bytes);
        Self {
            config,
            engine,
            rasterizer,
            validator,
        }
    }
}
