//! Shared test harness: builds the real router around a counting engine.

pub mod fixtures;

use axum_test::TestServer;
use bytes::Bytes;
use image::DynamicImage;
use retouch_api::{build_router, AppState};
use retouch_core::Config;
use retouch_processing::{
    EngineError, ImageAsset, ImageEngine, RasterEngine, SvgTextRasterizer, TransformStep,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Public-domain Tuffy face shared with the processing crate's tests
const FIXTURE_FONTS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../retouch-processing/tests/fixtures/fonts"
);

/// Delegates to `RasterEngine` and counts every call
#[derive(Default)]
pub struct CountingEngine {
    inner: RasterEngine,
    calls: AtomicUsize,
}

impl CountingEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl ImageEngine for CountingEngine {
    fn decode(&self, input: &ImageAsset) -> Result<DynamicImage, EngineError> {
        self.record();
        self.inner.decode(input)
    }

    fn apply(&self, img: DynamicImage, step: &TransformStep) -> Result<DynamicImage, EngineError> {
        self.record();
        self.inner.apply(img, step)
    }

    fn encode(&self, img: &DynamicImage, format: &str) -> Result<Bytes, EngineError> {
        self.record();
        self.inner.encode(img, format)
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub engine: Arc<CountingEngine>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_config(Config::default())
}

pub fn setup_test_app_with_config(config: Config) -> TestApp {
    let engine = Arc::new(CountingEngine::default());
    let rasterizer = Arc::new(SvgTextRasterizer::new(Some(Path::new(FIXTURE_FONTS))));
    let state = Arc::new(AppState::with_components(
        config,
        engine.clone(),
        rasterizer,
    ));

    let app = build_router(state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, engine }
}
