#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use volume_compare::ViewerError;
use volume_compare::api::{FetchScope, ImageSet, RenderMode, ViewerEngine, ViewerEngineConfig};
use volume_compare::core::Viewport;
use volume_compare::render::{CairoRenderer, RasterImage};

fn images() -> ImageSet {
    ImageSet {
        source: Some(RasterImage::filled(64, 48, [255, 0, 0, 255])),
        target_aligned: Some(RasterImage::filled(64, 48, [0, 0, 255, 255])),
        ..ImageSet::default()
    }
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ViewerError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_curtain_images_and_handle() {
    let renderer = CairoRenderer::new(640, 480).expect("renderer");
    let config = ViewerEngineConfig::new(Viewport::new(640, 480));
    let mut engine = ViewerEngine::new(renderer, config).expect("engine init");
    engine.apply_fetched_images(FetchScope::All, images());

    engine.render().expect("render");
    let stats = engine.renderer().last_stats();
    assert_eq!(stats.images_drawn, 2);
    assert_eq!(stats.rects_drawn, 2);
    assert_eq!(stats.texts_drawn, 1);

    engine.set_render_mode(RenderMode::Source);
    engine.render().expect("render source only");
    let stats = engine.into_renderer().last_stats();
    assert_eq!(stats.images_drawn, 1);
    assert_eq!(stats.rects_drawn, 0);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(320, 240).expect("renderer");
    let config = ViewerEngineConfig::new(Viewport::new(320, 240));
    let mut engine = ViewerEngine::new(renderer, config).expect("engine init");
    engine.apply_fetched_images(FetchScope::All, images());

    let surface = ImageSurface::create(Format::ARgb32, 320, 240).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context)
        .expect("render on context");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.last_stats().images_drawn, 2);
}
