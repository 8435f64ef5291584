use std::io::Cursor;

use volume_compare::ViewerError;
use volume_compare::api::{
    FetchScope, ImageSet, RenderMode, ViewerEngine, ViewerEngineConfig,
};
use volume_compare::core::{AlignmentMode, Viewport, VolumeGeometry, VolumeSide};
use volume_compare::render::{
    ClipRect, Color, ImageLayer, ImagePrimitive, NullRenderer, RasterImage, RenderFrame,
    Renderer, TextHAlign,
};

fn image(width: u32, height: u32) -> RasterImage {
    RasterImage::filled(width, height, [200, 10, 10, 255])
}

fn engine() -> ViewerEngine<NullRenderer> {
    let config = ViewerEngineConfig::new(Viewport::new(800, 600));
    ViewerEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn curtain_frame_draws_both_images_and_the_divider_handle() {
    let mut engine = engine();
    engine.apply_fetched_images(
        FetchScope::All,
        ImageSet {
            source: Some(image(400, 300)),
            target_aligned: Some(image(400, 300)),
            ..ImageSet::default()
        },
    );

    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.images.len(), 2);
    assert_eq!(frame.images[0].layer, ImageLayer::Source);
    assert_eq!(frame.images[1].layer, ImageLayer::Target);
    assert_eq!(frame.images[0].clip, ClipRect::new(0.0, 0.0, 400.0, 600.0));
    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "↔");
    assert_eq!(frame.texts[0].h_align, TextHAlign::Center);

    engine.render().expect("render");
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_image_count, 2);
}

#[test]
fn blend_frame_has_no_divider() {
    let mut engine = engine();
    engine.apply_fetched_images(
        FetchScope::All,
        ImageSet {
            source: Some(image(400, 300)),
            target_aligned: Some(image(400, 300)),
            ..ImageSet::default()
        },
    );
    engine.set_render_mode(RenderMode::Blend);
    engine.set_blend(0.25).expect("blend");

    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.rects.is_empty());
    assert!((frame.images[0].opacity - 0.75).abs() < 1e-12);
    assert!((frame.images[1].opacity - 0.25).abs() < 1e-12);
}

#[test]
fn original_alignment_overlays_the_native_target_on_the_source_grid() {
    let mut engine = engine();
    engine
        .apply_volume_loaded(
            VolumeSide::Source,
            VolumeGeometry {
                slices: 10,
                size: [400, 300],
                origin: [0.0, 0.0, 0.0],
                spacing: [1.0, 1.0, 1.0],
                echos: 1,
            },
        )
        .expect("load source");
    engine
        .apply_volume_loaded(
            VolumeSide::Target,
            VolumeGeometry {
                slices: 10,
                size: [100, 75],
                origin: [50.0, 0.0, 0.0],
                spacing: [2.0, 2.0, 1.0],
                echos: 1,
            },
        )
        .expect("load target");
    engine.set_alignment_mode(AlignmentMode::Original);
    engine.apply_fetched_images(
        FetchScope::All,
        ImageSet {
            source: Some(image(400, 300)),
            target_original: Some(image(100, 75)),
            ..ImageSet::default()
        },
    );

    let frame = engine.build_render_frame().expect("frame");
    let target = &frame.images[1];
    assert!((target.x - 100.0).abs() < 1e-9);
    assert!((target.width - 400.0).abs() < 1e-9);
    assert!((target.height - 300.0).abs() < 1e-9);

    engine.set_render_mode(RenderMode::Target);
    let frame = engine.build_render_frame().expect("frame");
    assert!((frame.images[1].x).abs() < 1e-9);
    assert!((frame.images[1].width - 800.0).abs() < 1e-9);
}

#[test]
fn empty_engine_renders_an_empty_frame() {
    let mut engine = engine();
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.is_empty());
    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
}

#[test]
fn null_renderer_rejects_invalid_primitives() {
    let mut renderer = NullRenderer::default();
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_image(ImagePrimitive {
        layer: ImageLayer::Source,
        image: image(10, 10),
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
        clip: ClipRect::new(0.0, 0.0, 10.0, 10.0),
        opacity: 1.5,
    });
    let err = renderer.render(&frame).expect_err("opacity out of range");
    assert!(matches!(err, ViewerError::InvalidData(_)));
    assert_eq!(renderer.frames_rendered, 0);

    assert!(Color::rgba(1.0, 1.0, 1.0, 2.0).validate().is_err());
}

#[test]
fn raster_decode_reads_png_and_rejects_garbage() {
    let pixels = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    let mut bytes = Cursor::new(Vec::new());
    pixels
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");

    let decoded = RasterImage::decode(bytes.get_ref()).expect("decode png");
    assert_eq!((decoded.width(), decoded.height()), (3, 2));
    assert_eq!(decoded.pixels().get_pixel(2, 1).0, [1, 2, 3, 255]);

    let shared = decoded.clone();
    assert!(shared.shares_pixels_with(&decoded));

    let err = RasterImage::decode(b"not an image").expect_err("garbage");
    assert!(matches!(err, ViewerError::ImageDecode(_)));
}
