use approx::assert_relative_eq;
use proptest::prelude::*;
use volume_compare::api::{
    CompositionInput, CompositionLayout, CurtainDirection, FetchScope, ImageSet,
    NativeGridOverlay, PointerEffect, RenderMode, ViewComposition, ViewState, ViewerEngine,
    ViewerEngineConfig, compose_view, curtain_position_at, fit_scale, pan_limit,
};
use volume_compare::core::{PixelOffset, Viewport, VolumeDescriptor, VolumeGeometry};
use volume_compare::interaction::{CursorStyle, InteractionMode};
use volume_compare::render::{ClipRect, NullRenderer, RasterImage};

fn image(width: u32, height: u32) -> RasterImage {
    RasterImage::filled(width, height, [120, 120, 120, 255])
}

fn compose(
    container: Viewport,
    view: &ViewState,
    source: Option<&RasterImage>,
    target: Option<&RasterImage>,
) -> ViewComposition {
    compose_view(&CompositionInput {
        container,
        view,
        source,
        target,
        overlay: None,
        split_gap_px: 24.0,
        pan_dragging: false,
    })
}

fn engine_with_images(source: RasterImage, target: RasterImage) -> ViewerEngine<NullRenderer> {
    let config = ViewerEngineConfig::new(Viewport::new(800, 600));
    let mut engine = ViewerEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.apply_fetched_images(
        FetchScope::All,
        ImageSet {
            source: Some(source),
            target_aligned: Some(target),
            target_original: None,
            target_transformed: None,
        },
    );
    engine
}

#[test]
fn fit_scale_uses_the_tighter_axis() {
    let container = Viewport::new(800, 600);
    assert_relative_eq!(fit_scale(container, 400, 100, 1.0), 2.0);
    assert_relative_eq!(fit_scale(container, 100, 300, 1.0), 2.0);
    assert_relative_eq!(fit_scale(container, 400, 300, 1.5), 3.0);
}

#[test]
fn fitted_image_cannot_pan() {
    let source = image(400, 300);
    let view = ViewState {
        pan: PixelOffset::new(50.0, -50.0),
        ..ViewState::default()
    };
    let composition = compose(Viewport::new(800, 600), &view, Some(&source), None);

    assert_eq!(composition.pan_limit, PixelOffset::zero());
    assert_eq!(composition.pan, PixelOffset::zero());
    assert!(!composition.can_pan());
    assert_eq!(composition.cursor, CursorStyle::Default);
    assert_eq!(
        composition.layout,
        CompositionLayout::Shared {
            canvas: ClipRect::new(0.0, 0.0, 800.0, 600.0),
            display_scale: 2.0,
        }
    );
}

#[test]
fn zoomed_pan_is_clamped_to_half_the_overflow() {
    let source = image(400, 300);
    let view = ViewState {
        zoom: 2.0,
        pan: PixelOffset::new(1_000.0, -1_000.0),
        ..ViewState::default()
    };
    let composition = compose(Viewport::new(800, 600), &view, Some(&source), None);

    assert_eq!(composition.pan_limit, PixelOffset::new(400.0, 300.0));
    assert_eq!(composition.pan, PixelOffset::new(400.0, -300.0));
    assert_eq!(composition.cursor, CursorStyle::Grab);

    let placement = composition.source.expect("source placement");
    assert_relative_eq!(placement.x, 0.0);
    assert_relative_eq!(placement.y, -600.0);
    assert_relative_eq!(placement.width, 1_600.0);
}

#[test]
fn curtain_drag_to_three_quarters_splits_the_clips() {
    let mut engine = engine_with_images(image(400, 300), image(400, 300));

    assert!(engine.curtain_drag_start());
    assert_eq!(engine.pointer_move(600.0, 300.0), PointerEffect::View);
    assert_eq!(engine.pointer_up(), InteractionMode::CurtainDrag);
    assert_relative_eq!(engine.view_state().curtain_position, 0.75);

    let composition = engine.compose();
    let source = composition.source.expect("source placement");
    let target = composition.target.expect("target placement");
    assert_eq!(source.clip, ClipRect::new(0.0, 0.0, 600.0, 600.0));
    assert_eq!(target.clip, ClipRect::new(600.0, 0.0, 200.0, 600.0));
    assert_relative_eq!(source.opacity, 1.0);
    assert_relative_eq!(target.opacity, 1.0);

    let divider = composition.divider.expect("curtain divider");
    assert_relative_eq!(divider.bar.x, 598.5);
    assert_relative_eq!(divider.bar.width, 3.0);
    assert_eq!(divider.cursor(), CursorStyle::EwResize);
}

#[test]
fn curtain_position_is_clamped_to_the_container() {
    let container = Viewport::new(800, 600);
    assert_relative_eq!(
        curtain_position_at(container, CurtainDirection::Horizontal, -50.0, 10.0),
        0.0
    );
    assert_relative_eq!(
        curtain_position_at(container, CurtainDirection::Horizontal, 900.0, 10.0),
        1.0
    );
    assert_relative_eq!(
        curtain_position_at(container, CurtainDirection::Vertical, 10.0, 150.0),
        0.25
    );
}

#[test]
fn vertical_curtain_splits_along_y() {
    let source = image(400, 300);
    let target = image(400, 300);
    let view = ViewState {
        curtain_direction: CurtainDirection::Vertical,
        curtain_position: 0.25,
        ..ViewState::default()
    };
    let composition = compose(Viewport::new(800, 600), &view, Some(&source), Some(&target));

    assert_eq!(
        composition.source.expect("source").clip,
        ClipRect::new(0.0, 0.0, 800.0, 150.0)
    );
    assert_eq!(
        composition.target.expect("target").clip,
        ClipRect::new(0.0, 150.0, 800.0, 450.0)
    );
    let divider = composition.divider.expect("divider");
    assert_eq!(divider.cursor(), CursorStyle::NsResize);
    assert_eq!(divider.glyph(), "↕");
}

#[test]
fn blend_and_single_modes_set_opacities() {
    let source = image(400, 300);
    let target = image(400, 300);
    let container = Viewport::new(800, 600);

    let blend = ViewState {
        render_mode: RenderMode::Blend,
        blend: 0.3,
        ..ViewState::default()
    };
    let composition = compose(container, &blend, Some(&source), Some(&target));
    assert_relative_eq!(composition.source.expect("source").opacity, 0.7);
    assert_relative_eq!(composition.target.expect("target").opacity, 0.3);
    assert!(composition.divider.is_none());

    let source_only = ViewState {
        render_mode: RenderMode::Source,
        ..ViewState::default()
    };
    let composition = compose(container, &source_only, Some(&source), Some(&target));
    assert_relative_eq!(composition.source.expect("source").opacity, 1.0);
    assert_relative_eq!(composition.target.expect("target").opacity, 0.0);

    let target_only = ViewState {
        render_mode: RenderMode::Target,
        ..ViewState::default()
    };
    let composition = compose(container, &target_only, Some(&source), Some(&target));
    assert_relative_eq!(composition.source.expect("source").opacity, 0.0);
    assert_relative_eq!(composition.target.expect("target").opacity, 1.0);
}

#[test]
fn target_mode_fits_the_target_image() {
    let source = image(400, 300);
    let target = image(200, 100);
    let view = ViewState {
        render_mode: RenderMode::Target,
        ..ViewState::default()
    };
    let composition = compose(Viewport::new(800, 600), &view, Some(&source), Some(&target));

    let CompositionLayout::Shared {
        canvas,
        display_scale,
    } = composition.layout
    else {
        panic!("expected shared layout");
    };
    assert_relative_eq!(display_scale, 4.0);
    assert_eq!(canvas, ClipRect::new(0.0, 100.0, 800.0, 400.0));
}

#[test]
fn split_mode_fits_each_pane_and_uses_the_tighter_pan_limit() {
    let source = image(400, 200);
    let target = image(200, 200);
    let container = Viewport::new(824, 400);

    let view = ViewState {
        render_mode: RenderMode::Split,
        ..ViewState::default()
    };
    let composition = compose(container, &view, Some(&source), Some(&target));
    assert_eq!(
        composition.layout,
        CompositionLayout::Split {
            source_pane: ClipRect::new(0.0, 0.0, 400.0, 400.0),
            target_pane: ClipRect::new(424.0, 0.0, 400.0, 400.0),
        }
    );
    let source_placement = composition.source.expect("source");
    assert_relative_eq!(source_placement.y, 100.0);
    assert_relative_eq!(source_placement.height, 200.0);
    let target_placement = composition.target.expect("target");
    assert_relative_eq!(target_placement.x, 424.0);
    assert_relative_eq!(target_placement.width, 400.0);
    assert!(composition.divider.is_none());

    let zoomed = ViewState {
        zoom: 2.0,
        pan: PixelOffset::new(500.0, 500.0),
        ..view
    };
    let composition = compose(container, &zoomed, Some(&source), Some(&target));
    assert_eq!(composition.pan_limit, PixelOffset::new(200.0, 0.0));
    assert_eq!(composition.pan, PixelOffset::new(200.0, 0.0));
}

#[test]
fn native_grid_overlay_places_target_in_source_pixels() {
    let source_volume = VolumeDescriptor::from_geometry(
        VolumeGeometry {
            slices: 10,
            size: [400, 300],
            origin: [0.0, 0.0, 0.0],
            spacing: [1.0, 1.0, 1.0],
            echos: 1,
        },
        0,
    );
    let target_volume = VolumeDescriptor::from_geometry(
        VolumeGeometry {
            slices: 10,
            size: [100, 100],
            origin: [10.0, 20.0, 0.0],
            spacing: [2.0, 2.0, 2.0],
            echos: 1,
        },
        0,
    );
    let overlay = NativeGridOverlay::between(&source_volume, &target_volume);
    assert_eq!(overlay.offset_px, [10.0, 20.0]);
    assert_eq!(overlay.scale, [2.0, 2.0]);

    let source = image(400, 300);
    let target = image(100, 100);
    let view = ViewState::default();
    let composition = compose_view(&CompositionInput {
        container: Viewport::new(800, 600),
        view: &view,
        source: Some(&source),
        target: Some(&target),
        overlay: Some(overlay),
        split_gap_px: 24.0,
        pan_dragging: false,
    });

    let placement = composition.target.expect("target placement");
    assert_relative_eq!(placement.x, 20.0);
    assert_relative_eq!(placement.y, 40.0);
    assert_relative_eq!(placement.width, 400.0);
    assert_relative_eq!(placement.height, 400.0);
}

#[test]
fn no_images_compose_to_an_empty_layout() {
    let view = ViewState::default();
    let composition = compose(Viewport::new(800, 600), &view, None, None);
    assert_eq!(composition.layout, CompositionLayout::Empty);
    assert!(composition.source.is_none());
    assert!(composition.target.is_none());
    assert!(composition.divider.is_none());
}

#[test]
fn engine_pan_gesture_is_clamped_and_switches_cursor() {
    let mut engine = engine_with_images(image(400, 300), image(400, 300));
    engine.set_zoom(2.0).expect("zoom");

    assert!(!engine.pan_start(0.0, 0.0));
    engine.compose();
    assert!(engine.can_pan());
    assert!(engine.pan_start(0.0, 0.0));
    assert_eq!(engine.compose().cursor, CursorStyle::Grabbing);

    assert_eq!(engine.pointer_move(1_000.0, -1_000.0), PointerEffect::View);
    assert_eq!(engine.view_state().pan, PixelOffset::new(400.0, -300.0));
    assert_eq!(engine.pointer_up(), InteractionMode::Panning);
    assert_eq!(engine.compose().cursor, CursorStyle::Grab);

    engine.set_zoom(1.0).expect("zoom");
    engine.compose();
    assert_eq!(engine.view_state().pan, PixelOffset::zero());
    assert!(!engine.can_pan());
}

#[test]
fn curtain_direction_change_recenters_the_curtain() {
    let mut engine = engine_with_images(image(400, 300), image(400, 300));
    engine.set_curtain_position(0.9).expect("position");
    engine.set_curtain_direction(CurtainDirection::Vertical);
    assert_relative_eq!(engine.view_state().curtain_position, 0.5);
    assert!(engine.set_curtain_position(1.5).is_err());
    assert!(engine.set_blend(f64::NAN).is_err());
    assert!(engine.set_zoom(0.0).is_err());
}

proptest! {
    #[test]
    fn clamped_pan_never_exceeds_the_limit(
        zoom in 0.25f64..8.0,
        pan_x in -5_000.0f64..5_000.0,
        pan_y in -5_000.0f64..5_000.0,
        width in 16u32..2_048,
        height in 16u32..2_048
    ) {
        let source = image(width, height);
        let container = Viewport::new(800, 600);
        let view = ViewState {
            zoom,
            pan: PixelOffset::new(pan_x, pan_y),
            ..ViewState::default()
        };
        let composition = compose(container, &view, Some(&source), None);
        let placement = composition.source.expect("source placement");

        prop_assert!(composition.pan.x.abs() <= composition.pan_limit.x);
        prop_assert!(composition.pan.y.abs() <= composition.pan_limit.y);
        prop_assert_eq!(
            composition.pan_limit.x,
            pan_limit(placement.width, 800.0)
        );
        if composition.pan_limit.x > 0.0 {
            prop_assert!(placement.x <= 400.0 + 1.0);
            prop_assert!(placement.x + placement.width >= 400.0 - 1.0);
        }
    }
}
