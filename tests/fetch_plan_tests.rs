use volume_compare::api::{
    FetchScope, ImageSet, ImageVariant, RenderMode, ViewerEngine, ViewerEngineConfig,
};
use volume_compare::core::{
    AlignmentMode, DisplayDirection, MaskDisplayMode, MaskQuery, RegistrationDirection,
    TransformParams, Viewport, VolumeGeometry, VolumeSide,
};
use volume_compare::render::{NullRenderer, RasterImage};

fn geometry(slices: usize, origin_z: f64, spacing_z: f64) -> VolumeGeometry {
    VolumeGeometry {
        slices,
        size: [64, 64],
        origin: [0.0, 0.0, origin_z],
        spacing: [1.0, 1.0, spacing_z],
        echos: 1,
    }
}

fn loaded_engine() -> ViewerEngine<NullRenderer> {
    let config = ViewerEngineConfig::new(Viewport::new(800, 600));
    let mut engine = ViewerEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .apply_volume_loaded(VolumeSide::Source, geometry(50, 0.0, 2.0))
        .expect("load source");
    engine
        .apply_volume_loaded(VolumeSide::Target, geometry(30, 10.0, 3.0))
        .expect("load target");
    engine
}

fn image(shade: u8) -> RasterImage {
    RasterImage::filled(8, 8, [shade, shade, shade, 255])
}

#[test]
fn auto_round_requests_source_aligned_and_original() {
    let mut engine = loaded_engine();
    assert_eq!(engine.slice_index(VolumeSide::Source), 25);
    assert_eq!(engine.slice_index(VolumeSide::Target), 15);

    let plan = engine.plan_fetch(FetchScope::All);

    let source = plan.source.expect("source request");
    assert_eq!(source.slice_index, 25);
    assert_eq!(source.mask, MaskQuery::plain(false));

    let aligned = plan.target_aligned.expect("aligned request");
    assert_eq!(aligned.variant, ImageVariant::TargetAligned);
    assert_eq!(aligned.slice_index, 25);
    assert!(!aligned.reverse);

    let original = plan.target_original.expect("original request");
    assert_eq!(original.slice_index, 13);
    assert!(plan.target_transformed.is_none());

    let nonces: Vec<u64> = plan.requests().map(|request| request.nonce).collect();
    assert_eq!(nonces.len(), 3);
    assert!(nonces.windows(2).all(|pair| pair[0] < pair[1]));

    let next = engine.plan_fetch(FetchScope::All);
    assert!(next.requests().all(|request| request.nonce > nonces[2]));
}

#[test]
fn reverse_direction_mirrors_the_original_index() {
    let mut engine = loaded_engine();
    engine.set_registration_direction(RegistrationDirection::Reverse);

    let plan = engine.plan_fetch(FetchScope::All);
    assert!(plan.target_aligned.expect("aligned").reverse);
    let original = plan.target_original.expect("original");
    assert_eq!(original.slice_index, 16);
    assert!(!original.reverse);
}

#[test]
fn auto_direction_displays_normal_until_a_job_reports() {
    let mut engine = loaded_engine();
    engine.set_registration_direction(RegistrationDirection::Auto);
    assert!(!engine.plan_fetch(FetchScope::All).target_aligned.expect("aligned").reverse);

    engine.apply_registration_done(Some(DisplayDirection::Reverse));
    assert!(engine.plan_fetch(FetchScope::All).target_aligned.expect("aligned").reverse);
}

#[test]
fn split_view_uses_the_target_cursor_for_the_original_image() {
    let mut engine = loaded_engine();
    engine.set_render_mode(RenderMode::Split);
    let plan = engine.plan_fetch(FetchScope::All);
    assert_eq!(plan.target_original.expect("original").slice_index, 15);
}

#[test]
fn active_manual_transform_adds_the_transformed_variant() {
    let mut engine = loaded_engine();
    let params = TransformParams::identity().with_offset([4.0, 0.0, 0.0]);
    assert!(engine.apply_manual_transform(params).switched_to_manual);
    assert!(engine.set_slice(VolumeSide::Target, 7));

    let plan = engine.plan_fetch(FetchScope::All);
    let transformed = plan.target_transformed.expect("transformed request");
    assert_eq!(transformed.slice_index, 7);
    assert_eq!(transformed.transform, Some(engine.manual_transform().applied()));
    assert_eq!(plan.target_original.expect("original").slice_index, 7);

    engine.set_alignment_mode(AlignmentMode::Original);
    assert!(engine.plan_fetch(FetchScope::All).target_transformed.is_none());
}

#[test]
fn original_mode_shows_any_available_mask_on_the_native_grid() {
    let mut engine = loaded_engine();
    engine.apply_mask_loaded(VolumeSide::Target);
    engine.apply_registration_done(None);
    assert!(engine.set_target_mask_mode(MaskDisplayMode::Off));

    let plan = engine.plan_fetch(FetchScope::All);
    assert_eq!(plan.target_original.expect("original").mask, MaskQuery::HIDDEN);

    engine.set_alignment_mode(AlignmentMode::Original);
    let plan = engine.plan_fetch(FetchScope::All);
    assert_eq!(
        plan.target_original.expect("original").mask,
        MaskQuery::with_mode(MaskDisplayMode::Custom)
    );
    assert_eq!(plan.target_aligned.expect("aligned").mask, MaskQuery::HIDDEN);
}

#[test]
fn scoped_rounds_only_cover_their_side() {
    let mut engine = loaded_engine();
    let plan = engine.plan_fetch(FetchScope::Side(VolumeSide::Source));
    assert!(plan.source.is_some());
    assert!(plan.target_aligned.is_none());
    assert!(plan.target_original.is_none());

    let plan = engine.plan_fetch(FetchScope::Side(VolumeSide::Target));
    assert!(plan.source.is_none());
    assert!(plan.target_aligned.is_some());
}

#[test]
fn nothing_loaded_plans_nothing() {
    let config = ViewerEngineConfig::new(Viewport::new(800, 600));
    let mut engine = ViewerEngine::new(NullRenderer::default(), config).expect("engine init");
    assert!(engine.plan_fetch(FetchScope::All).is_empty());
}

#[test]
fn merge_keeps_the_old_source_when_a_source_round_failed() {
    let mut images = ImageSet {
        source: Some(image(10)),
        target_aligned: Some(image(20)),
        target_original: Some(image(30)),
        target_transformed: None,
    };

    images.merge(FetchScope::Side(VolumeSide::Source), ImageSet::default());
    assert_eq!(images.source, Some(image(10)));

    images.merge(
        FetchScope::Side(VolumeSide::Target),
        ImageSet {
            target_original: Some(image(40)),
            ..ImageSet::default()
        },
    );
    assert!(images.target_aligned.is_none());
    assert_eq!(images.target_original, Some(image(40)));
    assert_eq!(images.source, Some(image(10)));

    images.merge(FetchScope::All, ImageSet::default());
    assert!(images.is_empty());
}

#[test]
fn displayed_target_falls_back_to_the_native_grid_image() {
    let images = ImageSet {
        source: None,
        target_aligned: None,
        target_original: Some(image(30)),
        target_transformed: None,
    };
    assert_eq!(images.displayed_target(AlignmentMode::Auto), Some(&image(30)));
    assert_eq!(images.displayed_target(AlignmentMode::Manual), Some(&image(30)));

    let images = ImageSet {
        target_aligned: Some(image(20)),
        target_transformed: Some(image(50)),
        ..images
    };
    assert_eq!(images.displayed_target(AlignmentMode::Auto), Some(&image(20)));
    assert_eq!(images.displayed_target(AlignmentMode::Manual), Some(&image(50)));
    assert_eq!(images.displayed_target(AlignmentMode::Original), Some(&image(30)));
}
