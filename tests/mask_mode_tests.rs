use volume_compare::api::{ViewerEngine, ViewerEngineConfig};
use volume_compare::core::{
    DisplayDirection, MaskDisplayMode, MaskQuery, TargetMaskState, Viewport, VolumeGeometry,
    VolumeSide,
};
use volume_compare::render::NullRenderer;

fn geometry(slices: usize) -> VolumeGeometry {
    VolumeGeometry {
        slices,
        size: [32, 32],
        origin: [0.0, 0.0, 0.0],
        spacing: [1.0, 1.0, 1.0],
        echos: 1,
    }
}

#[test]
fn unsupported_modes_are_refused() {
    let mut masks = TargetMaskState::default();
    assert!(!masks.select(MaskDisplayMode::Registered));
    assert!(!masks.select(MaskDisplayMode::Custom));
    assert!(masks.select(MaskDisplayMode::Off));
    assert_eq!(masks.mode(), MaskDisplayMode::Off);
}

#[test]
fn losing_the_registered_mask_demotes_to_custom_then_off() {
    let mut masks = TargetMaskState::default();
    masks.set_availability(true, true);
    assert!(masks.select(MaskDisplayMode::Registered));

    masks.set_registered_available(false);
    assert_eq!(masks.mode(), MaskDisplayMode::Custom);

    masks.set_custom_available(false);
    assert_eq!(masks.mode(), MaskDisplayMode::Off);
}

#[test]
fn losing_the_custom_mask_demotes_to_registered() {
    let mut masks = TargetMaskState::default();
    masks.on_custom_mask_loaded();
    masks.on_registration_done();
    assert_eq!(masks.mode(), MaskDisplayMode::Custom);

    masks.set_custom_available(false);
    assert_eq!(masks.mode(), MaskDisplayMode::Registered);
}

#[test]
fn registration_shows_its_mask_only_when_nothing_is_selected() {
    let mut masks = TargetMaskState::default();
    masks.on_registration_done();
    assert_eq!(masks.mode(), MaskDisplayMode::Registered);
    assert_eq!(masks.query(), MaskQuery::with_mode(MaskDisplayMode::Registered));

    masks.select(MaskDisplayMode::Off);
    assert_eq!(masks.query(), MaskQuery::HIDDEN);
}

#[test]
fn native_grid_query_prefers_the_custom_mask_regardless_of_mode() {
    let mut masks = TargetMaskState::default();
    assert_eq!(masks.native_grid_query(), MaskQuery::HIDDEN);

    masks.set_availability(true, false);
    assert_eq!(
        masks.native_grid_query(),
        MaskQuery::with_mode(MaskDisplayMode::Registered)
    );

    masks.set_availability(true, true);
    masks.select(MaskDisplayMode::Off);
    assert_eq!(
        masks.native_grid_query(),
        MaskQuery::with_mode(MaskDisplayMode::Custom)
    );
}

#[test]
fn reloading_the_target_clears_its_masks() {
    let config = ViewerEngineConfig::new(Viewport::new(640, 480));
    let mut engine = ViewerEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .apply_volume_loaded(VolumeSide::Source, geometry(20))
        .expect("load source");
    engine
        .apply_volume_loaded(VolumeSide::Target, geometry(20))
        .expect("load target");

    engine.apply_mask_loaded(VolumeSide::Source);
    engine.apply_mask_loaded(VolumeSide::Target);
    engine.apply_registration_done(Some(DisplayDirection::Reverse));
    assert!(engine.source_has_mask());
    assert_eq!(engine.target_masks().mode(), MaskDisplayMode::Custom);
    assert!(engine.set_target_mask_mode(MaskDisplayMode::Registered));

    let visibility = engine.control_visibility();
    assert!(visibility.registered_mask_mode);
    assert!(visibility.custom_mask_mode);
    assert!(visibility.export_mask);

    engine
        .apply_volume_loaded(VolumeSide::Target, geometry(20))
        .expect("reload target");
    assert_eq!(engine.target_masks(), TargetMaskState::default());
    assert!(engine.source_has_mask());
    assert!(!engine.control_visibility().target_mask_modes);
}
