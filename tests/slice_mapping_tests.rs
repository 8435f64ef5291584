use proptest::prelude::*;
use volume_compare::api::{ViewerEngine, ViewerEngineConfig};
use volume_compare::core::{
    AlignmentMode, SliceCursor, Viewport, VolumeDescriptor, VolumeGeometry, VolumeSide,
    map_slice_index,
};
use volume_compare::render::NullRenderer;

fn volume(slices: usize, origin_z: f64, spacing_z: f64) -> VolumeDescriptor {
    VolumeDescriptor::from_geometry(geometry(slices, origin_z, spacing_z), 0)
}

fn geometry(slices: usize, origin_z: f64, spacing_z: f64) -> VolumeGeometry {
    VolumeGeometry {
        slices,
        size: [64, 64],
        origin: [0.0, 0.0, origin_z],
        spacing: [1.0, 1.0, spacing_z],
        echos: 1,
    }
}

#[test]
fn source_slice_maps_to_nearest_target_plane() {
    let source = volume(50, 0.0, 2.0);
    let target = volume(30, 10.0, 3.0);

    assert_eq!(map_slice_index(20, &source, &target), Some(10));
    assert_eq!(map_slice_index(10, &target, &source), Some(20));
}

#[test]
fn mapping_clamps_into_target_range() {
    let source = volume(50, 0.0, 2.0);
    let target = volume(30, 10.0, 3.0);

    assert_eq!(map_slice_index(0, &source, &target), Some(0));
    assert_eq!(map_slice_index(49, &source, &target), Some(29));
}

#[test]
fn mapping_is_skipped_when_a_side_is_unloaded() {
    let loaded = volume(50, 0.0, 2.0);
    let unloaded = VolumeDescriptor::unloaded();

    assert_eq!(map_slice_index(3, &loaded, &unloaded), None);
    assert_eq!(map_slice_index(3, &unloaded, &loaded), None);
}

#[test]
fn cursor_sync_only_couples_in_auto_mode() {
    let source = volume(50, 0.0, 2.0);
    let target = volume(30, 10.0, 3.0);
    let mut cursor = SliceCursor {
        source: 20,
        target: 0,
    };

    assert_eq!(
        cursor.sync_from(VolumeSide::Source, AlignmentMode::Original, &source, &target),
        None
    );
    assert_eq!(cursor.target, 0);

    assert_eq!(
        cursor.sync_from(VolumeSide::Source, AlignmentMode::Auto, &source, &target),
        Some(10)
    );
    assert_eq!(cursor.target, 10);
}

#[test]
fn engine_slider_drives_the_other_cursor_in_auto_mode() {
    let config = ViewerEngineConfig::new(Viewport::new(800, 600));
    let mut engine = ViewerEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .apply_volume_loaded(VolumeSide::Source, geometry(50, 0.0, 2.0))
        .expect("load source");
    engine
        .apply_volume_loaded(VolumeSide::Target, geometry(30, 10.0, 3.0))
        .expect("load target");

    assert!(engine.set_slice(VolumeSide::Source, 20));
    assert_eq!(engine.slice_index(VolumeSide::Target), 10);

    assert!(engine.set_slice(VolumeSide::Target, 0));
    assert_eq!(engine.slice_index(VolumeSide::Source), 5);

    assert!(engine.set_alignment_mode(AlignmentMode::Original));
    assert!(engine.set_slice(VolumeSide::Source, 40));
    assert_eq!(engine.slice_index(VolumeSide::Target), 0);
}

#[test]
fn engine_slider_clamps_and_ignores_no_op_moves() {
    let config = ViewerEngineConfig::new(Viewport::new(800, 600));
    let mut engine = ViewerEngine::new(NullRenderer::default(), config).expect("engine init");

    assert!(!engine.set_slice(VolumeSide::Source, 3));

    engine
        .apply_volume_loaded(VolumeSide::Source, geometry(10, 0.0, 1.0))
        .expect("load source");
    assert_eq!(engine.slice_index(VolumeSide::Source), 5);

    assert!(engine.set_slice(VolumeSide::Source, 99));
    assert_eq!(engine.slice_index(VolumeSide::Source), 9);
    assert!(!engine.set_slice(VolumeSide::Source, 120));

    assert!(engine.step_slice(VolumeSide::Source, -20));
    assert_eq!(engine.slice_index(VolumeSide::Source), 0);
    assert_eq!(engine.slice_label(VolumeSide::Source), "1 / 10");
}

proptest! {
    #[test]
    fn mapped_plane_is_within_half_a_slice_when_inside_range(
        source_slices in 2usize..200,
        source_spacing in 0.2f64..5.0,
        target_slices in 2usize..200,
        target_origin in -50.0f64..50.0,
        target_spacing in 0.2f64..5.0,
        index_factor in 0.0f64..1.0
    ) {
        let source = volume(source_slices, 0.0, source_spacing);
        let target = volume(target_slices, target_origin, target_spacing);
        let index = ((source_slices - 1) as f64 * index_factor) as usize;

        let mapped = map_slice_index(index, &source, &target).expect("both loaded");
        prop_assert!(mapped < target_slices);

        let source_z = source.slice_z(index);
        let first = target.slice_z(0);
        let last = target.slice_z(target_slices - 1);
        if source_z >= first && source_z <= last {
            prop_assert!((target.slice_z(mapped) - source_z).abs() <= target_spacing / 2.0 + 1e-9);
        }
    }

    #[test]
    fn round_trip_stays_within_one_of_the_formula(
        slices_a in 2usize..120,
        spacing_a in 0.5f64..4.0,
        slices_b in 2usize..120,
        origin_b in -20.0f64..20.0,
        spacing_b in 0.5f64..4.0,
        index_factor in 0.0f64..1.0
    ) {
        let a = volume(slices_a, 0.0, spacing_a);
        let b = volume(slices_b, origin_b, spacing_b);
        let index = ((slices_b - 1) as f64 * index_factor) as usize;

        let to_a = map_slice_index(index, &b, &a).expect("both loaded");
        let back = map_slice_index(to_a, &a, &b).expect("both loaded");

        let direct = ((a.slice_z(to_a) - b.origin[2]) / spacing_b).round();
        let direct = direct.clamp(0.0, (slices_b - 1) as f64) as usize;
        prop_assert!(back.abs_diff(direct) <= 1);
    }
}
