mod composition_frame_builder;
mod controls;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_snapshot;
mod engine_state;
mod fetch_plan;
mod json_contract;
mod navigation_controller;
mod registration_controller;
mod spatial_projection;
mod transform_controller;
mod view_composition;
mod view_controller;
mod view_state;
mod volume_controller;

pub use controls::ControlVisibility;
pub use engine::ViewerEngine;
pub use engine_config::ViewerEngineConfig;
pub use engine_snapshot::ViewerSnapshot;
pub use engine_state::RegistrationState;
pub use fetch_plan::{FetchPlan, FetchScope, ImageSet, ImageVariant, RasterRequest};
pub use json_contract::{
    VIEWER_CONFIG_JSON_SCHEMA_V1, VIEWER_SNAPSHOT_JSON_SCHEMA_V1,
    ViewerEngineConfigJsonContractV1, ViewerSnapshotJsonContractV1,
};
pub use spatial_projection::{CUBOID_FACES, SpatialProjector, build_spatial_frame};
pub use transform_controller::TransformOutcome;
pub use view_composition::{
    CURTAIN_DIVIDER_PX, CompositionInput, CompositionLayout, CurtainDivider, ImagePlacement,
    NativeGridOverlay, ViewComposition, clamp_pan, compose_view, curtain_position_at, fit_scale,
    pan_limit,
};
pub use view_controller::PointerEffect;
pub use view_state::{CurtainDirection, RenderMode, ViewState};
