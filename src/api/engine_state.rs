use serde::{Deserialize, Serialize};

use crate::core::{
    AlignmentMode, DisplayDirection, ManualTransform, RegistrationDirection, SliceCursor,
    SpatialRelation, TargetMaskState, VolumeDescriptor, VolumeSide,
};
use crate::interaction::{InteractionState, SpatialRotation};

use super::{ImageSet, ViewState, ViewerEngineConfig};

/// Registration request settings and the outcome of the last job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationState {
    pub direction: RegistrationDirection,
    pub subpixel_factor: u32,
    /// Orientation the aligned target is fetched in.
    pub display_direction: DisplayDirection,
    pub done: bool,
    /// Settings were edited after a finished registration.
    pub settings_changed: bool,
}

impl RegistrationState {
    #[must_use]
    pub fn new(direction: RegistrationDirection, subpixel_factor: u32) -> Self {
        Self {
            direction,
            subpixel_factor,
            display_direction: direction.display_direction().unwrap_or_default(),
            done: false,
            settings_changed: false,
        }
    }
}

/// Single mutable state owned by `ViewerEngine`.
#[derive(Debug, Clone)]
pub(crate) struct ViewerState {
    pub(crate) source: VolumeDescriptor,
    pub(crate) source_has_mask: bool,
    pub(crate) target: VolumeDescriptor,
    pub(crate) target_masks: TargetMaskState,
    pub(crate) cursor: SliceCursor,
    pub(crate) alignment: AlignmentMode,
    pub(crate) transform: ManualTransform,
    pub(crate) registration: RegistrationState,
    pub(crate) view: ViewState,
    pub(crate) images: ImageSet,
    pub(crate) spatial: Option<SpatialRelation>,
    pub(crate) spatial_rotation: SpatialRotation,
    pub(crate) interaction: InteractionState,
    pub(crate) next_nonce: u64,
}

impl ViewerState {
    pub(crate) fn new(config: &ViewerEngineConfig) -> Self {
        Self {
            source: VolumeDescriptor::unloaded(),
            source_has_mask: false,
            target: VolumeDescriptor::unloaded(),
            target_masks: TargetMaskState::default(),
            cursor: SliceCursor::default(),
            alignment: AlignmentMode::Auto,
            transform: ManualTransform::default(),
            registration: RegistrationState::new(
                config.registration_direction,
                config.subpixel_factor,
            ),
            view: ViewState {
                render_mode: config.render_mode,
                curtain_position: config.curtain_position,
                curtain_direction: config.curtain_direction,
                blend: config.blend,
                zoom: config.zoom,
                ..ViewState::default()
            },
            images: ImageSet::default(),
            spatial: None,
            spatial_rotation: config.initial_spatial_rotation,
            interaction: InteractionState::default(),
            next_nonce: 1,
        }
    }

    pub(crate) fn volume(&self, side: VolumeSide) -> &VolumeDescriptor {
        match side {
            VolumeSide::Source => &self.source,
            VolumeSide::Target => &self.target,
        }
    }

    pub(crate) fn volume_mut(&mut self, side: VolumeSide) -> &mut VolumeDescriptor {
        match side {
            VolumeSide::Source => &mut self.source,
            VolumeSide::Target => &mut self.target,
        }
    }

    pub(crate) fn both_loaded(&self) -> bool {
        self.source.is_loaded() && self.target.is_loaded()
    }

    /// Cache-busting token, unique per raster request.
    pub(crate) fn take_nonce(&mut self) -> u64 {
        let nonce = self.next_nonce;
        self.next_nonce = self.next_nonce.wrapping_add(1);
        nonce
    }
}
