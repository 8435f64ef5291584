use crate::core::{
    AlignmentMode, ManualTransform, SliceCursor, SpatialRelation, TargetMaskState,
    VolumeDescriptor, VolumeSide,
};
use crate::interaction::{InteractionMode, SpatialRotation};
use crate::render::Renderer;

use super::{ImageSet, RegistrationState, ViewState, ViewerEngine};

impl<R: Renderer> ViewerEngine<R> {
    #[must_use]
    pub fn volume(&self, side: VolumeSide) -> &VolumeDescriptor {
        self.state.volume(side)
    }

    #[must_use]
    pub fn source_has_mask(&self) -> bool {
        self.state.source_has_mask
    }

    #[must_use]
    pub fn target_masks(&self) -> TargetMaskState {
        self.state.target_masks
    }

    #[must_use]
    pub fn cursor(&self) -> SliceCursor {
        self.state.cursor
    }

    #[must_use]
    pub fn slice_index(&self, side: VolumeSide) -> usize {
        self.state.cursor.get(side)
    }

    #[must_use]
    pub fn alignment_mode(&self) -> AlignmentMode {
        self.state.alignment
    }

    #[must_use]
    pub fn manual_transform(&self) -> ManualTransform {
        self.state.transform
    }

    #[must_use]
    pub fn registration(&self) -> RegistrationState {
        self.state.registration
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.state.view
    }

    #[must_use]
    pub fn images(&self) -> &ImageSet {
        &self.state.images
    }

    #[must_use]
    pub fn spatial_relation(&self) -> Option<&SpatialRelation> {
        self.state.spatial.as_ref()
    }

    #[must_use]
    pub fn spatial_rotation(&self) -> SpatialRotation {
        self.state.spatial_rotation
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.state.interaction.mode()
    }

    /// Whether the last composition left any pan range.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.state.interaction.can_pan()
    }

    #[must_use]
    pub fn both_volumes_loaded(&self) -> bool {
        self.state.both_loaded()
    }
}
