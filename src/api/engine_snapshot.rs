use serde::{Deserialize, Serialize};

use crate::core::{
    AlignmentMode, ManualTransform, SliceCursor, SpatialRelation, TargetMaskState, Viewport,
    VolumeDescriptor,
};
use crate::error::{ViewerError, ViewerResult};
use crate::interaction::SpatialRotation;
use crate::render::Renderer;

use super::{ImageVariant, RegistrationState, ViewState, ViewerEngine};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSnapshot {
    pub viewport: Viewport,
    pub source: VolumeDescriptor,
    pub source_has_mask: bool,
    pub target: VolumeDescriptor,
    pub target_masks: TargetMaskState,
    pub cursor: SliceCursor,
    pub alignment: AlignmentMode,
    pub transform: ManualTransform,
    pub registration: RegistrationState,
    pub view: ViewState,
    pub spatial: Option<SpatialRelation>,
    pub spatial_rotation: SpatialRotation,
    /// Variants that currently hold an image.
    pub images: Vec<ImageVariant>,
}

impl<R: Renderer> ViewerEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> ViewerSnapshot {
        let state = &self.state;
        let images = [
            ImageVariant::Source,
            ImageVariant::TargetAligned,
            ImageVariant::TargetOriginal,
            ImageVariant::TargetTransformed,
        ]
        .into_iter()
        .filter(|variant| state.images.get(*variant).is_some())
        .collect();

        ViewerSnapshot {
            viewport: self.config.viewport,
            source: state.source,
            source_has_mask: state.source_has_mask,
            target: state.target,
            target_masks: state.target_masks,
            cursor: state.cursor,
            alignment: state.alignment,
            transform: state.transform,
            registration: state.registration,
            view: state.view,
            spatial: state.spatial,
            spatial_rotation: state.spatial_rotation,
            images,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ViewerResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ViewerError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
