use serde::{Deserialize, Serialize};

use crate::core::{MaskDisplayMode, VolumeSide};
use crate::render::Renderer;

use super::ViewerEngine;

/// Which host controls make sense for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlVisibility {
    pub source_slider: bool,
    pub target_slider: bool,
    /// Auto / original / manual toggle.
    pub alignment_toggle: bool,
    /// Spatial view and manual transform panel.
    pub spatial_section: bool,
    pub target_mask_modes: bool,
    pub registered_mask_mode: bool,
    pub custom_mask_mode: bool,
    pub source_echo_picker: bool,
    pub target_echo_picker: bool,
    /// Settings were edited after a finished registration.
    pub rerun_registration: bool,
    pub export_mask: bool,
    /// Placeholder shown instead of the viewer while no image is present.
    pub placeholder: bool,
}

impl<R: Renderer> ViewerEngine<R> {
    #[must_use]
    pub fn control_visibility(&self) -> ControlVisibility {
        let state = &self.state;
        let both_loaded = state.both_loaded();
        let masks = state.target_masks;
        ControlVisibility {
            source_slider: state.source.is_loaded(),
            target_slider: state.target.is_loaded(),
            alignment_toggle: both_loaded,
            spatial_section: both_loaded && state.spatial.is_some(),
            target_mask_modes: masks.any_available(),
            registered_mask_mode: masks.supports(MaskDisplayMode::Registered),
            custom_mask_mode: masks.supports(MaskDisplayMode::Custom),
            source_echo_picker: state.source.is_loaded() && state.source.echos > 1,
            target_echo_picker: state.target.is_loaded() && state.target.echos > 1,
            rerun_registration: state.registration.settings_changed,
            export_mask: state.registration.done && state.source_has_mask,
            placeholder: state.images.source.is_none()
                && state.images.target_aligned.is_none()
                && state.images.target_original.is_none(),
        }
    }

    /// `"index / count"` label for one side's slider, 1-based.
    #[must_use]
    pub fn slice_label(&self, side: VolumeSide) -> String {
        let volume = self.state.volume(side);
        format!("{} / {}", self.state.cursor.get(side) + 1, volume.slices)
    }
}
