use tracing::{debug, info};

use crate::core::{DisplayDirection, MaskDisplayMode, RegistrationDirection, SpatialRelation};
use crate::error::{ViewerError, ViewerResult};
use crate::render::Renderer;

use super::ViewerEngine;

impl<R: Renderer> ViewerEngine<R> {
    /// Changes the requested registration direction.
    ///
    /// The display direction follows the selection, with `Auto` shown as
    /// `Normal` until a job reports the direction it used. After a finished
    /// registration the change flags the settings as stale.
    pub fn set_registration_direction(&mut self, direction: RegistrationDirection) {
        let registration = &mut self.state.registration;
        if registration.direction == direction {
            return;
        }
        registration.direction = direction;
        registration.display_direction = direction.display_direction().unwrap_or_default();
        if registration.done {
            registration.settings_changed = true;
        }
        debug!(?direction, "registration direction changed");
    }

    pub fn set_subpixel_factor(&mut self, factor: u32) -> ViewerResult<()> {
        if factor == 0 {
            return Err(ViewerError::InvalidData(
                "subpixel factor must be >= 1".to_owned(),
            ));
        }
        let registration = &mut self.state.registration;
        if registration.subpixel_factor == factor {
            return Ok(());
        }
        registration.subpixel_factor = factor;
        if registration.done {
            registration.settings_changed = true;
        }
        Ok(())
    }

    /// Records a finished registration job.
    ///
    /// The registered mask becomes available and the direction the job
    /// actually used becomes the display direction.
    pub fn apply_registration_done(&mut self, used_direction: Option<DisplayDirection>) {
        let state = &mut self.state;
        state.registration.done = true;
        state.registration.settings_changed = false;
        if let Some(direction) = used_direction {
            state.registration.display_direction = direction;
        }
        state.target_masks.on_registration_done();
        info!(
            display_direction = ?state.registration.display_direction,
            mask_mode = ?state.target_masks.mode(),
            "registration done"
        );
    }

    /// Selects a target mask mode the target supports.
    pub fn set_target_mask_mode(&mut self, mode: MaskDisplayMode) -> bool {
        let accepted = self.state.target_masks.select(mode);
        debug!(?mode, accepted, "target mask mode selected");
        accepted
    }

    /// Stores a fresh spatial snapshot and seeds the transform form from it.
    pub fn apply_spatial_relation(&mut self, relation: SpatialRelation) {
        let baseline = relation.baseline();
        debug!(
            status = ?relation.status(),
            overlap_pct = relation.displayed_overlap_pct(),
            "spatial relation updated"
        );
        self.state.spatial = Some(relation);
        self.seed_transform_from_baseline(&baseline);
    }

    /// Recomputes the spatial snapshot locally from the two descriptors.
    pub fn estimate_spatial_relation(&mut self) -> ViewerResult<&SpatialRelation> {
        let relation = SpatialRelation::estimate(&self.state.source, &self.state.target)?;
        self.apply_spatial_relation(relation);
        self.state
            .spatial
            .as_ref()
            .ok_or_else(|| ViewerError::InvalidState("spatial relation missing".to_owned()))
    }

    pub fn clear_spatial_relation(&mut self) {
        self.state.spatial = None;
    }
}
