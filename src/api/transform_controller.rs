use tracing::{debug, info};

use crate::core::{
    AlignmentMode, TransformBaseline, TransformEnableFlags, TransformParams, Vec3,
};
use crate::render::Renderer;

use super::ViewerEngine;

/// What committing a manual transform changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOutcome {
    pub active: bool,
    /// Alignment moved from `Auto` to `Manual` because the transform became active.
    pub switched_to_manual: bool,
}

impl<R: Renderer> ViewerEngine<R> {
    /// Commits a manual transform.
    ///
    /// An active transform pulls an auto-aligned view into `Manual`; nothing
    /// switches back automatically.
    pub fn apply_manual_transform(&mut self, params: TransformParams) -> TransformOutcome {
        let epsilon = self.config.transform_epsilon;
        let active = self.state.transform.set_transform(params, epsilon);
        self.after_transform_commit(active)
    }

    /// Commits the values currently held by the edit form.
    pub fn commit_transform_fields(&mut self) -> TransformOutcome {
        let epsilon = self.config.transform_epsilon;
        let active = self.state.transform.commit_fields(epsilon);
        self.after_transform_commit(active)
    }

    /// Stores edited values without committing them.
    ///
    /// Returns whether any enable flag is on, i.e. whether a deferred commit
    /// would change anything.
    pub fn edit_transform_fields(
        &mut self,
        offset_mm: Vec3,
        rotation_deg: Vec3,
        scale: Vec3,
    ) -> bool {
        let fields = self.state.transform.fields();
        self.state.transform.edit_fields(TransformParams {
            offset_mm,
            rotation_deg,
            scale,
            enabled: fields.enabled,
        });
        fields.enabled.any()
    }

    /// Changes the enable flags and commits the form right away.
    pub fn set_transform_flags(&mut self, enabled: TransformEnableFlags) -> TransformOutcome {
        let fields = self.state.transform.fields().with_enabled(enabled);
        self.apply_manual_transform(fields)
    }

    /// Seeds the edit form from the collaborator's geometry estimate.
    ///
    /// Has no effect once the user edited the transform.
    pub fn seed_transform_from_baseline(&mut self, baseline: &TransformBaseline) -> bool {
        let seeded = self.state.transform.seed_from_baseline(baseline);
        if seeded {
            debug!("manual transform fields seeded from baseline");
        }
        seeded
    }

    pub fn reset_manual_transform(&mut self) {
        self.state.transform.reset();
    }

    fn after_transform_commit(&mut self, active: bool) -> TransformOutcome {
        let switched_to_manual = active && self.state.alignment == AlignmentMode::Auto;
        if switched_to_manual {
            self.state.alignment = AlignmentMode::Manual;
            info!("manual transform activated, alignment switched to manual");
        }
        debug!(active, "manual transform committed");
        TransformOutcome {
            active,
            switched_to_manual,
        }
    }
}
