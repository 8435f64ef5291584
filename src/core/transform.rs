use serde::{Deserialize, Serialize};

use crate::core::Vec3;
use crate::core::types::round_to_decimals;

/// Magnitude above which a transform category counts as applied.
pub const DEFAULT_TRANSFORM_EPSILON: f64 = 1e-3;

const IDENTITY_SCALE: Vec3 = [1.0, 1.0, 1.0];

/// Which transform categories the user has switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformEnableFlags {
    pub offset: bool,
    pub rotation: bool,
    pub scale: bool,
}

impl TransformEnableFlags {
    pub const NONE: Self = Self {
        offset: false,
        rotation: false,
        scale: false,
    };

    #[must_use]
    pub fn any(self) -> bool {
        self.offset || self.rotation || self.scale
    }
}

/// The nine manual transform scalars plus their enable flags.
///
/// This is both the editable form content and the parameter block passed
/// verbatim to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    pub offset_mm: Vec3,
    pub rotation_deg: Vec3,
    pub scale: Vec3,
    pub enabled: TransformEnableFlags,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformParams {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            offset_mm: [0.0, 0.0, 0.0],
            rotation_deg: [0.0, 0.0, 0.0],
            scale: IDENTITY_SCALE,
            enabled: TransformEnableFlags::NONE,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset_mm: Vec3) -> Self {
        self.offset_mm = offset_mm;
        self.enabled.offset = true;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: Vec3) -> Self {
        self.rotation_deg = rotation_deg;
        self.enabled.rotation = true;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self.enabled.scale = true;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: TransformEnableFlags) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replaces values an edit field cannot hold.
    ///
    /// Non-finite offsets/rotations read as 0; non-finite or zero scales read as 1.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite_or = |value: f64, fallback: f64| {
            if value.is_finite() { value } else { fallback }
        };
        Self {
            offset_mm: self.offset_mm.map(|v| finite_or(v, 0.0)),
            rotation_deg: self.rotation_deg.map(|v| finite_or(v, 0.0)),
            scale: self
                .scale
                .map(|v| if v.is_finite() && v != 0.0 { v } else { 1.0 }),
            enabled: self.enabled,
        }
    }

    /// True iff some enabled category exceeds `epsilon`.
    #[must_use]
    pub fn is_active(&self, epsilon: f64) -> bool {
        let offset = self.enabled.offset && self.offset_mm.iter().any(|v| v.abs() > epsilon);
        let rotation =
            self.enabled.rotation && self.rotation_deg.iter().any(|v| v.abs() > epsilon);
        let scale = self.enabled.scale && self.scale.iter().any(|v| (v - 1.0).abs() > epsilon);
        offset || rotation || scale
    }
}

/// Registration collaborator's best-estimate alignment.
///
/// Each part is optional because older geometry summaries omit rotation and
/// spacing ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformBaseline {
    pub offset_mm: Option<Vec3>,
    pub rotation_deg: Option<Vec3>,
    pub scale: Option<Vec3>,
}

impl TransformBaseline {
    /// Baseline values as they appear in the edit fields.
    ///
    /// Offsets and rotations are rounded to 0.1, scales to 0.01; missing or
    /// non-finite values fall back to identity. Enable flags stay off.
    #[must_use]
    pub fn as_field_values(&self) -> TransformParams {
        let round_to = |value: f64, decimals: i32, fallback: f64| {
            if value.is_finite() {
                round_to_decimals(value, decimals)
            } else {
                fallback
            }
        };
        TransformParams {
            offset_mm: self
                .offset_mm
                .unwrap_or([0.0; 3])
                .map(|v| round_to(v, 1, 0.0)),
            rotation_deg: self
                .rotation_deg
                .unwrap_or([0.0; 3])
                .map(|v| round_to(v, 1, 0.0)),
            scale: self
                .scale
                .unwrap_or(IDENTITY_SCALE)
                .map(|v| round_to(v, 2, 1.0)),
            enabled: TransformEnableFlags::NONE,
        }
    }
}

/// User-editable affine override.
///
/// `fields` mirrors the edit form; `applied` is the last committed transform
/// and is what gets rasterized. Once the user commits anything, background
/// baseline refreshes stop touching the form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualTransform {
    fields: TransformParams,
    applied: TransformParams,
    active: bool,
    user_edited: bool,
}

impl ManualTransform {
    #[must_use]
    pub fn fields(&self) -> TransformParams {
        self.fields
    }

    #[must_use]
    pub fn applied(&self) -> TransformParams {
        self.applied
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn user_edited(&self) -> bool {
        self.user_edited
    }

    /// Commits `params` and returns the recomputed `active` flag.
    pub fn set_transform(&mut self, params: TransformParams, epsilon: f64) -> bool {
        let params = params.sanitized();
        self.fields = params;
        self.applied = params;
        self.active = params.is_active(epsilon);
        self.user_edited = true;
        self.active
    }

    /// Updates the edit form without committing it.
    pub fn edit_fields(&mut self, params: TransformParams) {
        self.fields = params;
        self.user_edited = true;
    }

    /// Commits whatever the edit form currently holds.
    pub fn commit_fields(&mut self, epsilon: f64) -> bool {
        self.set_transform(self.fields, epsilon)
    }

    /// Writes baseline values into the edit fields until the first user edit.
    ///
    /// Returns `true` when the fields were written.
    pub fn seed_from_baseline(&mut self, baseline: &TransformBaseline) -> bool {
        if self.user_edited {
            return false;
        }
        let seeded = baseline.as_field_values();
        self.fields = TransformParams {
            enabled: self.fields.enabled,
            ..seeded
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
