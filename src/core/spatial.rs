use serde::{Deserialize, Serialize};

use crate::core::types::round_to_decimals;
use crate::core::{TransformBaseline, Vec3, VolumeDescriptor, VolumeSide};
use crate::error::{ViewerError, ViewerResult};

/// Overlap percentage below which the pair is flagged as weakly overlapping.
pub const LOW_OVERLAP_PERCENT: f64 = 50.0;

/// Axis-aligned box in physical space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn of_volume(volume: &VolumeDescriptor) -> Self {
        let extent = volume.extent_mm();
        Self {
            min: volume.origin,
            max: [
                volume.origin[0] + extent[0],
                volume.origin[1] + extent[1],
                volume.origin[2] + extent[2],
            ],
        }
    }

    #[must_use]
    pub fn extent(&self) -> Vec3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let [x, y, z] = self.extent();
        x * y * z
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }

    /// Per-axis overlap length, zero on axes that do not overlap.
    #[must_use]
    pub fn overlap_extent(&self, other: &Self) -> Vec3 {
        let mut extent = [0.0; 3];
        for (axis, value) in extent.iter_mut().enumerate() {
            let low = self.min[axis].max(other.min[axis]);
            let high = self.max[axis].min(other.max[axis]);
            *value = (high - low).max(0.0);
        }
        extent
    }

    /// Intersection box; may be inverted on axes that do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            min: [
                self.min[0].max(other.min[0]),
                self.min[1].max(other.min[1]),
                self.min[2].max(other.min[2]),
            ],
            max: [
                self.max[0].min(other.max[0]),
                self.max[1].min(other.max[1]),
                self.max[2].min(other.max[2]),
            ],
        }
    }

    /// The eight corners, `min`-z face first, counter-clockwise from `min`.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            [lo[0], lo[1], lo[2]],
            [hi[0], lo[1], lo[2]],
            [hi[0], hi[1], lo[2]],
            [lo[0], hi[1], lo[2]],
            [lo[0], lo[1], hi[2]],
            [hi[0], lo[1], hi[2]],
            [hi[0], hi[1], hi[2]],
            [lo[0], hi[1], hi[2]],
        ]
    }
}

/// Coarse classification of how well the two volumes overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapStatus {
    Ok,
    LowOverlap,
    NoOverlap,
}

impl OverlapStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::LowOverlap => "Low Overlap",
            Self::NoOverlap => "No Overlap",
        }
    }
}

/// Geometry summary of the two volumes, replaced wholesale on every refresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialRelation {
    pub source: BoundingBox,
    pub target: BoundingBox,
    pub overlap_mm: Vec3,
    pub overlap_vol_mm3: f64,
    pub overlap_pct_source: f64,
    pub overlap_pct_target: f64,
    pub offset_mm: Vec3,
    #[serde(default)]
    pub rotation_deg: Option<Vec3>,
    #[serde(default)]
    pub spacing_ratio: Option<Vec3>,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub error: bool,
}

impl SpatialRelation {
    /// Computes the summary from two loaded descriptors.
    ///
    /// Descriptors carry no orientation, so the rotation estimate is zero.
    pub fn estimate(source: &VolumeDescriptor, target: &VolumeDescriptor) -> ViewerResult<Self> {
        for (side, volume) in [(VolumeSide::Source, source), (VolumeSide::Target, target)] {
            if !volume.is_loaded() {
                return Err(ViewerError::VolumeNotLoaded { side });
            }
        }

        let source_box = BoundingBox::of_volume(source);
        let target_box = BoundingBox::of_volume(target);
        let overlap_mm = source_box.overlap_extent(&target_box);
        let overlap_vol_mm3 = overlap_mm[0] * overlap_mm[1] * overlap_mm[2];

        let percent_of = |whole: f64| {
            if whole > 0.0 {
                round_to_decimals(overlap_vol_mm3 / whole * 100.0, 1)
            } else {
                0.0
            }
        };
        let overlap_pct_source = percent_of(source_box.volume());
        let overlap_pct_target = percent_of(target_box.volume());

        let mut spacing_ratio = [1.0; 3];
        for (axis, ratio) in spacing_ratio.iter_mut().enumerate() {
            if source.spacing[axis] > 0.0 {
                *ratio = round_to_decimals(target.spacing[axis] / source.spacing[axis], 3);
            }
        }

        Ok(Self {
            source: source_box,
            target: target_box,
            overlap_mm,
            overlap_vol_mm3,
            overlap_pct_source,
            overlap_pct_target,
            offset_mm: [
                target_box.min[0] - source_box.min[0],
                target_box.min[1] - source_box.min[1],
                target_box.min[2] - source_box.min[2],
            ],
            rotation_deg: Some([0.0; 3]),
            spacing_ratio: Some(spacing_ratio),
            warning: overlap_pct_source < LOW_OVERLAP_PERCENT
                || overlap_pct_target < LOW_OVERLAP_PERCENT,
            error: overlap_vol_mm3 == 0.0,
        })
    }

    #[must_use]
    pub fn status(&self) -> OverlapStatus {
        if self.error {
            OverlapStatus::NoOverlap
        } else if self.warning {
            OverlapStatus::LowOverlap
        } else {
            OverlapStatus::Ok
        }
    }

    /// The smaller of the two overlap percentages.
    #[must_use]
    pub fn displayed_overlap_pct(&self) -> f64 {
        self.overlap_pct_source.min(self.overlap_pct_target)
    }

    #[must_use]
    pub fn union_box(&self) -> BoundingBox {
        self.source.union(&self.target)
    }

    /// Intersection cuboid, present only when the overlap volume is positive.
    #[must_use]
    pub fn overlap_box(&self) -> Option<BoundingBox> {
        (self.overlap_vol_mm3 > 0.0).then(|| self.source.intersection(&self.target))
    }

    #[must_use]
    pub fn baseline(&self) -> TransformBaseline {
        TransformBaseline {
            offset_mm: Some(self.offset_mm),
            rotation_deg: self.rotation_deg,
            scale: self.spacing_ratio,
        }
    }
}
