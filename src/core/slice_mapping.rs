use serde::{Deserialize, Serialize};

use crate::core::{AlignmentMode, VolumeDescriptor, VolumeSide};

/// Maps `index` on volume `from` to the nearest slice of volume `to`.
///
/// The source plane's physical z position is projected onto `to`'s grid and
/// rounded: `round((from.origin_z + index * from.spacing_z - to.origin_z) / to.spacing_z)`,
/// clamped into `to`'s slice range. Returns `None` when either side is
/// unloaded.
#[must_use]
pub fn map_slice_index(
    index: usize,
    from: &VolumeDescriptor,
    to: &VolumeDescriptor,
) -> Option<usize> {
    if !from.is_loaded() || !to.is_loaded() {
        return None;
    }
    let physical_z = from.slice_z(index);
    let projected = ((physical_z - to.origin[2]) / to.spacing[2]).round();
    // `as` saturates on infinities and maps NaN to 0; the clamp does the rest.
    Some(to.clamp_slice(projected as i64))
}

/// Source and target slice cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SliceCursor {
    pub source: usize,
    pub target: usize,
}

impl SliceCursor {
    #[must_use]
    pub fn get(self, side: VolumeSide) -> usize {
        match side {
            VolumeSide::Source => self.source,
            VolumeSide::Target => self.target,
        }
    }

    pub fn set(&mut self, side: VolumeSide, index: usize) {
        match side {
            VolumeSide::Source => self.source = index,
            VolumeSide::Target => self.target = index,
        }
    }

    /// Re-derives the cursor opposite `driver` from the driver's physical position.
    ///
    /// Only `Auto` alignment couples the cursors. Returns the new index of the
    /// dependent side when it was derived.
    pub fn sync_from(
        &mut self,
        driver: VolumeSide,
        mode: AlignmentMode,
        source: &VolumeDescriptor,
        target: &VolumeDescriptor,
    ) -> Option<usize> {
        if mode != AlignmentMode::Auto {
            return None;
        }
        let (from, to) = match driver {
            VolumeSide::Source => (source, target),
            VolumeSide::Target => (target, source),
        };
        let derived = map_slice_index(self.get(driver), from, to)?;
        self.set(driver.other(), derived);
        Some(derived)
    }
}
