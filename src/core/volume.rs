use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Vec3;
use crate::error::{ViewerError, ViewerResult};

/// Which of the two compared volumes an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeSide {
    Source,
    Target,
}

impl VolumeSide {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for VolumeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry reported by the volume-load collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeGeometry {
    pub slices: usize,
    pub size: [u32; 2],
    pub origin: Vec3,
    pub spacing: Vec3,
    #[serde(default = "default_echo_count")]
    pub echos: u32,
}

fn default_echo_count() -> u32 {
    1
}

impl VolumeGeometry {
    pub fn validate(self) -> ViewerResult<Self> {
        if self.origin.iter().chain(self.spacing.iter()).any(|v| !v.is_finite()) {
            return Err(ViewerError::InvalidData(
                "volume origin and spacing must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Per-side volume description held by the viewer.
///
/// A descriptor with zero slices is "unloaded"; navigation, mapping and
/// fetching treat such a side as inert. Descriptors are replaced wholesale on
/// load and echo switch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeDescriptor {
    pub slices: usize,
    pub size: [u32; 2],
    pub origin: Vec3,
    pub spacing: Vec3,
    pub echos: u32,
    pub current_echo: u32,
}

impl Default for VolumeDescriptor {
    fn default() -> Self {
        Self::unloaded()
    }
}

impl VolumeDescriptor {
    #[must_use]
    pub const fn unloaded() -> Self {
        Self {
            slices: 0,
            size: [0, 0],
            origin: [0.0, 0.0, 0.0],
            spacing: [1.0, 1.0, 1.0],
            echos: 1,
            current_echo: 0,
        }
    }

    #[must_use]
    pub fn from_geometry(geometry: VolumeGeometry, current_echo: u32) -> Self {
        Self {
            slices: geometry.slices,
            size: geometry.size,
            origin: geometry.origin,
            spacing: geometry.spacing,
            echos: geometry.echos.max(1),
            current_echo,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slices > 0
    }

    /// Index of the slice shown right after a load.
    #[must_use]
    pub fn middle_slice(&self) -> usize {
        self.slices / 2
    }

    /// Clamps a signed slice index into `[0, slices - 1]`.
    ///
    /// Returns 0 for an unloaded volume.
    #[must_use]
    pub fn clamp_slice(&self, index: i64) -> usize {
        if self.slices == 0 {
            return 0;
        }
        let last = i64::try_from(self.slices - 1).unwrap_or(i64::MAX);
        usize::try_from(index.clamp(0, last)).unwrap_or(0)
    }

    /// Physical z position (mm) of the plane through `index`.
    #[must_use]
    pub fn slice_z(&self, index: usize) -> f64 {
        self.origin[2] + index as f64 * self.spacing[2]
    }

    /// Physical extent along each axis, using the slice count as the z size.
    #[must_use]
    pub fn extent_mm(&self) -> Vec3 {
        [
            f64::from(self.size[0]) * self.spacing[0],
            f64::from(self.size[1]) * self.spacing[1],
            self.slices as f64 * self.spacing[2],
        ]
    }
}
