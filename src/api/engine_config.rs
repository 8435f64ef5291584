use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_TRANSFORM_EPSILON, RegistrationDirection, Viewport};
use crate::error::{ViewerError, ViewerResult};
use crate::interaction::SpatialRotation;

use super::{CurtainDirection, RenderMode};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load viewer
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_spatial_viewport")]
    pub spatial_viewport: Viewport,
    #[serde(default = "default_split_gap_px")]
    pub split_gap_px: f64,
    /// Screen size the largest axis of the union box is scaled to.
    #[serde(default = "default_spatial_fit_size")]
    pub spatial_fit_size: f64,
    #[serde(default = "default_spatial_radians_per_px")]
    pub spatial_radians_per_px: f64,
    #[serde(default)]
    pub initial_spatial_rotation: SpatialRotation,
    #[serde(default = "default_transform_epsilon")]
    pub transform_epsilon: f64,
    #[serde(default = "default_slice_debounce_ms")]
    pub slice_debounce_ms: u64,
    #[serde(default = "default_transform_debounce_ms")]
    pub transform_debounce_ms: u64,
    #[serde(default = "default_registration_poll_interval_ms")]
    pub registration_poll_interval_ms: u64,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub curtain_direction: CurtainDirection,
    #[serde(default = "default_fraction")]
    pub curtain_position: f64,
    #[serde(default = "default_fraction")]
    pub blend: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub registration_direction: RegistrationDirection,
    #[serde(default = "default_subpixel_factor")]
    pub subpixel_factor: u32,
}

impl ViewerEngineConfig {
    /// Creates a config with defaults for everything but the viewer size.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            spatial_viewport: default_spatial_viewport(),
            split_gap_px: default_split_gap_px(),
            spatial_fit_size: default_spatial_fit_size(),
            spatial_radians_per_px: default_spatial_radians_per_px(),
            initial_spatial_rotation: SpatialRotation::default(),
            transform_epsilon: default_transform_epsilon(),
            slice_debounce_ms: default_slice_debounce_ms(),
            transform_debounce_ms: default_transform_debounce_ms(),
            registration_poll_interval_ms: default_registration_poll_interval_ms(),
            render_mode: RenderMode::default(),
            curtain_direction: CurtainDirection::default(),
            curtain_position: default_fraction(),
            blend: default_fraction(),
            zoom: default_zoom(),
            registration_direction: RegistrationDirection::default(),
            subpixel_factor: default_subpixel_factor(),
        }
    }

    #[must_use]
    pub fn with_spatial_viewport(mut self, viewport: Viewport) -> Self {
        self.spatial_viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    #[must_use]
    pub fn with_split_gap_px(mut self, split_gap_px: f64) -> Self {
        self.split_gap_px = split_gap_px;
        self
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, slice_ms: u64, transform_ms: u64) -> Self {
        self.slice_debounce_ms = slice_ms;
        self.transform_debounce_ms = transform_ms;
        self
    }

    #[must_use]
    pub fn with_registration_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.registration_poll_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_registration(mut self, direction: RegistrationDirection, subpixel: u32) -> Self {
        self.registration_direction = direction;
        self.subpixel_factor = subpixel;
        self
    }

    #[must_use]
    pub fn slice_debounce(&self) -> Duration {
        Duration::from_millis(self.slice_debounce_ms)
    }

    #[must_use]
    pub fn transform_debounce(&self) -> Duration {
        Duration::from_millis(self.transform_debounce_ms)
    }

    #[must_use]
    pub fn registration_poll_interval(&self) -> Duration {
        Duration::from_millis(self.registration_poll_interval_ms)
    }

    pub fn validate(self) -> ViewerResult<Self> {
        for viewport in [self.viewport, self.spatial_viewport] {
            if !viewport.is_valid() {
                return Err(ViewerError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        if !self.split_gap_px.is_finite() || self.split_gap_px < 0.0 {
            return Err(ViewerError::InvalidData(
                "split gap must be finite and >= 0".to_owned(),
            ));
        }
        if !self.spatial_fit_size.is_finite() || self.spatial_fit_size <= 0.0 {
            return Err(ViewerError::InvalidData(
                "spatial fit size must be finite and > 0".to_owned(),
            ));
        }
        if !self.spatial_radians_per_px.is_finite() {
            return Err(ViewerError::InvalidData(
                "spatial rotation rate must be finite".to_owned(),
            ));
        }
        if !self.initial_spatial_rotation.pitch.is_finite()
            || !self.initial_spatial_rotation.yaw.is_finite()
        {
            return Err(ViewerError::InvalidData(
                "initial spatial rotation must be finite".to_owned(),
            ));
        }
        if !self.transform_epsilon.is_finite() || self.transform_epsilon < 0.0 {
            return Err(ViewerError::InvalidData(
                "transform epsilon must be finite and >= 0".to_owned(),
            ));
        }
        validate_fraction(self.curtain_position, "curtain position")?;
        validate_fraction(self.blend, "blend")?;
        validate_zoom(self.zoom)?;
        if self.registration_poll_interval_ms == 0 {
            return Err(ViewerError::InvalidData(
                "registration poll interval must be > 0".to_owned(),
            ));
        }
        if self.subpixel_factor == 0 {
            return Err(ViewerError::InvalidData(
                "subpixel factor must be >= 1".to_owned(),
            ));
        }
        Ok(self)
    }
}

pub(super) fn validate_fraction(value: f64, name: &str) -> ViewerResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ViewerError::InvalidData(format!(
            "{name} must be finite and in [0, 1]"
        )));
    }
    Ok(value)
}

pub(super) fn validate_zoom(zoom: f64) -> ViewerResult<f64> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(ViewerError::InvalidData(
            "zoom must be finite and > 0".to_owned(),
        ));
    }
    Ok(zoom)
}

fn default_spatial_viewport() -> Viewport {
    Viewport::new(200, 150)
}

fn default_split_gap_px() -> f64 {
    24.0
}

fn default_spatial_fit_size() -> f64 {
    60.0
}

fn default_spatial_radians_per_px() -> f64 {
    0.01
}

fn default_transform_epsilon() -> f64 {
    DEFAULT_TRANSFORM_EPSILON
}

fn default_slice_debounce_ms() -> u64 {
    50
}

fn default_transform_debounce_ms() -> u64 {
    150
}

fn default_registration_poll_interval_ms() -> u64 {
    500
}

fn default_fraction() -> f64 {
    0.5
}

fn default_zoom() -> f64 {
    1.0
}

fn default_subpixel_factor() -> u32 {
    1
}
