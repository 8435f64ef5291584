use serde::{Deserialize, Serialize};

use crate::core::PixelOffset;

/// Pointer gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// Dragging the composed image.
    Panning,
    /// Dragging the curtain divider.
    CurtainDrag,
    /// Rotating the spatial-relation projection.
    SpatialRotate,
}

/// Pointer affordance the host should show over the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStyle {
    Default,
    Grab,
    Grabbing,
    /// Horizontal curtain divider (vertical line).
    EwResize,
    /// Vertical curtain divider (horizontal line).
    NsResize,
}

/// Accumulated pitch/yaw of the spatial projection, in radians.
///
/// Free rotation: no inertia and no limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialRotation {
    pub pitch: f64,
    pub yaw: f64,
}

impl Default for SpatialRotation {
    fn default() -> Self {
        Self {
            pitch: -0.5,
            yaw: 0.5,
        }
    }
}

impl SpatialRotation {
    #[must_use]
    pub const fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// Horizontal drag turns yaw, vertical drag turns pitch.
    pub fn apply_drag(&mut self, dx: f64, dy: f64, radians_per_px: f64) {
        self.yaw += dx * radians_per_px;
        self.pitch += dy * radians_per_px;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    can_pan: bool,
    last_x: f64,
    last_y: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            can_pan: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn can_pan(self) -> bool {
        self.can_pan
    }

    /// Updated after every composition from the clamped pan range.
    pub fn set_can_pan(&mut self, can_pan: bool) {
        self.can_pan = can_pan;
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        self.mode == InteractionMode::Panning
    }

    /// Starts a pan drag. Refused while another gesture runs or nothing can pan.
    pub fn on_pan_start(&mut self, x: f64, y: f64) -> bool {
        if self.mode != InteractionMode::Idle || !self.can_pan {
            return false;
        }
        self.begin(InteractionMode::Panning, x, y);
        true
    }

    pub fn on_curtain_drag_start(&mut self) -> bool {
        if self.mode != InteractionMode::Idle {
            return false;
        }
        self.mode = InteractionMode::CurtainDrag;
        true
    }

    pub fn on_spatial_drag_start(&mut self, x: f64, y: f64) -> bool {
        if self.mode != InteractionMode::Idle {
            return false;
        }
        self.begin(InteractionMode::SpatialRotate, x, y);
        true
    }

    /// Records a pointer sample and returns the delta since the previous one
    /// for the delta-driven gestures (pan, spatial rotation).
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<PixelOffset> {
        match self.mode {
            InteractionMode::Panning | InteractionMode::SpatialRotate => {
                let delta = PixelOffset::new(x - self.last_x, y - self.last_y);
                self.last_x = x;
                self.last_y = y;
                Some(delta)
            }
            InteractionMode::Idle | InteractionMode::CurtainDrag => None,
        }
    }

    /// Ends whichever gesture is running and returns it.
    pub fn on_pointer_up(&mut self) -> InteractionMode {
        std::mem::replace(&mut self.mode, InteractionMode::Idle)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn begin(&mut self, mode: InteractionMode, x: f64, y: f64) {
        self.mode = mode;
        self.last_x = x;
        self.last_y = y;
    }
}
