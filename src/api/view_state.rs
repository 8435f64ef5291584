use serde::{Deserialize, Serialize};

use crate::core::PixelOffset;

/// Visual comparison mode of the main viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Overlapping images split by a draggable wipe line.
    #[default]
    Curtain,
    /// Overlapping images cross-faded.
    Blend,
    /// Side-by-side panes, each fitted independently.
    Split,
    /// Source only.
    Source,
    /// Target only.
    Target,
}

/// Orientation of the curtain movement.
///
/// `Horizontal` wipes along x, so the divider is a vertical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurtainDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Render mode, curtain/blend fractions, zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub render_mode: RenderMode,
    pub curtain_position: f64,
    pub curtain_direction: CurtainDirection,
    pub blend: f64,
    pub zoom: f64,
    pub pan: PixelOffset,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Curtain,
            curtain_position: 0.5,
            curtain_direction: CurtainDirection::Horizontal,
            blend: 0.5,
            zoom: 1.0,
            pan: PixelOffset::zero(),
        }
    }
}
