use tracing::trace;

use crate::core::PixelOffset;
use crate::error::ViewerResult;
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::engine_config::{validate_fraction, validate_zoom};
use super::view_composition::curtain_position_at;
use super::{CurtainDirection, RenderMode, ViewerEngine};

/// Effect of a pointer sample on the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEffect {
    None,
    /// Pan or curtain changed; the comparison view needs a redraw.
    View,
    /// Rotation changed; the spatial view needs a redraw.
    Spatial,
}

impl<R: Renderer> ViewerEngine<R> {
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.state.view.render_mode = mode;
    }

    pub fn set_zoom(&mut self, zoom: f64) -> ViewerResult<()> {
        self.state.view.zoom = validate_zoom(zoom)?;
        Ok(())
    }

    pub fn set_blend(&mut self, blend: f64) -> ViewerResult<()> {
        self.state.view.blend = validate_fraction(blend, "blend")?;
        Ok(())
    }

    pub fn set_curtain_position(&mut self, position: f64) -> ViewerResult<()> {
        self.state.view.curtain_position = validate_fraction(position, "curtain position")?;
        Ok(())
    }

    /// Changes the curtain orientation and re-centers it.
    pub fn set_curtain_direction(&mut self, direction: CurtainDirection) {
        self.state.view.curtain_direction = direction;
        self.state.view.curtain_position = 0.5;
    }

    pub fn reset_pan(&mut self) {
        self.state.view.pan = PixelOffset::zero();
    }

    /// Starts a pan drag if the last composition left any pan range.
    pub fn pan_start(&mut self, x: f64, y: f64) -> bool {
        self.state.interaction.on_pan_start(x, y)
    }

    pub fn curtain_drag_start(&mut self) -> bool {
        self.state.interaction.on_curtain_drag_start()
    }

    pub fn spatial_drag_start(&mut self, x: f64, y: f64) -> bool {
        self.state.interaction.on_spatial_drag_start(x, y)
    }

    /// Feeds a pointer position in viewer (or spatial view) pixels to the
    /// running gesture.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerEffect {
        match self.state.interaction.mode() {
            InteractionMode::Idle => PointerEffect::None,
            InteractionMode::CurtainDrag => {
                let view = &mut self.state.view;
                view.curtain_position =
                    curtain_position_at(self.config.viewport, view.curtain_direction, x, y);
                PointerEffect::View
            }
            InteractionMode::Panning => {
                let Some(delta) = self.state.interaction.on_pointer_move(x, y) else {
                    return PointerEffect::None;
                };
                let pan = &mut self.state.view.pan;
                pan.x += delta.x;
                pan.y += delta.y;
                // Re-clamp against the current layout.
                self.compose();
                PointerEffect::View
            }
            InteractionMode::SpatialRotate => {
                let Some(delta) = self.state.interaction.on_pointer_move(x, y) else {
                    return PointerEffect::None;
                };
                self.state.spatial_rotation.apply_drag(
                    delta.x,
                    delta.y,
                    self.config.spatial_radians_per_px,
                );
                PointerEffect::Spatial
            }
        }
    }

    /// Ends the running gesture and returns which one it was.
    pub fn pointer_up(&mut self) -> InteractionMode {
        let ended = self.state.interaction.on_pointer_up();
        trace!(?ended, "pointer gesture ended");
        ended
    }
}
