use tracing::{debug, info};

use crate::core::{PixelOffset, VolumeDescriptor, VolumeGeometry, VolumeSide};
use crate::error::{ViewerError, ViewerResult};
use crate::render::Renderer;

use super::{ViewerEngine, engine_state::ViewerState};

impl<R: Renderer> ViewerEngine<R> {
    /// Replaces one side's volume after a successful load.
    ///
    /// Clears that side's masks, the manual transform, pan and the spatial
    /// snapshot. Cursors of loaded volumes move to their middle slice.
    pub fn apply_volume_loaded(
        &mut self,
        side: VolumeSide,
        geometry: VolumeGeometry,
    ) -> ViewerResult<()> {
        let geometry = geometry.validate()?;
        let state = &mut self.state;
        *state.volume_mut(side) = VolumeDescriptor::from_geometry(geometry, 0);

        match side {
            VolumeSide::Source => state.source_has_mask = false,
            VolumeSide::Target => state.target_masks.clear(),
        }
        state.transform.reset();
        reset_pan(state);
        state.spatial = None;

        if state.source.is_loaded() {
            state.cursor.source = state.source.middle_slice();
        }
        if side == VolumeSide::Target {
            state.cursor.target = state.target.middle_slice();
        }

        info!(
            side = %side,
            slices = geometry.slices,
            width = geometry.size[0],
            height = geometry.size[1],
            echos = geometry.echos,
            "volume loaded"
        );
        Ok(())
    }

    /// Replaces one side's geometry after switching to another echo.
    ///
    /// A cursor outside the new slice range moves to the middle slice.
    pub fn apply_echo_selected(
        &mut self,
        side: VolumeSide,
        echo: u32,
        geometry: VolumeGeometry,
    ) -> ViewerResult<()> {
        let current = self.state.volume(side);
        if !current.is_loaded() {
            return Err(ViewerError::VolumeNotLoaded { side });
        }
        if echo >= current.echos {
            return Err(ViewerError::InvalidData(format!(
                "echo index {echo} out of range for {} echos",
                current.echos
            )));
        }
        let echos = current.echos;
        let geometry = VolumeGeometry {
            echos,
            ..geometry.validate()?
        };

        let state = &mut self.state;
        let descriptor = VolumeDescriptor::from_geometry(geometry, echo);
        let cursor = state.cursor.get(side);
        if cursor >= descriptor.slices {
            state.cursor.set(side, descriptor.middle_slice());
        }
        *state.volume_mut(side) = descriptor;
        state.spatial = None;

        debug!(side = %side, echo, slices = descriptor.slices, "echo selected");
        Ok(())
    }

    /// Marks a mask as present after a successful mask load.
    pub fn apply_mask_loaded(&mut self, side: VolumeSide) {
        match side {
            VolumeSide::Source => self.state.source_has_mask = true,
            VolumeSide::Target => self.state.target_masks.on_custom_mask_loaded(),
        }
        debug!(side = %side, "mask loaded");
    }

    /// Returns to the freshly constructed state.
    pub fn reset_all(&mut self) {
        self.state = ViewerState::new(&self.config);
        info!("viewer state reset");
    }
}

fn reset_pan(state: &mut ViewerState) {
    state.view.pan = PixelOffset::zero();
    state.interaction.reset();
}
