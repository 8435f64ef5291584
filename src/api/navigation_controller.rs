use tracing::{debug, trace};

use crate::core::{AlignmentMode, VolumeSide, map_slice_index};
use crate::render::Renderer;

use super::{RenderMode, ViewerEngine};

impl<R: Renderer> ViewerEngine<R> {
    /// Moves one side's cursor, clamped into its slice range.
    ///
    /// Under `Auto` alignment the other cursor follows through physical
    /// space. Returns `false` when the side is unloaded or the cursor did not
    /// move.
    pub fn set_slice(&mut self, side: VolumeSide, index: i64) -> bool {
        let volume = *self.state.volume(side);
        if !volume.is_loaded() {
            return false;
        }
        let clamped = volume.clamp_slice(index);
        if clamped == self.state.cursor.get(side) {
            return false;
        }
        self.state.cursor.set(side, clamped);
        let derived = self.state.cursor.sync_from(
            side,
            self.state.alignment,
            &self.state.source,
            &self.state.target,
        );
        trace!(side = %side, index = clamped, ?derived, "slice cursor moved");
        true
    }

    /// Steps one side's cursor by `delta` slices.
    pub fn step_slice(&mut self, side: VolumeSide, delta: i64) -> bool {
        let current = i64::try_from(self.state.cursor.get(side)).unwrap_or(i64::MAX);
        self.set_slice(side, current.saturating_add(delta))
    }

    /// Switches what the target shows. Cursors are left untouched.
    pub fn set_alignment_mode(&mut self, mode: AlignmentMode) -> bool {
        if self.state.alignment == mode {
            return false;
        }
        debug!(from = ?self.state.alignment, to = ?mode, "alignment mode switched");
        self.state.alignment = mode;
        true
    }

    /// Slice index requested for the native-grid target image.
    ///
    /// Follows the source cursor while auto-aligned outside split view and
    /// is mirrored for a reversed display direction. `None` when the target
    /// is unloaded.
    #[must_use]
    pub fn target_original_index(&self) -> Option<usize> {
        let state = &self.state;
        if !state.target.is_loaded() {
            return None;
        }
        let mut index = state.cursor.target;
        if state.alignment == AlignmentMode::Auto
            && state.view.render_mode != RenderMode::Split
            && state.source.is_loaded()
        {
            index = map_slice_index(state.cursor.source, &state.source, &state.target)
                .unwrap_or(index);
        }
        if state.registration.display_direction.is_reverse() {
            index = state.target.slices - 1 - index.min(state.target.slices - 1);
        }
        Some(index)
    }
}
