use crate::error::ViewerResult;
use crate::render::Renderer;

use super::{ViewerEngineConfig, engine_state::ViewerState};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ViewerEngine` owns the whole comparison state (volumes, cursors,
/// alignment, manual transform, masks, view, fetched images) and turns it
/// into render frames. It performs no I/O: collaborator results are applied
/// through the `apply_*` methods, usually by a `ViewerSession`.
pub struct ViewerEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ViewerEngineConfig,
    pub(super) state: ViewerState,
}

impl<R: Renderer> ViewerEngine<R> {
    /// Creates an engine with nothing loaded.
    pub fn new(renderer: R, config: ViewerEngineConfig) -> ViewerResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            state: ViewerState::new(&config),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ViewerEngineConfig {
        &self.config
    }

    /// Composes the comparison view and hands it to the renderer.
    pub fn render(&mut self) -> ViewerResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Projects the spatial relation and hands it to the renderer.
    pub fn render_spatial(&mut self) -> ViewerResult<()> {
        let frame = self.build_spatial_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the comparison view into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ViewerResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
