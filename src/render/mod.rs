mod frame;
mod null_renderer;
mod primitives;
mod raster;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ClipRect, Color, ImageLayer, ImagePrimitive, LinePrimitive, PolygonPrimitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};
pub use raster::RasterImage;

use crate::error::ViewerResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from alignment, composition and interaction
/// logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ViewerResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
