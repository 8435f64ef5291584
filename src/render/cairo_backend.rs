use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ViewerError, ViewerResult};
use crate::render::{
    Color, ImagePrimitive, PolygonPrimitive, RasterImage, RectPrimitive, RenderFrame, Renderer,
    TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub images_drawn: usize,
    pub polygons_drawn: usize,
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ViewerResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ViewerResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ViewerError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(0.0, 0.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ViewerResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ViewerResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for image in &frame.images {
            if draw_image(context, image)? {
                stats.images_drawn += 1;
            }
        }

        for polygon in &frame.polygons {
            draw_polygon(context, polygon)?;
            stats.polygons_drawn += 1;
        }

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ViewerResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ViewerResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Returns `false` when the primitive had nothing visible to draw.
fn draw_image(context: &Context, image: &ImagePrimitive) -> ViewerResult<bool> {
    if !image.is_visible() || image.width <= 0.0 || image.height <= 0.0 {
        return Ok(false);
    }

    let surface = raster_to_surface(&image.image)?;
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.rectangle(image.clip.x, image.clip.y, image.clip.width, image.clip.height);
    context.clip();
    context.translate(image.x, image.y);
    context.scale(
        image.width / f64::from(image.image.width()),
        image.height / f64::from(image.image.height()),
    );
    context
        .set_source_surface(&surface, 0.0, 0.0)
        .map_err(|err| map_backend_error("failed to set image source", err))?;
    context
        .paint_with_alpha(image.opacity)
        .map_err(|err| map_backend_error("failed to paint image", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
    Ok(true)
}

/// Copies RGBA pixels into a premultiplied native-endian ARGB32 surface.
fn raster_to_surface(image: &RasterImage) -> ViewerResult<ImageSurface> {
    let width = i32::try_from(image.width())
        .map_err(|_| ViewerError::InvalidData("image too wide for cairo".to_owned()))?;
    let height = i32::try_from(image.height())
        .map_err(|_| ViewerError::InvalidData("image too tall for cairo".to_owned()))?;
    let mut surface = ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create image surface", err))?;
    let stride = usize::try_from(surface.stride())
        .map_err(|_| ViewerError::InvalidData("negative cairo stride".to_owned()))?;

    {
        let mut data = surface.data().map_err(|err| {
            ViewerError::InvalidData(format!("failed to borrow image surface data: {err}"))
        })?;
        for (x, y, pixel) in image.pixels().enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let premultiply = |channel: u8| (u32::from(channel) * u32::from(a) + 127) / 255;
            let argb = (u32::from(a) << 24)
                | (premultiply(r) << 16)
                | (premultiply(g) << 8)
                | premultiply(b);
            let offset = y as usize * stride + x as usize * 4;
            data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
        }
    }
    surface.mark_dirty();
    Ok(surface)
}

fn draw_polygon(context: &Context, polygon: &PolygonPrimitive) -> ViewerResult<()> {
    let mut points = polygon.points.iter();
    if let Some(&(x, y)) = points.next() {
        context.move_to(x, y);
    }
    for &(x, y) in points {
        context.line_to(x, y);
    }
    context.close_path();

    apply_color(context, polygon.fill_color);
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill polygon", err))?;
    if polygon.stroke_width > 0.0 {
        apply_color(context, polygon.stroke_color);
        context.set_line_width(polygon.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polygon", err))?;
    } else {
        context.new_path();
    }
    Ok(())
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ViewerError {
    ViewerError::InvalidData(format!("{prefix}: {err}"))
}
