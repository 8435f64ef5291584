//! Pan/zoom normalization and per-mode layout of the two compared images.
//!
//! Everything here is pure: the engine feeds the current view state and the
//! images it holds, and gets back placements in container pixel space plus
//! the clamped pan offset to store.

use crate::core::{PixelOffset, Vec3, Viewport, VolumeDescriptor};
use crate::interaction::CursorStyle;
use crate::render::{ClipRect, RasterImage};

use super::{CurtainDirection, RenderMode, ViewState};

/// Width of the curtain divider bar in pixels.
pub const CURTAIN_DIVIDER_PX: f64 = 3.0;

/// Fit-to-container scale multiplied by `zoom`.
#[must_use]
pub fn fit_scale(container: Viewport, image_width: u32, image_height: u32, zoom: f64) -> f64 {
    fit_scale_in(
        container.width_f64(),
        container.height_f64(),
        image_width,
        image_height,
        zoom,
    )
}

fn fit_scale_in(
    container_width: f64,
    container_height: f64,
    image_width: u32,
    image_height: u32,
    zoom: f64,
) -> f64 {
    let scale_x = container_width / f64::from(image_width.max(1));
    let scale_y = container_height / f64::from(image_height.max(1));
    scale_x.min(scale_y) * zoom
}

/// Largest pan excursion that keeps the scaled image's far edge from passing
/// the container's center-line. Zero when the image fits.
#[must_use]
pub fn pan_limit(scaled_size: f64, container_size: f64) -> f64 {
    ((scaled_size - container_size) / 2.0).max(0.0)
}

#[must_use]
pub fn clamp_pan(pan: PixelOffset, limit: PixelOffset) -> PixelOffset {
    PixelOffset::new(
        pan.x.clamp(-limit.x, limit.x),
        pan.y.clamp(-limit.y, limit.y),
    )
}

/// Target placement on the source pixel grid from origin/spacing alone.
///
/// Assumes parallel, unrotated grids. Rotated alignment is only available
/// through the server-rendered aligned and transformed images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeGridOverlay {
    /// Target origin relative to the source origin, in source pixels.
    pub offset_px: [f64; 2],
    /// Target pixel size in source pixels.
    pub scale: [f64; 2],
}

impl NativeGridOverlay {
    #[must_use]
    pub fn between(source: &VolumeDescriptor, target: &VolumeDescriptor) -> Self {
        let spacing = |spacing: Vec3, axis: usize| {
            if spacing[axis] != 0.0 && spacing[axis].is_finite() {
                spacing[axis]
            } else {
                1.0
            }
        };
        let mut offset_px = [0.0; 2];
        let mut scale = [1.0; 2];
        for axis in 0..2 {
            let source_spacing = spacing(source.spacing, axis);
            offset_px[axis] = (target.origin[axis] - source.origin[axis]) / source_spacing;
            scale[axis] = spacing(target.spacing, axis) / source_spacing;
        }
        Self { offset_px, scale }
    }
}

/// Everything a composition pass depends on.
#[derive(Debug, Clone, Copy)]
pub struct CompositionInput<'a> {
    pub container: Viewport,
    pub view: &'a ViewState,
    pub source: Option<&'a RasterImage>,
    pub target: Option<&'a RasterImage>,
    /// Present when the target must be drawn on the source's grid.
    pub overlay: Option<NativeGridOverlay>,
    pub split_gap_px: f64,
    pub pan_dragging: bool,
}

/// Destination of one image in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub clip: ClipRect,
    pub opacity: f64,
}

/// Curtain divider bar, already centered on the split line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurtainDivider {
    pub bar: ClipRect,
    pub direction: CurtainDirection,
}

impl CurtainDivider {
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        match self.direction {
            CurtainDirection::Horizontal => CursorStyle::EwResize,
            CurtainDirection::Vertical => CursorStyle::NsResize,
        }
    }

    /// Handle glyph drawn on the divider.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self.direction {
            CurtainDirection::Horizontal => "↔",
            CurtainDirection::Vertical => "↕",
        }
    }
}

/// Shape of the composed view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositionLayout {
    /// Nothing to show.
    Empty,
    /// Both images share one canvas and one display scale.
    Shared { canvas: ClipRect, display_scale: f64 },
    /// Two panes, each fitted independently.
    Split { source_pane: ClipRect, target_pane: ClipRect },
}

/// Result of one composition pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewComposition {
    pub layout: CompositionLayout,
    pub source: Option<ImagePlacement>,
    pub target: Option<ImagePlacement>,
    pub divider: Option<CurtainDivider>,
    /// Pan offset after clamping; the caller stores it back.
    pub pan: PixelOffset,
    pub pan_limit: PixelOffset,
    pub cursor: CursorStyle,
}

impl ViewComposition {
    fn empty(pan: PixelOffset) -> Self {
        Self {
            layout: CompositionLayout::Empty,
            source: None,
            target: None,
            divider: None,
            pan,
            pan_limit: PixelOffset::zero(),
            cursor: CursorStyle::Default,
        }
    }

    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.pan_limit.x > 0.0 || self.pan_limit.y > 0.0
    }
}

/// Lays out the images for the active render mode.
#[must_use]
pub fn compose_view(input: &CompositionInput<'_>) -> ViewComposition {
    if input.source.is_none() && input.target.is_none() {
        return ViewComposition::empty(input.view.pan);
    }
    if input.view.render_mode == RenderMode::Split {
        compose_split(input)
    } else {
        compose_shared(input)
    }
}

fn cursor_for(can_pan: bool, dragging: bool) -> CursorStyle {
    if dragging {
        CursorStyle::Grabbing
    } else if can_pan {
        CursorStyle::Grab
    } else {
        CursorStyle::Default
    }
}

fn compose_shared(input: &CompositionInput<'_>) -> ViewComposition {
    let view = input.view;
    let base = if view.render_mode == RenderMode::Target {
        input.target.or(input.source)
    } else {
        input.source.or(input.target)
    };
    let Some(base) = base else {
        return ViewComposition::empty(view.pan);
    };

    let container_width = input.container.width_f64();
    let container_height = input.container.height_f64();
    let display_scale = fit_scale(input.container, base.width(), base.height(), view.zoom);
    let width = (f64::from(base.width()) * display_scale).floor();
    let height = (f64::from(base.height()) * display_scale).floor();

    let limit = PixelOffset::new(
        pan_limit(width, container_width),
        pan_limit(height, container_height),
    );
    let pan = clamp_pan(view.pan, limit);
    let left = ((container_width - width) / 2.0 + pan.x).round();
    let top = ((container_height - height) / 2.0 + pan.y).round();
    let canvas = ClipRect::new(left, top, width, height);

    let (source_clip, target_clip) = match view.render_mode {
        RenderMode::Curtain => curtain_clips(canvas, view.curtain_position, view.curtain_direction),
        _ => (canvas, canvas),
    };
    let (source_opacity, target_opacity) = match view.render_mode {
        RenderMode::Curtain | RenderMode::Split => (1.0, 1.0),
        RenderMode::Blend => (1.0 - view.blend, view.blend),
        RenderMode::Source => (1.0, 0.0),
        RenderMode::Target => (0.0, 1.0),
    };

    let source = input.source.map(|_| ImagePlacement {
        x: left,
        y: top,
        width,
        height,
        clip: source_clip,
        opacity: source_opacity,
    });
    let target = input.target.map(|image| {
        let (x, y, w, h) = match input.overlay {
            Some(overlay) => (
                left + (overlay.offset_px[0] * display_scale).floor(),
                top + (overlay.offset_px[1] * display_scale).floor(),
                (f64::from(image.width()) * overlay.scale[0] * display_scale).floor(),
                (f64::from(image.height()) * overlay.scale[1] * display_scale).floor(),
            ),
            None => (left, top, width, height),
        };
        ImagePlacement {
            x,
            y,
            width: w.max(0.0),
            height: h.max(0.0),
            clip: target_clip,
            opacity: target_opacity,
        }
    });

    let divider = (view.render_mode == RenderMode::Curtain).then(|| {
        curtain_divider(canvas, view.curtain_position, view.curtain_direction)
    });

    let composition = ViewComposition {
        layout: CompositionLayout::Shared {
            canvas,
            display_scale,
        },
        source,
        target,
        divider,
        pan,
        pan_limit: limit,
        cursor: CursorStyle::Default,
    };
    ViewComposition {
        cursor: cursor_for(composition.can_pan(), input.pan_dragging),
        ..composition
    }
}

/// Source keeps the leading part of the canvas, target the trailing part.
fn curtain_clips(
    canvas: ClipRect,
    position: f64,
    direction: CurtainDirection,
) -> (ClipRect, ClipRect) {
    match direction {
        CurtainDirection::Horizontal => {
            let split = canvas.width * position;
            (
                ClipRect::new(canvas.x, canvas.y, split, canvas.height),
                ClipRect::new(canvas.x + split, canvas.y, canvas.width - split, canvas.height),
            )
        }
        CurtainDirection::Vertical => {
            let split = canvas.height * position;
            (
                ClipRect::new(canvas.x, canvas.y, canvas.width, split),
                ClipRect::new(canvas.x, canvas.y + split, canvas.width, canvas.height - split),
            )
        }
    }
}

fn curtain_divider(canvas: ClipRect, position: f64, direction: CurtainDirection) -> CurtainDivider {
    let half = CURTAIN_DIVIDER_PX / 2.0;
    let bar = match direction {
        CurtainDirection::Horizontal => {
            let center = (canvas.x + position * canvas.width).round();
            ClipRect::new(center - half, canvas.y, CURTAIN_DIVIDER_PX, canvas.height)
        }
        CurtainDirection::Vertical => {
            let center = (canvas.y + position * canvas.height).round();
            ClipRect::new(canvas.x, center - half, canvas.width, CURTAIN_DIVIDER_PX)
        }
    };
    CurtainDivider { bar, direction }
}

struct PaneMetrics {
    width: f64,
    height: f64,
    limit: PixelOffset,
}

fn compose_split(input: &CompositionInput<'_>) -> ViewComposition {
    let view = input.view;
    let container_width = input.container.width_f64();
    let pane_width = ((container_width - input.split_gap_px) / 2.0).floor().max(1.0);
    let pane_height = input.container.height_f64();

    let metrics = |image: &RasterImage| {
        let scale = fit_scale_in(pane_width, pane_height, image.width(), image.height(), view.zoom);
        let width = (f64::from(image.width()) * scale).floor();
        let height = (f64::from(image.height()) * scale).floor();
        PaneMetrics {
            width,
            height,
            limit: PixelOffset::new(pan_limit(width, pane_width), pan_limit(height, pane_height)),
        }
    };
    let source_metrics = input.source.map(metrics);
    let target_metrics = input.target.map(metrics);

    // Panes pan together, so the tighter limit wins.
    let limit = [source_metrics.as_ref(), target_metrics.as_ref()]
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<PixelOffset>, m| {
            Some(match acc {
                Some(acc) => PixelOffset::new(acc.x.min(m.limit.x), acc.y.min(m.limit.y)),
                None => m.limit,
            })
        })
        .unwrap_or_default();
    let pan = clamp_pan(view.pan, limit);

    let source_pane = ClipRect::new(0.0, 0.0, pane_width, pane_height);
    let target_pane = ClipRect::new(
        pane_width + input.split_gap_px,
        0.0,
        pane_width,
        pane_height,
    );
    let place = |pane: ClipRect, m: &PaneMetrics| ImagePlacement {
        x: pane.x + ((pane_width - m.width) / 2.0 + pan.x).round(),
        y: pane.y + ((pane_height - m.height) / 2.0 + pan.y).round(),
        width: m.width,
        height: m.height,
        clip: pane,
        opacity: 1.0,
    };

    let composition = ViewComposition {
        layout: CompositionLayout::Split {
            source_pane,
            target_pane,
        },
        source: source_metrics.as_ref().map(|m| place(source_pane, m)),
        target: target_metrics.as_ref().map(|m| place(target_pane, m)),
        divider: None,
        pan,
        pan_limit: limit,
        cursor: CursorStyle::Default,
    };
    ViewComposition {
        cursor: cursor_for(composition.can_pan(), input.pan_dragging),
        ..composition
    }
}

/// Curtain fraction for a pointer position in container coordinates.
#[must_use]
pub fn curtain_position_at(
    container: Viewport,
    direction: CurtainDirection,
    pointer_x: f64,
    pointer_y: f64,
) -> f64 {
    let fraction = match direction {
        CurtainDirection::Horizontal => pointer_x / container.width_f64(),
        CurtainDirection::Vertical => pointer_y / container.height_f64(),
    };
    if fraction.is_nan() {
        return 0.5;
    }
    fraction.clamp(0.0, 1.0)
}
