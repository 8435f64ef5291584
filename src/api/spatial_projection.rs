//! Orthographic projection of the two volume boxes and their overlap.

use crate::core::types::round_to_decimals;
use crate::core::{BoundingBox, OverlapStatus, SpatialRelation, Vec3, Viewport};
use crate::error::ViewerResult;
use crate::interaction::SpatialRotation;
use crate::render::{Color, PolygonPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::ViewerEngine;

/// Corner indices of the drawn faces: back, right, front-top.
pub const CUBOID_FACES: [[usize; 4]; 3] = [[4, 5, 6, 7], [1, 2, 6, 5], [0, 1, 5, 4]];

const SOURCE_COLOR: u32 = 0x3b82f6;
const TARGET_COLOR: u32 = 0xf97316;
const OVERLAP_COLOR: u32 = 0x22c55e;
const BOX_ALPHA: f64 = 0.3;
const OVERLAP_ALPHA: f64 = 0.5;
const FACE_STROKE_PX: f64 = 1.0;
const LABEL_FONT_PX: f64 = 11.0;
const LABEL_MARGIN_PX: f64 = 6.0;

/// Maps physical points of a spatial snapshot to spatial-view pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialProjector {
    center: Vec3,
    scale: f64,
    screen_center: (f64, f64),
    cos_pitch: f64,
    sin_pitch: f64,
    cos_yaw: f64,
    sin_yaw: f64,
}

impl SpatialProjector {
    /// Centers on the union box and scales its largest axis to `fit_size` pixels.
    #[must_use]
    pub fn new(
        union: &BoundingBox,
        fit_size: f64,
        rotation: SpatialRotation,
        viewport: Viewport,
    ) -> Self {
        let extent = union.extent();
        let max_extent = extent[0].max(extent[1]).max(extent[2]);
        let max_extent = if max_extent > 0.0 && max_extent.is_finite() {
            max_extent
        } else {
            1.0
        };
        Self {
            center: union.center(),
            scale: fit_size / max_extent,
            screen_center: (viewport.width_f64() / 2.0, viewport.height_f64() / 2.0),
            cos_pitch: rotation.pitch.cos(),
            sin_pitch: rotation.pitch.sin(),
            cos_yaw: rotation.yaw.cos(),
            sin_yaw: rotation.yaw.sin(),
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pitch around x, then yaw around y, then drop z.
    #[must_use]
    pub fn project(&self, point: Vec3) -> (f64, f64) {
        let x = (point[0] - self.center[0]) * self.scale;
        let y = (point[1] - self.center[1]) * self.scale;
        let z = (point[2] - self.center[2]) * self.scale;

        let pitched_y = y * self.cos_pitch - z * self.sin_pitch;
        let pitched_z = y * self.sin_pitch + z * self.cos_pitch;
        let yawed_x = x * self.cos_yaw + pitched_z * self.sin_yaw;

        (self.screen_center.0 + yawed_x, self.screen_center.1 - pitched_y)
    }

    /// The three visible faces of `cuboid` as filled polygons.
    #[must_use]
    pub fn cuboid_faces(&self, cuboid: &BoundingBox, color: Color) -> [PolygonPrimitive; 3] {
        let projected = cuboid.corners().map(|corner| self.project(corner));
        CUBOID_FACES.map(|face| {
            PolygonPrimitive::new(face.map(|index| projected[index]), color, FACE_STROKE_PX)
        })
    }
}

/// Builds the spatial-view frame for `relation`.
///
/// Source and target boxes are always drawn; the overlap box only when the
/// overlap volume is positive.
pub fn build_spatial_frame(
    relation: &SpatialRelation,
    rotation: SpatialRotation,
    fit_size: f64,
    viewport: Viewport,
) -> ViewerResult<RenderFrame> {
    let projector = SpatialProjector::new(&relation.union_box(), fit_size, rotation, viewport);

    let mut frame = RenderFrame::new(viewport);
    let mut shapes = vec![
        (
            relation.source,
            Color::from_hex(SOURCE_COLOR).with_alpha(BOX_ALPHA),
        ),
        (
            relation.target,
            Color::from_hex(TARGET_COLOR).with_alpha(BOX_ALPHA),
        ),
    ];
    if let Some(overlap) = relation.overlap_box() {
        shapes.push((overlap, Color::from_hex(OVERLAP_COLOR).with_alpha(OVERLAP_ALPHA)));
    }
    for (cuboid, color) in shapes {
        for face in projector.cuboid_faces(&cuboid, color) {
            frame = frame.with_polygon(face);
        }
    }

    let status = relation.status();
    frame = frame
        .with_text(TextPrimitive::new(
            status.label(),
            LABEL_MARGIN_PX,
            LABEL_MARGIN_PX,
            LABEL_FONT_PX,
            status_color(status),
            TextHAlign::Left,
        ))
        .with_text(TextPrimitive::new(
            format!(
                "{}%",
                round_to_decimals(relation.displayed_overlap_pct(), 1)
            ),
            viewport.width_f64() - LABEL_MARGIN_PX,
            LABEL_MARGIN_PX,
            LABEL_FONT_PX,
            Color::rgb(0.9, 0.9, 0.9),
            TextHAlign::Right,
        ));

    frame.validate()?;
    Ok(frame)
}

fn status_color(status: OverlapStatus) -> Color {
    match status {
        OverlapStatus::Ok => Color::from_hex(0x22c55e),
        OverlapStatus::LowOverlap => Color::from_hex(0xeab308),
        OverlapStatus::NoOverlap => Color::from_hex(0xef4444),
    }
}

impl<R: Renderer> ViewerEngine<R> {
    /// Spatial-view frame for the current snapshot; empty without one.
    pub fn build_spatial_frame(&self) -> ViewerResult<RenderFrame> {
        match &self.state.spatial {
            Some(relation) => build_spatial_frame(
                relation,
                self.state.spatial_rotation,
                self.config.spatial_fit_size,
                self.config.spatial_viewport,
            ),
            None => Ok(RenderFrame::new(self.config.spatial_viewport)),
        }
    }

    pub fn set_spatial_rotation(&mut self, rotation: SpatialRotation) {
        self.state.spatial_rotation = rotation;
    }
}
