use crate::core::AlignmentMode;
use crate::error::ViewerResult;
use crate::render::{
    Color, ImageLayer, ImagePrimitive, RasterImage, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

use super::view_composition::{
    CompositionInput, CurtainDivider, ImagePlacement, NativeGridOverlay, ViewComposition,
    compose_view,
};
use super::{RenderMode, ViewerEngine};

const DIVIDER_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);
const HANDLE_SIZE_PX: f64 = 24.0;
const HANDLE_GLYPH_SIZE_PX: f64 = 14.0;
const HANDLE_GLYPH_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);

impl<R: Renderer> ViewerEngine<R> {
    /// Lays out the current images and stores the clamped pan back.
    pub fn compose(&mut self) -> ViewComposition {
        let state = &self.state;
        let source = state.images.source.as_ref();
        let target = state.images.displayed_target(state.alignment);
        let composition = compose_view(&CompositionInput {
            container: self.config.viewport,
            view: &state.view,
            source,
            target,
            overlay: self.native_grid_overlay(source.is_some()),
            split_gap_px: self.config.split_gap_px,
            pan_dragging: state.interaction.is_panning(),
        });

        self.state.view.pan = composition.pan;
        self.state.interaction.set_can_pan(composition.can_pan());
        composition
    }

    /// Materializes the comparison view as a validated render frame.
    pub fn build_render_frame(&mut self) -> ViewerResult<RenderFrame> {
        let composition = self.compose();
        let source = self.state.images.source.clone();
        let target = self
            .state
            .images
            .displayed_target(self.state.alignment)
            .cloned();

        let mut frame = RenderFrame::new(self.config.viewport);
        if let (Some(image), Some(placement)) = (source, composition.source) {
            frame = frame.with_image(image_primitive(ImageLayer::Source, image, placement));
        }
        if let (Some(image), Some(placement)) = (target, composition.target) {
            frame = frame.with_image(image_primitive(ImageLayer::Target, image, placement));
        }
        if let Some(divider) = composition.divider {
            frame = with_divider(frame, divider);
        }

        frame.validate()?;
        Ok(frame)
    }

    /// The target is drawn on the source grid when it is not server-aligned
    /// and a source image is there to anchor it.
    fn native_grid_overlay(&self, has_source_image: bool) -> Option<NativeGridOverlay> {
        let state = &self.state;
        let unaligned = match state.alignment {
            AlignmentMode::Original => true,
            AlignmentMode::Manual => !state.transform.is_active(),
            AlignmentMode::Auto => false,
        };
        let mode_allows = !matches!(
            state.view.render_mode,
            RenderMode::Target | RenderMode::Split
        );
        (unaligned && has_source_image && mode_allows)
            .then(|| NativeGridOverlay::between(&state.source, &state.target))
    }
}

fn image_primitive(
    layer: ImageLayer,
    image: RasterImage,
    placement: ImagePlacement,
) -> ImagePrimitive {
    ImagePrimitive {
        layer,
        image,
        x: placement.x,
        y: placement.y,
        width: placement.width,
        height: placement.height,
        clip: placement.clip,
        opacity: placement.opacity,
    }
}

fn with_divider(frame: RenderFrame, divider: CurtainDivider) -> RenderFrame {
    let bar = divider.bar;
    let center_x = bar.x + bar.width / 2.0;
    let center_y = bar.y + bar.height / 2.0;
    let half = HANDLE_SIZE_PX / 2.0;

    frame
        .with_rect(RectPrimitive::new(
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            DIVIDER_COLOR,
        ))
        .with_rect(
            RectPrimitive::new(
                center_x - half,
                center_y - half,
                HANDLE_SIZE_PX,
                HANDLE_SIZE_PX,
                DIVIDER_COLOR,
            )
            .with_corner_radius(half),
        )
        .with_text(TextPrimitive::new(
            divider.glyph(),
            center_x,
            center_y - HANDLE_GLYPH_SIZE_PX / 2.0,
            HANDLE_GLYPH_SIZE_PX,
            HANDLE_GLYPH_COLOR,
            TextHAlign::Center,
        ))
}
