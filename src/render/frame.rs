use crate::core::Viewport;
use crate::error::{ViewerError, ViewerResult};
use crate::render::{ImagePrimitive, LinePrimitive, PolygonPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one draw pass.
///
/// Draw order is images, polygons, rects, lines, texts; within each list,
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub images: Vec<ImagePrimitive>,
    pub polygons: Vec<PolygonPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            images: Vec::new(),
            polygons: Vec::new(),
            rects: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: ImagePrimitive) -> Self {
        self.images.push(image);
        self
    }

    #[must_use]
    pub fn with_polygon(mut self, polygon: PolygonPrimitive) -> Self {
        self.polygons.push(polygon);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ViewerResult<()> {
        if !self.viewport.is_valid() {
            return Err(ViewerError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for image in &self.images {
            image.validate()?;
        }
        for polygon in &self.polygons {
            polygon.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
            && self.polygons.is_empty()
            && self.rects.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }
}
