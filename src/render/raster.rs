use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{ViewerError, ViewerResult};

/// Rasterized slice handed back by the rasterizer.
///
/// Cheap to clone; frames and image sets share the pixel buffer.
#[derive(Clone, PartialEq)]
pub struct RasterImage {
    pixels: Arc<RgbaImage>,
}

impl RasterImage {
    #[must_use]
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decodes an encoded image (PNG) as served by the rasterizer.
    pub fn decode(bytes: &[u8]) -> ViewerResult<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| ViewerError::ImageDecode(err.to_string()))?;
        let pixels = decoded.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ViewerError::ImageDecode("image has no pixels".to_owned()));
        }
        Ok(Self::new(pixels))
    }

    /// Solid single-color image, mostly useful for headless hosts and tests.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[must_use]
    pub fn shares_pixels_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
