use tracing::{debug, trace};

use crate::api::{FetchPlan, ImageSet, RasterRequest};
use crate::render::RasterImage;

use super::ViewerBackend;

/// Runs every request of `plan` concurrently and joins them into one set.
///
/// A failed or undecodable image leaves its slot empty; it never fails the
/// round.
pub async fn fetch_images<B: ViewerBackend>(backend: &B, plan: &FetchPlan) -> ImageSet {
    let (source, target_aligned, target_original, target_transformed) = futures::join!(
        fetch_slot(backend, plan.source.as_ref()),
        fetch_slot(backend, plan.target_aligned.as_ref()),
        fetch_slot(backend, plan.target_original.as_ref()),
        fetch_slot(backend, plan.target_transformed.as_ref()),
    );

    let images = ImageSet {
        source,
        target_aligned,
        target_original,
        target_transformed,
    };
    trace!(
        scope = ?plan.scope,
        source = images.source.is_some(),
        target_aligned = images.target_aligned.is_some(),
        target_original = images.target_original.is_some(),
        target_transformed = images.target_transformed.is_some(),
        "fetch round joined"
    );
    images
}

async fn fetch_slot<B: ViewerBackend>(
    backend: &B,
    request: Option<&RasterRequest>,
) -> Option<RasterImage> {
    let request = request?;
    let bytes = match backend.rasterize(request).await {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(variant = ?request.variant, nonce = request.nonce, %err, "raster fetch failed");
            return None;
        }
    };
    match RasterImage::decode(&bytes) {
        Ok(image) => Some(image),
        Err(err) => {
            debug!(variant = ?request.variant, nonce = request.nonce, %err, "raster decode failed");
            None
        }
    }
}
