use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AlignmentMode, MaskQuery, TransformParams, VolumeSide};
use crate::render::{RasterImage, Renderer};

use super::ViewerEngine;

/// One of the four images the viewer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageVariant {
    Source,
    /// Target resampled onto the source grid by the registration result.
    TargetAligned,
    /// Target on its native grid.
    TargetOriginal,
    /// Target under the manual transform.
    TargetTransformed,
}

impl ImageVariant {
    #[must_use]
    pub fn side(self) -> VolumeSide {
        match self {
            Self::Source => VolumeSide::Source,
            Self::TargetAligned | Self::TargetOriginal | Self::TargetTransformed => {
                VolumeSide::Target
            }
        }
    }
}

/// Everything the rasterizer needs for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterRequest {
    pub variant: ImageVariant,
    pub slice_index: usize,
    pub mask: MaskQuery,
    /// Fetch the aligned or transformed target in reversed slice order.
    pub reverse: bool,
    /// Present only for `TargetTransformed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformParams>,
    /// Cache-busting token, unique per request.
    pub nonce: u64,
}

/// Which slots a fetch round refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    All,
    /// The source image, or the three target images.
    Side(VolumeSide),
}

impl FetchScope {
    #[must_use]
    pub fn covers(self, side: VolumeSide) -> bool {
        match self {
            Self::All => true,
            Self::Side(scoped) => scoped == side,
        }
    }
}

/// Requests for one fetch round. An empty slot means the variant is not
/// relevant right now and its image is cleared when the round lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchPlan {
    pub scope: FetchScope,
    pub source: Option<RasterRequest>,
    pub target_aligned: Option<RasterRequest>,
    pub target_original: Option<RasterRequest>,
    pub target_transformed: Option<RasterRequest>,
}

impl FetchPlan {
    pub fn requests(&self) -> impl Iterator<Item = &RasterRequest> {
        [
            self.source.as_ref(),
            self.target_aligned.as_ref(),
            self.target_original.as_ref(),
            self.target_transformed.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests().next().is_none()
    }
}

/// Last fetched image per variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    pub source: Option<RasterImage>,
    pub target_aligned: Option<RasterImage>,
    pub target_original: Option<RasterImage>,
    pub target_transformed: Option<RasterImage>,
}

impl ImageSet {
    #[must_use]
    pub fn get(&self, variant: ImageVariant) -> Option<&RasterImage> {
        match variant {
            ImageVariant::Source => self.source.as_ref(),
            ImageVariant::TargetAligned => self.target_aligned.as_ref(),
            ImageVariant::TargetOriginal => self.target_original.as_ref(),
            ImageVariant::TargetTransformed => self.target_transformed.as_ref(),
        }
    }

    /// Lands a fetch round.
    ///
    /// A full round replaces every slot. A source-only round keeps the
    /// previous source image when the new fetch failed; a target round
    /// replaces all three target slots.
    pub fn merge(&mut self, scope: FetchScope, fetched: ImageSet) {
        match scope {
            FetchScope::All => *self = fetched,
            FetchScope::Side(VolumeSide::Source) => {
                if fetched.source.is_some() {
                    self.source = fetched.source;
                }
            }
            FetchScope::Side(VolumeSide::Target) => {
                self.target_aligned = fetched.target_aligned;
                self.target_original = fetched.target_original;
                self.target_transformed = fetched.target_transformed;
            }
        }
    }

    /// Target image shown for `alignment`, with its fallback.
    #[must_use]
    pub fn displayed_target(&self, alignment: AlignmentMode) -> Option<&RasterImage> {
        match alignment {
            AlignmentMode::Manual => self
                .target_transformed
                .as_ref()
                .or(self.target_original.as_ref()),
            AlignmentMode::Auto => self
                .target_aligned
                .as_ref()
                .or(self.target_original.as_ref()),
            AlignmentMode::Original => self.target_original.as_ref(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.target_aligned.is_none()
            && self.target_original.is_none()
            && self.target_transformed.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl<R: Renderer> ViewerEngine<R> {
    /// Builds the requests for one fetch round, each with a fresh nonce.
    pub fn plan_fetch(&mut self, scope: FetchScope) -> FetchPlan {
        let mut plan = FetchPlan {
            scope,
            source: None,
            target_aligned: None,
            target_original: None,
            target_transformed: None,
        };

        if scope.covers(VolumeSide::Source) && self.state.source.is_loaded() {
            let nonce = self.state.take_nonce();
            plan.source = Some(RasterRequest {
                variant: ImageVariant::Source,
                slice_index: self.state.cursor.source,
                mask: MaskQuery::plain(self.state.source_has_mask),
                reverse: false,
                transform: None,
                nonce,
            });
        }

        if scope.covers(VolumeSide::Target) && self.state.target.is_loaded() {
            let reverse = self.state.registration.display_direction.is_reverse();
            let masks = self.state.target_masks;

            let nonce = self.state.take_nonce();
            plan.target_aligned = Some(RasterRequest {
                variant: ImageVariant::TargetAligned,
                // Aligned images live on the source grid.
                slice_index: self.state.cursor.source,
                mask: masks.query(),
                reverse,
                transform: None,
                nonce,
            });

            if let Some(slice_index) = self.target_original_index() {
                let mask = if self.state.alignment == AlignmentMode::Original {
                    masks.native_grid_query()
                } else {
                    masks.query()
                };
                let nonce = self.state.take_nonce();
                plan.target_original = Some(RasterRequest {
                    variant: ImageVariant::TargetOriginal,
                    slice_index,
                    mask,
                    reverse: false,
                    transform: None,
                    nonce,
                });
            }

            if self.state.transform.is_active() && self.state.alignment == AlignmentMode::Manual {
                let nonce = self.state.take_nonce();
                plan.target_transformed = Some(RasterRequest {
                    variant: ImageVariant::TargetTransformed,
                    slice_index: self.state.cursor.target,
                    mask: masks.query(),
                    reverse,
                    transform: Some(self.state.transform.applied()),
                    nonce,
                });
            }
        }

        trace!(scope = ?scope, requests = plan.requests().count(), "fetch planned");
        plan
    }

    /// Stores the images of a completed fetch round.
    pub fn apply_fetched_images(&mut self, scope: FetchScope, images: ImageSet) {
        self.state.images.merge(scope, images);
    }

    pub fn clear_images(&mut self) {
        self.state.images.clear();
    }
}
