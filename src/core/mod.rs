pub mod alignment;
pub mod mask;
pub mod slice_mapping;
pub mod spatial;
pub mod transform;
pub mod types;
pub mod volume;

pub use alignment::{AlignmentMode, DisplayDirection, RegistrationDirection};
pub use mask::{MaskDisplayMode, MaskQuery, TargetMaskState};
pub use slice_mapping::{SliceCursor, map_slice_index};
pub use spatial::{BoundingBox, LOW_OVERLAP_PERCENT, OverlapStatus, SpatialRelation};
pub use transform::{
    DEFAULT_TRANSFORM_EPSILON, ManualTransform, TransformBaseline, TransformEnableFlags,
    TransformParams,
};
pub use types::{PixelOffset, Vec3, Viewport};
pub use volume::{VolumeDescriptor, VolumeGeometry, VolumeSide};
