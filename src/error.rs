use thiserror::Error;

use crate::core::VolumeSide;

pub type ViewerResult<T> = Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{side} volume is not loaded")]
    VolumeNotLoaded { side: VolumeSide },

    #[error("{operation} failed: {detail}")]
    Backend {
        operation: &'static str,
        detail: String,
    },

    #[error("registration failed: {0}")]
    Registration(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("failed to decode raster image: {0}")]
    ImageDecode(String),
}

impl ViewerError {
    /// Builds a collaborator failure for `operation` with its human-readable detail.
    #[must_use]
    pub fn backend(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            detail: detail.into(),
        }
    }
}
