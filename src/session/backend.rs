use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::RasterRequest;
use crate::core::{
    DisplayDirection, RegistrationDirection, SpatialRelation, VolumeGeometry, VolumeSide,
};

/// Human-readable failure detail reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Settings a registration job is started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub direction: RegistrationDirection,
    pub subpixel_factor: u32,
}

/// Handle of a running registration job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationJob(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationJobState {
    Running,
    Done,
    Error,
}

/// One poll result of a registration job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStatus {
    pub state: RegistrationJobState,
    #[serde(default)]
    pub message: String,
    /// Direction the job settled on when `Auto` was requested.
    #[serde(default)]
    pub used_direction: Option<DisplayDirection>,
}

impl RegistrationStatus {
    #[must_use]
    pub fn running() -> Self {
        Self {
            state: RegistrationJobState::Running,
            message: String::new(),
            used_direction: None,
        }
    }

    #[must_use]
    pub fn done(message: impl Into<String>, used_direction: Option<DisplayDirection>) -> Self {
        Self {
            state: RegistrationJobState::Done,
            message: message.into(),
            used_direction,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            state: RegistrationJobState::Error,
            message: message.into(),
            used_direction: None,
        }
    }
}

/// Collaborator seam: volume decoding, registration, rasterization and
/// export all live behind it.
///
/// Calls are awaited one at a time from a single task, except `rasterize`,
/// which is invoked for up to four variants concurrently.
pub trait ViewerBackend {
    fn load_volume(
        &self,
        side: VolumeSide,
        path: &str,
    ) -> impl Future<Output = BackendResult<VolumeGeometry>>;

    fn load_mask(&self, side: VolumeSide, path: &str) -> impl Future<Output = BackendResult<()>>;

    fn select_echo(
        &self,
        side: VolumeSide,
        echo: u32,
    ) -> impl Future<Output = BackendResult<VolumeGeometry>>;

    fn start_registration(
        &self,
        request: RegistrationRequest,
    ) -> impl Future<Output = BackendResult<RegistrationJob>>;

    fn registration_status(
        &self,
        job: &RegistrationJob,
    ) -> impl Future<Output = BackendResult<RegistrationStatus>>;

    fn spatial_relation(&self) -> impl Future<Output = BackendResult<SpatialRelation>>;

    /// Returns the encoded (PNG) slice image for `request`.
    fn rasterize(&self, request: &RasterRequest) -> impl Future<Output = BackendResult<Vec<u8>>>;

    fn export_mask(&self, path: &str) -> impl Future<Output = BackendResult<()>>;

    /// Drops every volume the collaborator holds.
    fn reset(&self) -> impl Future<Output = BackendResult<()>>;
}
