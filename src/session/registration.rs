use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{ViewerError, ViewerResult};

use super::{RegistrationJob, RegistrationJobState, RegistrationStatus, ViewerBackend};

/// Polls `job` at a fixed interval until it leaves `Running`.
///
/// No backoff and no timeout. A failed poll request aborts polling.
pub async fn poll_until_settled<B: ViewerBackend>(
    backend: &B,
    job: &RegistrationJob,
    interval: Duration,
) -> ViewerResult<RegistrationStatus> {
    let mut polls = 0_u32;
    loop {
        let status = backend
            .registration_status(job)
            .await
            .map_err(|err| ViewerError::backend("registration status", err.0))?;
        polls = polls.saturating_add(1);
        if status.state != RegistrationJobState::Running {
            debug!(job = %job.0, polls, state = ?status.state, "registration settled");
            return Ok(status);
        }
        trace!(job = %job.0, polls, "registration still running");
        tokio::time::sleep(interval).await;
    }
}
