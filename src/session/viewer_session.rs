use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{FetchScope, RenderMode, TransformOutcome, ViewerEngine};
use crate::core::{
    AlignmentMode, MaskDisplayMode, RegistrationDirection, TransformEnableFlags, TransformParams,
    Vec3, VolumeSide,
};
use crate::error::{ViewerError, ViewerResult};
use crate::render::Renderer;

use super::{
    BackendError, Debouncer, RegistrationJobState, RegistrationRequest, ViewerBackend,
    fetch_images, poll_until_settled,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Last user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Drives a `ViewerEngine` against a `ViewerBackend`.
///
/// Owns every suspension point (collaborator calls, image fetches,
/// registration polling) and the two debounce slots. Engine state is only
/// mutated after the collaborator call it depends on succeeded.
pub struct ViewerSession<B: ViewerBackend, R: Renderer> {
    backend: B,
    engine: ViewerEngine<R>,
    status: Option<StatusMessage>,
    slice_update: Debouncer<FetchScope>,
    transform_update: Debouncer<()>,
}

impl<B: ViewerBackend, R: Renderer> ViewerSession<B, R> {
    #[must_use]
    pub fn new(backend: B, engine: ViewerEngine<R>) -> Self {
        let config = *engine.config();
        Self {
            backend,
            engine,
            status: None,
            slice_update: Debouncer::new("slice_update", config.slice_debounce()),
            transform_update: Debouncer::new("transform_update", config.transform_debounce()),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &ViewerEngine<R> {
        &self.engine
    }

    /// Direct engine access for view-only input (pan, zoom, curtain, spatial drag).
    pub fn engine_mut(&mut self) -> &mut ViewerEngine<R> {
        &mut self.engine
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn into_parts(self) -> (B, ViewerEngine<R>) {
        (self.backend, self.engine)
    }

    pub async fn load_volume(&mut self, side: VolumeSide, path: &str) -> ViewerResult<()> {
        let path = path.trim();
        if path.is_empty() {
            self.set_status(StatusKind::Error, "Enter a DICOM path");
            return Err(ViewerError::InvalidData("volume path is empty".to_owned()));
        }
        self.set_status(StatusKind::Info, "Loading DICOM...");

        let geometry = match self.backend.load_volume(side, path).await {
            Ok(geometry) => geometry,
            Err(err) => return Err(self.fail("Error", "load volume", err)),
        };
        if let Err(err) = self.engine.apply_volume_loaded(side, geometry) {
            return Err(self.fail_locally("Error", err));
        }
        self.slice_update.cancel();
        self.transform_update.cancel();

        if let Err(err) = self.refresh_images().await {
            return Err(self.fail_locally("Error", err));
        }
        self.status = None;
        self.refresh_spatial_relation_quietly().await;

        let source_ready = self.engine.volume(VolumeSide::Source).is_loaded()
            && self.engine.source_has_mask();
        if side == VolumeSide::Target && source_ready {
            self.auto_register().await;
        }
        Ok(())
    }

    pub async fn load_mask(&mut self, side: VolumeSide, path: &str) -> ViewerResult<()> {
        let path = path.trim();
        if path.is_empty() {
            self.set_status(StatusKind::Error, "Enter a mask path");
            return Err(ViewerError::InvalidData("mask path is empty".to_owned()));
        }
        self.set_status(StatusKind::Info, "Loading mask...");

        if let Err(err) = self.backend.load_mask(side, path).await {
            return Err(self.fail("Error", "load mask", err));
        }
        self.engine.apply_mask_loaded(side);
        if let Err(err) = self.refresh_images().await {
            return Err(self.fail_locally("Error", err));
        }
        self.status = None;

        if side == VolumeSide::Source && self.engine.both_volumes_loaded() {
            self.auto_register().await;
        }
        Ok(())
    }

    pub async fn select_echo(&mut self, side: VolumeSide, echo: u32) -> ViewerResult<()> {
        let volume = self.engine.volume(side);
        if !volume.is_loaded() {
            return Err(ViewerError::VolumeNotLoaded { side });
        }
        if echo >= volume.echos {
            return Err(ViewerError::InvalidData(format!(
                "echo index {echo} out of range for {} echos",
                volume.echos
            )));
        }

        let geometry = match self.backend.select_echo(side, echo).await {
            Ok(geometry) => geometry,
            Err(err) => return Err(self.fail("Echo error", "select echo", err)),
        };
        if let Err(err) = self.engine.apply_echo_selected(side, echo, geometry) {
            return Err(self.fail_locally("Echo error", err));
        }
        if let Err(err) = self.refresh_images().await {
            return Err(self.fail_locally("Echo error", err));
        }
        self.refresh_spatial_relation_quietly().await;
        Ok(())
    }

    /// Starts a registration job and polls it to completion.
    pub async fn run_registration(&mut self) -> ViewerResult<()> {
        self.set_status(StatusKind::Info, "Registering...");
        let registration = self.engine.registration();
        let request = RegistrationRequest {
            direction: registration.direction,
            subpixel_factor: registration.subpixel_factor,
        };

        let job = match self.backend.start_registration(request).await {
            Ok(job) => job,
            Err(err) => return Err(self.fail("Registration error", "start registration", err)),
        };
        info!(job = %job.0, direction = ?request.direction, "registration started");

        let interval = self.engine.config().registration_poll_interval();
        let status = match poll_until_settled(&self.backend, &job, interval).await {
            Ok(status) => status,
            Err(err) => {
                self.set_status(StatusKind::Error, format!("Registration error: {err}"));
                return Err(err);
            }
        };

        match status.state {
            RegistrationJobState::Done => {
                self.engine.apply_registration_done(status.used_direction);
                self.set_status(StatusKind::Success, status.message);
                self.refresh_images().await
            }
            RegistrationJobState::Error | RegistrationJobState::Running => {
                warn!(job = %job.0, message = %status.message, "registration failed");
                self.set_status(StatusKind::Error, format!("Error: {}", status.message));
                Err(ViewerError::Registration(status.message))
            }
        }
    }

    /// Fetches the geometry summary and seeds the transform form from it.
    ///
    /// Clears the snapshot while either volume is missing.
    pub async fn refresh_spatial_relation(&mut self) -> ViewerResult<()> {
        if !self.engine.both_volumes_loaded() {
            self.engine.clear_spatial_relation();
            return Ok(());
        }
        let relation = self
            .backend
            .spatial_relation()
            .await
            .map_err(|err| ViewerError::backend("spatial relation", err.0))?;
        self.engine.apply_spatial_relation(relation);
        self.engine.render_spatial()?;

        if self.engine.alignment_mode() == AlignmentMode::Auto {
            self.refresh_images().await?;
        }
        Ok(())
    }

    /// Writes the registered mask. Only available once registration finished
    /// and the source has a mask.
    pub async fn export_mask(&mut self, path: &str) -> ViewerResult<()> {
        let registration = self.engine.registration();
        if !registration.done || !self.engine.source_has_mask() {
            return Err(ViewerError::InvalidState(
                "export needs a finished registration and a source mask".to_owned(),
            ));
        }
        let path = path.trim();
        if path.is_empty() {
            return Err(ViewerError::InvalidData("export path is empty".to_owned()));
        }

        self.set_status(StatusKind::Info, "Exporting...");
        if let Err(err) = self.backend.export_mask(path).await {
            return Err(self.fail("Export error", "export mask", err));
        }
        self.set_status(StatusKind::Success, format!("Exported to {path}"));
        Ok(())
    }

    /// Drops every collaborator-side volume and returns to a fresh state.
    pub async fn reset_all(&mut self) -> ViewerResult<()> {
        self.set_status(StatusKind::Info, "Resetting...");
        if let Err(err) = self.backend.reset().await {
            return Err(self.fail("Reset error", "reset", err));
        }
        self.slice_update.cancel();
        self.transform_update.cancel();
        self.engine.reset_all();
        self.status = None;
        self.engine.render()
    }

    /// Fetches all relevant variants and renders once they all landed.
    pub async fn refresh_images(&mut self) -> ViewerResult<()> {
        self.refresh_scope(FetchScope::All).await
    }

    /// Fetches the source image alone, or the three target variants together.
    pub async fn refresh_side(&mut self, side: VolumeSide) -> ViewerResult<()> {
        self.refresh_scope(FetchScope::Side(side)).await
    }

    /// Slider input: the dragged side refreshes now, the other side after
    /// the slice debounce.
    pub async fn on_slice_input(&mut self, side: VolumeSide, index: i64) -> ViewerResult<bool> {
        if !self.engine.set_slice(side, index) {
            return Ok(false);
        }
        self.after_slice_change(side).await?;
        Ok(true)
    }

    pub async fn step_slice(&mut self, side: VolumeSide, delta: i64) -> ViewerResult<bool> {
        if !self.engine.step_slice(side, delta) {
            return Ok(false);
        }
        self.after_slice_change(side).await?;
        Ok(true)
    }

    /// Value edits commit after the transform debounce, and only while a
    /// category is switched on.
    pub fn edit_transform_values(&mut self, offset_mm: Vec3, rotation_deg: Vec3, scale: Vec3) {
        if self.engine.edit_transform_fields(offset_mm, rotation_deg, scale) {
            self.transform_update.arm(Instant::now(), ());
        }
    }

    /// Flag toggles commit immediately.
    pub async fn set_transform_flags(
        &mut self,
        enabled: TransformEnableFlags,
    ) -> ViewerResult<TransformOutcome> {
        self.transform_update.cancel();
        let outcome = self.engine.set_transform_flags(enabled);
        self.refresh_images().await?;
        Ok(outcome)
    }

    pub async fn apply_manual_transform(
        &mut self,
        params: TransformParams,
    ) -> ViewerResult<TransformOutcome> {
        self.transform_update.cancel();
        let outcome = self.engine.apply_manual_transform(params);
        self.refresh_images().await?;
        Ok(outcome)
    }

    pub async fn set_alignment_mode(&mut self, mode: AlignmentMode) -> ViewerResult<()> {
        if self.engine.set_alignment_mode(mode) {
            self.refresh_images().await?;
        }
        Ok(())
    }

    pub async fn set_target_mask_mode(&mut self, mode: MaskDisplayMode) -> ViewerResult<bool> {
        if !self.engine.set_target_mask_mode(mode) {
            return Ok(false);
        }
        self.refresh_images().await?;
        Ok(true)
    }

    pub async fn set_registration_direction(
        &mut self,
        direction: RegistrationDirection,
    ) -> ViewerResult<()> {
        self.engine.set_registration_direction(direction);
        self.refresh_images().await
    }

    pub fn set_subpixel_factor(&mut self, factor: u32) -> ViewerResult<()> {
        self.engine.set_subpixel_factor(factor)
    }

    /// Entering or leaving split view changes which target slice is fetched.
    pub async fn set_render_mode(&mut self, mode: RenderMode) -> ViewerResult<()> {
        let was_split = self.engine.view_state().render_mode == RenderMode::Split;
        self.engine.set_render_mode(mode);
        if was_split != (mode == RenderMode::Split) {
            self.refresh_images().await
        } else {
            self.engine.render()
        }
    }

    /// Earliest pending debounce deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.slice_update.deadline(), self.transform_update.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs whichever debounced updates are due now. Returns whether any ran.
    pub async fn flush_due(&mut self) -> ViewerResult<bool> {
        let now = Instant::now();
        let mut fired = false;
        if let Some(scope) = self.slice_update.take_due(now) {
            self.refresh_scope(scope).await?;
            fired = true;
        }
        if self.transform_update.take_due(now).is_some() {
            let outcome = self.engine.commit_transform_fields();
            debug!(active = outcome.active, "debounced transform committed");
            self.refresh_images().await?;
            fired = true;
        }
        Ok(fired)
    }

    /// Sleeps through and runs every pending debounced update.
    pub async fn run_pending(&mut self) -> ViewerResult<()> {
        while let Some(deadline) = self.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            self.flush_due().await?;
        }
        Ok(())
    }

    async fn refresh_scope(&mut self, scope: FetchScope) -> ViewerResult<()> {
        let plan = self.engine.plan_fetch(scope);
        let images = fetch_images(&self.backend, &plan).await;
        self.engine.apply_fetched_images(scope, images);
        self.engine.render()
    }

    async fn after_slice_change(&mut self, side: VolumeSide) -> ViewerResult<()> {
        self.slice_update.arm(Instant::now(), FetchScope::Side(side.other()));
        self.refresh_side(side).await
    }

    async fn auto_register(&mut self) {
        if let Err(err) = self.run_registration().await {
            debug!(%err, "automatic registration did not complete");
        }
    }

    async fn refresh_spatial_relation_quietly(&mut self) {
        if let Err(err) = self.refresh_spatial_relation().await {
            debug!(%err, "spatial relation refresh failed");
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        let text = text.into();
        debug!(?kind, text = %text, "status");
        self.status = Some(StatusMessage { kind, text });
    }

    /// Surfaces a collaborator failure as a status line and converts it.
    fn fail(&mut self, prefix: &str, operation: &'static str, err: BackendError) -> ViewerError {
        self.set_status(StatusKind::Error, format!("{prefix}: {err}"));
        ViewerError::backend(operation, err.0)
    }

    fn fail_locally(&mut self, prefix: &str, err: ViewerError) -> ViewerError {
        self.set_status(StatusKind::Error, format!("{prefix}: {err}"));
        err
    }
}
