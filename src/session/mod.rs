//! Async driver that connects the engine to its collaborator.

mod backend;
mod debounce;
mod fetch_coordinator;
mod registration;
mod viewer_session;

pub use backend::{
    BackendError, BackendResult, RegistrationJob, RegistrationJobState, RegistrationRequest,
    RegistrationStatus, ViewerBackend,
};
pub use debounce::Debouncer;
pub use fetch_coordinator::fetch_images;
pub use registration::poll_until_settled;
pub use viewer_session::{StatusKind, StatusMessage, ViewerSession};
